#[cfg(test)]
mod tests {
    use crate::config::engine::EngineConfig;

    #[test]
    fn test_default_values() {
        let config = EngineConfig::default();
        assert_eq!(config.rewards.lesson, 20);
        assert_eq!(config.rewards.activity, 50);
        assert_eq!(config.rewards.mastery, 100);
        assert_eq!(config.rewards.mastery_attempt, 30);
        assert_eq!(config.leveling.initial_threshold, 100);
        assert_eq!(config.difficulty.min_samples, 5);
        assert_eq!(config.mastery.pass_mark, 80);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [rewards]
            lesson = 40

            [backend]
            base_url = "http://school.local:3001"
            "#,
        )
        .unwrap();
        assert_eq!(config.rewards.lesson, 40);
        assert_eq!(config.rewards.activity, 50);
        assert_eq!(config.backend.base_url, "http://school.local:3001");
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn test_rejects_flat_level_curve() {
        let err = EngineConfig::from_toml_str(
            r#"
            [leveling]
            growth_factor = 1.0
            "#,
        )
        .unwrap_err();
        assert_eq!(err.stage, "config");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = EngineConfig::from_toml_str("rewards = [").unwrap_err();
        assert_eq!(err.stage, "config");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mathpath.toml");
        std::fs::write(&path, "[mastery]\npass_mark = 70\n").unwrap();
        let config = EngineConfig::load_from(&path).unwrap();
        assert_eq!(config.mastery.pass_mark, 70);

        let missing = EngineConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert_eq!(missing.stage, "io");
        assert!(missing.context.is_some());
    }
}
