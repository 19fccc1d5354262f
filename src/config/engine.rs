use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::ProgressError;

/// Environment variable that points at an alternative config file
pub const CONFIG_ENV: &str = "MATHPATH_CONFIG";

/// XP granted per reward event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RewardValues {
    pub lesson: u32,
    pub activity: u32,
    pub perfect_score: u32,
    pub mastery: u32,
    pub mastery_attempt: u32,
    pub daily_goal: u32,
    pub assessment: u32,
}

impl Default for RewardValues {
    fn default() -> Self {
        RewardValues {
            lesson: 20,
            activity: 50,
            perfect_score: 10,
            mastery: 100,
            mastery_attempt: 30,
            daily_goal: 25,
            assessment: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LevelCurve {
    pub initial_threshold: u32,
    pub growth_factor: f64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        LevelCurve {
            initial_threshold: 100,
            growth_factor: 1.5,
        }
    }
}

/// Accuracy thresholds (percent) for tier transitions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DifficultyRules {
    pub window: usize,
    pub min_samples: usize,
    pub easy_to_medium: f64,
    pub medium_to_hard: f64,
    pub medium_to_easy: f64,
    pub hard_to_medium: f64,
}

impl Default for DifficultyRules {
    fn default() -> Self {
        DifficultyRules {
            window: 5,
            min_samples: 5,
            easy_to_medium: 80.0,
            medium_to_hard: 90.0,
            medium_to_easy: 50.0,
            hard_to_medium: 60.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MasteryRules {
    pub pass_mark: u8,
}

impl Default for MasteryRules {
    fn default() -> Self {
        MasteryRules { pass_mark: 80 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GoalTargets {
    pub lessons: u32,
    pub activities: u32,
    pub xp: u32,
}

impl Default for GoalTargets {
    fn default() -> Self {
        GoalTargets {
            lessons: 1,
            activities: 2,
            xp: 100,
        }
    }
}

/// REST persistence backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub failure_threshold: u64,
    pub cooldown_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 5,
            failure_threshold: 3,
            cooldown_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub rewards: RewardValues,
    pub leveling: LevelCurve,
    pub difficulty: DifficultyRules,
    pub mastery: MasteryRules,
    pub daily_goals: GoalTargets,
    pub backend: BackendConfig,
}

impl EngineConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ProgressError> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ProgressError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ProgressError::from(e).with_context(format!("path: {:?}", path)))?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("path: {:?}", path)))
    }

    fn validate(&self) -> Result<(), ProgressError> {
        if self.leveling.initial_threshold == 0 {
            return Err(ProgressError::new("leveling.initial_threshold must be > 0", "config"));
        }
        if !(self.leveling.growth_factor > 1.0) {
            return Err(ProgressError::new("leveling.growth_factor must be > 1.0", "config"));
        }
        if self.difficulty.window == 0 {
            return Err(ProgressError::new("difficulty.window must be > 0", "config"));
        }
        if self.mastery.pass_mark > 100 {
            return Err(ProgressError::new("mastery.pass_mark must be <= 100", "config"));
        }
        Ok(())
    }
}

fn get_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    let mut path = super::app_data_dir();
    path.push("mathpath.toml");
    path
}

fn load_engine_config_internal() -> EngineConfig {
    let config_path = get_config_path();

    if !config_path.exists() {
        tracing::info!(path = ?config_path, "No config file, using default engine configuration");
        return EngineConfig::default();
    }

    match EngineConfig::load_from(&config_path) {
        Ok(config) => {
            tracing::info!(path = ?config_path, "Loaded engine config");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load engine config, using defaults");
            EngineConfig::default()
        }
    }
}

lazy_static! {
    static ref ENGINE_CONFIG: EngineConfig = load_engine_config_internal();
}

/// Get the cached engine configuration (loaded once on first use)
pub fn get_engine_config() -> &'static EngineConfig {
    &ENGINE_CONFIG
}
