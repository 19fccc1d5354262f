#[cfg(test)]
mod tests {
    use crate::error::ProgressError;

    #[test]
    fn test_error_creation() {
        let error = ProgressError::new("Test error", "test_stage");
        assert_eq!(error.message, "Test error");
        assert_eq!(error.stage, "test_stage");
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_with_context() {
        let error = ProgressError::new("Test error", "test_stage")
            .with_context("Additional context");
        assert_eq!(error.context.as_deref(), Some("Additional context"));
    }

    #[test]
    fn test_unknown_chapter_error() {
        let error = ProgressError::unknown_chapter("algebra");
        assert_eq!(error.stage, "curriculum");
        assert!(error.message.contains("algebra"));
    }

    #[test]
    fn test_error_display() {
        let error = ProgressError::new("Test error", "test_stage")
            .with_context("context")
            .with_source("source");
        let display = format!("{}", error);
        assert_eq!(display, "[test_stage] Test error (context: context) (source: source)");
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = ProgressError::from(err);
        assert_eq!(error.stage, "json_parse");
        assert_eq!(error.source.as_deref(), Some("serde_json"));
    }

    #[test]
    fn test_anyhow_conversion_keeps_context_chain() {
        use anyhow::Context;
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("connection refused"))
            .context("Failed to reach backend");
        let error = ProgressError::from(result.unwrap_err());
        assert!(error.message.contains("Failed to reach backend"));
        assert!(error.message.contains("connection refused"));
    }
}
