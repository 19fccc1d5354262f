use crate::error::ProgressError;

/// Install the structured JSON subscriber.
/// Returns an error if a global subscriber is already set.
pub fn try_init_logging() -> Result<(), ProgressError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .json()
        );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ProgressError::new(
            format!("Failed to set global tracing subscriber: {}", e),
            "logging"
        ))?;

    tracing::info!("Structured logging initialized");
    Ok(())
}

/// Initialize structured logging once at host startup.
/// A host that already installed its own subscriber keeps it.
pub fn init_logging() {
    if let Err(e) = try_init_logging() {
        tracing::debug!(error = %e, "Keeping existing tracing subscriber");
    }
}
