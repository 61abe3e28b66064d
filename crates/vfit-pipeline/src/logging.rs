//! Structured run logging utilities.
//!
//! Provides consistent, structured logging for pipeline runs with
//! tracing spans and contextual information.

use tracing::{error, info, warn, Span};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `info` when unset. Safe to call only
/// once per process.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_ansi(true)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .with(env_filter)
        .init();
}

/// Run logger for structured logging with consistent formatting.
///
/// Provides a simple interface for logging pipeline lifecycle events
/// with automatic contextual information (run ID, current stage).
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
}

impl RunLogger {
    /// Create a new logger for one pipeline run.
    pub fn new(run_id: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
        }
    }

    /// Log the start of the run.
    pub fn log_start(&self, message: &str) {
        info!(run_id = %self.run_id, "Run started: {}", message);
    }

    /// Log a stage transition or progress update.
    pub fn log_stage(&self, stage: &str, message: &str) {
        info!(run_id = %self.run_id, stage = %stage, "Run progress: {}", message);
    }

    /// Log a degraded signal during the run.
    pub fn log_degraded(&self, note: &str) {
        warn!(run_id = %self.run_id, "Degraded signal: {}", note);
    }

    /// Log a fatal error.
    pub fn log_error(&self, message: &str) {
        error!(run_id = %self.run_id, "Run failed: {}", message);
    }

    /// Log the completion of the run.
    pub fn log_completion(&self, message: &str) {
        info!(run_id = %self.run_id, "Run completed: {}", message);
    }

    /// Get the run ID.
    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Create a tracing span for this run.
    pub fn create_span(&self) -> Span {
        tracing::info_span!("run", run_id = %self.run_id)
    }
}
