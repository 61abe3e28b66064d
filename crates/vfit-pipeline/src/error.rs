//! Pipeline error types.
//!
//! Only fatal conditions surface as [`PipelineError`]: an unreadable
//! video or a frame sampling failure. Every other modality failure is
//! converted into a degraded default and a diagnostic note at the stage
//! boundary.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Media error: {0}")]
    Media(#[from] vfit_media::MediaError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
