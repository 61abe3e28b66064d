//! Clients for the external transcription and generative text services.
//!
//! Both services are behind traits so the pipeline can be driven by live
//! HTTP clients or by canned fixtures. The live/fixture choice is made at
//! construction time; nothing downstream branches on it.

pub mod error;
pub mod suggestions;
pub mod transcription;

pub use error::{ServiceError, ServiceResult};
pub use suggestions::{
    FeatureSummary, FixtureSuggestions, LiveSuggestions, SuggestionConfig, SuggestionService,
};
pub use transcription::{
    FixtureTranscription, LiveTranscription, TranscriptionConfig, TranscriptionService,
};
