//! Analysis pipeline orchestration.
//!
//! Wires the media stages, external service clients and pure scorers
//! into a single run with a fixed state machine and guaranteed cleanup
//! of per-run artifacts.

pub mod config;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod state;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use logging::{init_tracing, RunLogger};
pub use orchestrator::Pipeline;
pub use state::PipelineState;
