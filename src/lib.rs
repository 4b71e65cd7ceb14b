// Library surface shared by the CLI binary and integration tests.

pub mod completion;
pub mod config;
pub mod epoch;
pub mod error;
pub mod report;
pub mod scoring;
pub mod types;

pub use crate::completion::{complete, CompletionRequest};
pub use crate::epoch::EpochTable;
pub use crate::error::{ContextError, Result};
pub use crate::types::config::EngineSettings;
pub use crate::types::phase::{ContextCompletion, IndicatorValue, Phase};
