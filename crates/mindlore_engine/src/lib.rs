//! MindLore engine: suggestion backend client and effect execution.
mod client;
mod engine;
mod types;

pub use client::{ClientSettings, HttpSuggestionClient, SuggestionClient};
pub use engine::EngineHandle;
pub use types::{EngineEvent, FailureKind, GenerationError, RequestKey};
