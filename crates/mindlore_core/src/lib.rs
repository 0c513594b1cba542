//! MindLore core: pure topic state machine, title validation, suggestion
//! parsing and view-model helpers.
mod effect;
mod msg;
mod state;
mod suggestion;
mod update;
mod validate;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    AppState, GenerationFailure, IdGenerator, SequentialIdGenerator, Topic, TopicId,
    UuidIdGenerator,
};
pub use suggestion::{parse_suggestion, strip_quotes, suggestion_label, StructuredSuggestion};
pub use update::update;
pub use validate::{normalize_title, validate_title, ValidationError, MAX_TITLE_CHARS};
pub use view_model::{AppViewModel, SuggestionTabView, TopicCardView};
