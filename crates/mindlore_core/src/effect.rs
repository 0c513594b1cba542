/// Work the shell must perform on behalf of the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the backend for suggestions. Completion must come back as
    /// `Msg::SuggestionsReceived` or `Msg::SuggestionsFailed`.
    RequestSuggestions {
        topic_id: crate::TopicId,
        title: String,
    },
}
