use crate::TopicId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the topic entry box.
    TopicInputChanged(String),
    /// User submitted the current topic entry text.
    TopicSubmitted,
    /// User opened a topic, or closed the open one with `None`. Opening the
    /// topic that is already open closes it.
    TopicSelected(Option<TopicId>),
    /// User asked for suggestions for a topic.
    GenerateSuggestionsClicked { topic_id: TopicId },
    /// Backend returned suggestions for a topic.
    SuggestionsReceived {
        topic_id: TopicId,
        suggestions: Vec<String>,
    },
    /// Backend request for a topic failed.
    SuggestionsFailed { topic_id: TopicId, reason: String },
    /// User picked one of a topic's suggestions.
    SuggestionSelected { topic_id: TopicId, index: usize },
}
