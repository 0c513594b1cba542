use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TopicInputChanged(text) => {
            state.set_topic_input(text);
            Vec::new()
        }
        Msg::TopicSubmitted => {
            state.submit_topic_input();
            Vec::new()
        }
        Msg::TopicSelected(topic_id) => {
            state.select_topic(topic_id);
            Vec::new()
        }
        Msg::GenerateSuggestionsClicked { topic_id } => match state.begin_generation(&topic_id) {
            Some(title) => vec![Effect::RequestSuggestions { topic_id, title }],
            None => Vec::new(),
        },
        Msg::SuggestionsReceived {
            topic_id,
            suggestions,
        } => {
            state.apply_suggestions(&topic_id, suggestions);
            Vec::new()
        }
        Msg::SuggestionsFailed { topic_id, reason } => {
            state.apply_generation_failure(&topic_id, reason);
            Vec::new()
        }
        Msg::SuggestionSelected { topic_id, index } => {
            state.select_suggestion(&topic_id, index);
            Vec::new()
        }
    };

    (state, effects)
}
