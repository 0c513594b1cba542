use mindlore_core::{update, AppState, Msg, SequentialIdGenerator, Topic, TopicId};

fn id(value: &str) -> TopicId {
    TopicId::new(value)
}

fn seeded_state() -> AppState {
    AppState::with_id_generator(SequentialIdGenerator::new("new")).with_topics(vec![
        Topic::new(id("topic-1"), "Topic 1").with_detail("Topic 1 detail"),
        Topic::new(id("topic-2"), "Topic 2").with_detail("Topic 2 detail"),
    ])
}

fn with_suggestions(state: AppState, topic: &str, suggestions: &[&str]) -> AppState {
    let (state, _) = update(
        state,
        Msg::GenerateSuggestionsClicked {
            topic_id: id(topic),
        },
    );
    let (state, _) = update(
        state,
        Msg::SuggestionsReceived {
            topic_id: id(topic),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        },
    );
    state
}

#[test]
fn selecting_open_topic_closes_it() {
    let (state, _) = update(seeded_state(), Msg::TopicSelected(Some(id("topic-1"))));
    assert_eq!(state.selected_topic_id(), Some(&id("topic-1")));

    let (state, _) = update(state, Msg::TopicSelected(Some(id("topic-1"))));
    assert_eq!(state.selected_topic_id(), None);
}

#[test]
fn selecting_another_topic_moves_selection() {
    let (state, _) = update(seeded_state(), Msg::TopicSelected(Some(id("topic-1"))));
    let (state, _) = update(state, Msg::TopicSelected(Some(id("topic-2"))));
    let view = state.view();

    assert_eq!(view.selected_topic_id, Some(id("topic-2")));
    assert_eq!(view.topics.iter().filter(|card| card.is_selected).count(), 1);
    assert_eq!(
        view.selected_topic().and_then(|card| card.shown_content.as_deref()),
        Some("Topic 2 detail")
    );
    // Closed cards do not expose content.
    assert_eq!(view.topics[0].shown_content, None);
}

#[test]
fn none_closes_and_unknown_ids_are_ignored() {
    let (state, _) = update(seeded_state(), Msg::TopicSelected(Some(id("topic-2"))));
    let (mut state, _) = update(state, Msg::TopicSelected(Some(id("missing"))));
    assert_eq!(state.selected_topic_id(), Some(&id("topic-2")));
    state.consume_dirty();

    let (mut state, _) = update(state, Msg::TopicSelected(None));
    assert_eq!(state.selected_topic_id(), None);
    assert!(state.consume_dirty());
}

#[test]
fn selected_suggestion_replaces_detail() {
    let state = with_suggestions(seeded_state(), "topic-1", &["A", "B", "C"]);
    let (state, _) = update(state, Msg::TopicSelected(Some(id("topic-1"))));
    let (state, _) = update(
        state,
        Msg::SuggestionSelected {
            topic_id: id("topic-1"),
            index: 1,
        },
    );

    let view = state.view();
    let card = view.selected_topic().expect("open card");
    assert_eq!(card.shown_content.as_deref(), Some("B"));
    let selected: Vec<_> = card.suggestions.iter().map(|tab| tab.is_selected).collect();
    assert_eq!(selected, vec![false, true, false]);
    assert_eq!(card.suggestions.len(), 3);
}

#[test]
fn out_of_range_or_unknown_suggestion_selection_is_noop() {
    let state = with_suggestions(seeded_state(), "topic-1", &["A"]);
    let (state, _) = update(
        state,
        Msg::SuggestionSelected {
            topic_id: id("topic-1"),
            index: 1,
        },
    );
    let (state, _) = update(
        state,
        Msg::SuggestionSelected {
            topic_id: id("missing"),
            index: 0,
        },
    );
    let (state, _) = update(
        state,
        Msg::SuggestionSelected {
            topic_id: id("topic-2"),
            index: 0,
        },
    );

    assert_eq!(
        state.topic(&id("topic-1")).and_then(|t| t.selected_suggestion_index),
        None
    );
    assert_eq!(
        state.topic(&id("topic-2")).and_then(|t| t.selected_suggestion_index),
        None
    );
}

#[test]
fn stale_index_falls_back_to_detail() {
    let mut topic = Topic::new(id("topic-9"), "Stale").with_detail("fallback");
    topic.suggestions = vec!["only".to_string()];
    topic.selected_suggestion_index = Some(4);

    assert_eq!(topic.selected_suggestion(), None);
    assert_eq!(topic.shown_content(), "fallback");

    let state = AppState::new().with_topics(vec![topic]);
    let (state, _) = update(state, Msg::TopicSelected(Some(id("topic-9"))));
    let view = state.view();
    let card = view.selected_topic().expect("open card");
    assert!(card.suggestions.iter().all(|tab| !tab.is_selected));
    assert_eq!(card.shown_content.as_deref(), Some("fallback"));
}
