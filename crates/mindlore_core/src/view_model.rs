use crate::TopicId;

/// Snapshot of the store for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub topic_input: String,
    pub validation_message: Option<String>,
    /// Most recent first.
    pub topics: Vec<TopicCardView>,
    pub selected_topic_id: Option<TopicId>,
    pub generating_topic_ids: Vec<TopicId>,
    pub last_generation_failure: Option<String>,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn has_topics(&self) -> bool {
        !self.topics.is_empty()
    }

    pub fn selected_topic(&self) -> Option<&TopicCardView> {
        self.topics.iter().find(|card| card.is_selected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicCardView {
    pub id: TopicId,
    pub title: String,
    pub is_selected: bool,
    pub is_generating: bool,
    pub suggestions: Vec<SuggestionTabView>,
    /// Detail or selected suggestion text; only present while the card is open.
    pub shown_content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionTabView {
    pub index: usize,
    pub label: String,
    pub is_selected: bool,
}
