use std::collections::BTreeSet;
use std::fmt;

use mindlore_logging::{mindlore_debug, mindlore_info, mindlore_warn};

use crate::validate::{validate_title, ValidationError};
use crate::view_model::{AppViewModel, SuggestionTabView, TopicCardView};
use crate::suggestion_label;

/// Opaque topic identifier, stable for the lifetime of the topic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh topic ids, injected so tests can use predictable ids.
pub trait IdGenerator: Send + fmt::Debug {
    fn next_id(&mut self) -> TopicId;
}

/// Random v4 UUIDs.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&mut self) -> TopicId {
        TopicId(uuid::Uuid::new_v4().to_string())
    }
}

/// Monotonic `{prefix}-{n}` ids starting at 1.
#[derive(Debug, Clone)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: u64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&mut self) -> TopicId {
        let id = TopicId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub detail: String,
    pub suggestions: Vec<String>,
    pub selected_suggestion_index: Option<usize>,
}

impl Topic {
    pub fn new(id: TopicId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            detail: String::new(),
            suggestions: Vec::new(),
            selected_suggestion_index: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    /// The selected suggestion, ignoring an index that no longer fits.
    pub fn selected_suggestion(&self) -> Option<&str> {
        self.selected_suggestion_index
            .and_then(|index| self.suggestions.get(index))
            .map(String::as_str)
    }

    /// Text shown when the topic is expanded.
    pub fn shown_content(&self) -> &str {
        self.selected_suggestion().unwrap_or(&self.detail)
    }
}

/// The most recent failed suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    pub topic_id: TopicId,
    pub reason: String,
}

/// The topic store. All mutation goes through [`crate::update`] or
/// [`AppState::add_topic`].
#[derive(Debug)]
pub struct AppState {
    topics: Vec<Topic>,
    selected_topic: Option<TopicId>,
    topic_input: String,
    validation_error: Option<ValidationError>,
    generating: BTreeSet<TopicId>,
    last_generation_failure: Option<GenerationFailure>,
    ids: Box<dyn IdGenerator>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_id_generator(UuidIdGenerator)
    }

    pub fn with_id_generator(ids: impl IdGenerator + 'static) -> Self {
        Self {
            topics: Vec::new(),
            selected_topic: None,
            topic_input: String::new(),
            validation_error: None,
            generating: BTreeSet::new(),
            last_generation_failure: None,
            ids: Box::new(ids),
            dirty: false,
        }
    }

    /// Seeds the store with existing topics, kept in the given order.
    pub fn with_topics(mut self, topics: Vec<Topic>) -> Self {
        self.topics = topics;
        self.dirty = true;
        self
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn topic(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| &topic.id == id)
    }

    pub fn selected_topic_id(&self) -> Option<&TopicId> {
        self.selected_topic.as_ref()
    }

    pub fn topic_input(&self) -> &str {
        &self.topic_input
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.validation_error
    }

    pub fn is_generating(&self, id: &TopicId) -> bool {
        self.generating.contains(id)
    }

    pub fn last_generation_failure(&self) -> Option<&GenerationFailure> {
        self.last_generation_failure.as_ref()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            topic_input: self.topic_input.clone(),
            validation_message: self.validation_error.map(|err| err.to_string()),
            topics: self.topics.iter().map(|topic| self.card_view(topic)).collect(),
            selected_topic_id: self.selected_topic.clone(),
            generating_topic_ids: self.generating.iter().cloned().collect(),
            last_generation_failure: self
                .last_generation_failure
                .as_ref()
                .map(|failure| failure.reason.clone()),
            dirty: self.dirty,
        }
    }

    fn card_view(&self, topic: &Topic) -> TopicCardView {
        let is_selected = self.selected_topic.as_ref() == Some(&topic.id);
        let selected_index = topic
            .selected_suggestion()
            .and(topic.selected_suggestion_index);
        TopicCardView {
            id: topic.id.clone(),
            title: topic.title.clone(),
            is_selected,
            is_generating: self.generating.contains(&topic.id),
            suggestions: topic
                .suggestions
                .iter()
                .enumerate()
                .map(|(index, text)| SuggestionTabView {
                    index,
                    label: suggestion_label(text, index),
                    is_selected: selected_index == Some(index),
                })
                .collect(),
            shown_content: is_selected.then(|| topic.shown_content().to_owned()),
        }
    }

    /// Returns whether anything changed since the last call, resetting the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Validates and prepends a new topic. On failure the validation message
    /// is set and the topic list is left alone. The selection never changes.
    pub fn add_topic(&mut self, raw_title: &str) -> Result<TopicId, ValidationError> {
        self.mark_dirty();
        let title = match validate_title(raw_title, &self.topics) {
            Ok(title) => title,
            Err(err) => {
                mindlore_info!("Rejected topic title: {}", err);
                self.validation_error = Some(err);
                return Err(err);
            }
        };

        let id = self.fresh_id();
        mindlore_debug!("Added topic id={} title={:?}", id, title);
        self.topics.insert(0, Topic::new(id.clone(), title));
        self.validation_error = None;
        Ok(id)
    }

    /// Draws ids until one is not held by any topic; seeded topics may
    /// already use ids the generator would produce.
    fn fresh_id(&mut self) -> TopicId {
        loop {
            let id = self.ids.next_id();
            if self.topic(&id).is_none() {
                return id;
            }
            mindlore_debug!("Skipping id {} already held by a topic", id);
        }
    }

    pub(crate) fn set_topic_input(&mut self, text: String) {
        if self.topic_input != text {
            self.topic_input = text;
            self.mark_dirty();
        }
    }

    /// Submits the entry text; it is cleared only when the topic was added.
    pub(crate) fn submit_topic_input(&mut self) {
        let raw = std::mem::take(&mut self.topic_input);
        if self.add_topic(&raw).is_err() {
            self.topic_input = raw;
        }
    }

    /// Selecting the open topic closes it. Unknown ids are ignored.
    pub(crate) fn select_topic(&mut self, id: Option<TopicId>) {
        let next = match id {
            Some(id) if self.selected_topic.as_ref() == Some(&id) => None,
            Some(id) if self.topic(&id).is_none() => {
                mindlore_debug!("Ignoring selection of unknown topic {}", id);
                return;
            }
            other => other,
        };
        if self.selected_topic != next {
            self.selected_topic = next;
            self.mark_dirty();
        }
    }

    /// Marks the topic as generating and returns its title, or `None` when the
    /// topic is unknown or already has a request in flight.
    pub(crate) fn begin_generation(&mut self, id: &TopicId) -> Option<String> {
        let title = self.topic(id)?.title.clone();
        if !self.generating.insert(id.clone()) {
            mindlore_debug!("Suggestions already in flight for topic {}", id);
            return None;
        }
        self.mark_dirty();
        Some(title)
    }

    pub(crate) fn apply_suggestions(&mut self, id: &TopicId, suggestions: Vec<String>) {
        self.finish_generation(id);
        let Some(topic) = self.topics.iter_mut().find(|topic| &topic.id == id) else {
            mindlore_debug!("Discarding suggestions for removed topic {}", id);
            return;
        };
        topic.suggestions = suggestions;
        topic.selected_suggestion_index = None;
        if self
            .last_generation_failure
            .as_ref()
            .is_some_and(|failure| &failure.topic_id == id)
        {
            self.last_generation_failure = None;
        }
        self.mark_dirty();
    }

    pub(crate) fn apply_generation_failure(&mut self, id: &TopicId, reason: String) {
        self.finish_generation(id);
        if self.topic(id).is_none() {
            mindlore_debug!("Discarding failure for removed topic {}: {}", id, reason);
            return;
        }
        mindlore_warn!("Suggestion generation failed for topic {}: {}", id, reason);
        self.last_generation_failure = Some(GenerationFailure {
            topic_id: id.clone(),
            reason,
        });
        self.mark_dirty();
    }

    fn finish_generation(&mut self, id: &TopicId) {
        if self.generating.remove(id) {
            self.mark_dirty();
        }
    }

    /// Out-of-range indices and unknown topics are ignored.
    pub(crate) fn select_suggestion(&mut self, id: &TopicId, index: usize) {
        let Some(topic) = self.topics.iter_mut().find(|topic| &topic.id == id) else {
            return;
        };
        if index >= topic.suggestions.len() {
            return;
        }
        if topic.selected_suggestion_index != Some(index) {
            topic.selected_suggestion_index = Some(index);
            self.mark_dirty();
        }
    }
}
