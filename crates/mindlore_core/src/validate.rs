use thiserror::Error;

use crate::Topic;

/// Longest accepted topic title, counted in characters after trimming.
pub const MAX_TITLE_CHARS: usize = 120;

/// Why a proposed topic title was rejected.
///
/// The `Display` text is the message shown next to the topic entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Topic can not be blank")]
    Blank,
    #[error("Topic must be 120 characters or fewer")]
    TooLong,
    #[error("Topic already exists")]
    Duplicate,
}

/// Checks a proposed title against the existing topics and returns it trimmed.
///
/// Rules run in order (blank, length, duplicate) and the first failure wins.
pub fn validate_title(proposed: &str, existing: &[Topic]) -> Result<String, ValidationError> {
    let trimmed = proposed.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Blank);
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(ValidationError::TooLong);
    }

    let normalized = normalize_title(trimmed);
    if existing
        .iter()
        .any(|topic| normalize_title(&topic.title) == normalized)
    {
        return Err(ValidationError::Duplicate);
    }

    Ok(trimmed.to_owned())
}

/// Case-insensitive comparison key for titles.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}
