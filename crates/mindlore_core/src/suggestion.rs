//! Structured field extraction for generated suggestion text.
//!
//! Upstream suggestions arrive as loosely formatted markdown:
//! ```text
//! ### Outline A: The Tactical Approach
//!
//! * **Hook:** Open with the mistake everyone makes
//! * **Example:** A team that shipped on Friday
//! ```
//! Extraction is plain text only; nothing in the input is interpreted.

use std::sync::LazyLock;

use regex::Regex;

/// Fields pulled out of one suggestion. Missing fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredSuggestion {
    pub angle: String,
    pub hook: String,
    pub example: String,
    pub boundary: String,
    pub close: String,
    pub question: String,
}

impl StructuredSuggestion {
    /// True when neither the outline header nor any labelled field was found.
    pub fn is_empty(&self) -> bool {
        self.angle.is_empty()
            && self.hook.is_empty()
            && self.example.is_empty()
            && self.boundary.is_empty()
            && self.close.is_empty()
            && self.question.is_empty()
    }
}

static ANGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"### Outline [A-Z]:[ \t]*([^\r\n]*)").expect("angle pattern compiles")
});

static HOOK_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("Hook"));
static EXAMPLE_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("Example"));
static BOUNDARY_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("Boundary"));
static CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("Close"));
static QUESTION_RE: LazyLock<Regex> = LazyLock::new(|| field_regex("Question"));

fn field_regex(label: &str) -> Regex {
    let pattern = format!(r"\*\*{}:\*\*[ \t]*([^\r\n]*)", regex::escape(label));
    Regex::new(&pattern).expect("field pattern compiles")
}

/// Parses one raw suggestion. Never fails.
pub fn parse_suggestion(raw: &str) -> StructuredSuggestion {
    StructuredSuggestion {
        angle: first_capture(&ANGLE_RE, raw),
        hook: first_capture(&HOOK_RE, raw),
        example: first_capture(&EXAMPLE_RE, raw),
        boundary: first_capture(&BOUNDARY_RE, raw),
        close: first_capture(&CLOSE_RE, raw),
        question: first_capture(&QUESTION_RE, raw),
    }
}

fn first_capture(re: &Regex, raw: &str) -> String {
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .unwrap_or_default()
}

const QUOTES: [char; 4] = ['\u{201C}', '\u{201D}', '"', '\''];

/// Removes leading and trailing runs of straight or curly quotes.
pub fn strip_quotes(value: &str) -> &str {
    value
        .trim_start_matches(|c: char| QUOTES.contains(&c))
        .trim_end_matches(|c: char| QUOTES.contains(&c))
}

/// Tab label for a suggestion: its first line, or "Suggestion N" (1-based)
/// when that line is blank.
pub fn suggestion_label(text: &str, index: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        format!("Suggestion {}", index + 1)
    } else {
        first_line.to_owned()
    }
}
