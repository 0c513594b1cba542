use std::borrow::Cow;
use std::fmt::Write;

use mindlore_core::{parse_suggestion, strip_quotes, AppViewModel, TopicCardView};

/// Renders the whole topic list as plain text. Control characters in titles,
/// messages and suggestion text are escaped so the terminal never acts on them.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if let Some(message) = &view.validation_message {
        let _ = writeln!(out, "! {}", printable(message));
    }
    if let Some(reason) = &view.last_generation_failure {
        let _ = writeln!(out, "! Suggestion request failed: {}", printable(reason));
    }

    if !view.has_topics() {
        out.push_str("No saved topics\n");
        return out;
    }

    for (position, card) in view.topics.iter().enumerate() {
        let marker = if card.is_selected { 'v' } else { '>' };
        let _ = writeln!(out, "{marker} {}. {}", position + 1, printable(&card.title));
        if card.is_selected {
            render_open_card(&mut out, card);
        }
    }
    out
}

fn render_open_card(out: &mut String, card: &TopicCardView) {
    if card.is_generating {
        out.push_str("    Generating...\n");
    } else if card.suggestions.is_empty() {
        out.push_str("    [Generate Suggestions]  (type `gen`)\n");
    }

    for tab in &card.suggestions {
        let selected = if tab.is_selected { "*" } else { " " };
        let _ = writeln!(out, "   {selected}[{}] {}", tab.index + 1, printable(&tab.label));
    }

    let content = card.shown_content.as_deref().unwrap_or_default();
    let showing_suggestion = card.suggestions.iter().any(|tab| tab.is_selected);
    out.push_str("    ----\n");
    if showing_suggestion {
        render_suggestion(out, content);
    } else if content.trim().is_empty() {
        out.push_str("    (no detail)\n");
    } else {
        indent_lines(out, content);
    }
}

fn render_suggestion(out: &mut String, raw: &str) {
    let parsed = parse_suggestion(raw);
    if parsed.is_empty() {
        indent_lines(out, raw);
        return;
    }

    let fields = [
        ("Angle", parsed.angle.as_str()),
        ("Hook", strip_quotes(&parsed.hook)),
        ("Example", parsed.example.as_str()),
        ("Boundary", parsed.boundary.as_str()),
        ("Close", parsed.close.as_str()),
        ("Question", strip_quotes(&parsed.question)),
    ];
    for (label, value) in fields {
        if !value.is_empty() {
            let _ = writeln!(out, "    {label}: {}", printable(value));
        }
    }
}

fn indent_lines(out: &mut String, text: &str) {
    for line in text.lines() {
        let _ = writeln!(out, "    {}", printable(line));
    }
}

/// Escapes control characters other than newline and tab.
fn printable(text: &str) -> Cow<'_, str> {
    let is_unsafe = |c: char| c.is_control() && c != '\n' && c != '\t';
    if !text.chars().any(is_unsafe) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if is_unsafe(c) {
            escaped.extend(c.escape_default());
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}
