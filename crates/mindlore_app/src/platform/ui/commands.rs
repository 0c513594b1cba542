use mindlore_core::{AppViewModel, Msg};
use thiserror::Error;

pub const HELP_TEXT: &str = "\
Commands:
  add <title>   save a new topic
  open <n>      open topic n (opening the open topic closes it)
  close         close the open topic
  gen [n]       generate suggestions for topic n, or the open topic
  pick <n>      show suggestion n of the open topic
  show          redraw the topic list
  help          show this help
  quit          exit";

/// A parsed line of user input. Numbers are 1-based as displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Add(String),
    Open(usize),
    Close,
    Generate(Option<usize>),
    Pick(usize),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs a number")]
    MissingNumber(&'static str),
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    #[error("There is no topic {0}")]
    NoSuchTopic(usize),
    #[error("The open topic has no suggestion {0}")]
    NoSuchSuggestion(usize),
    #[error("Open a topic first")]
    NoOpenTopic,
}

pub fn parse_command(line: &str) -> Result<Intent, CommandError> {
    let line = line.trim_start();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (line, ""),
    };

    match word {
        "add" => Ok(Intent::Add(rest.to_string())),
        "open" => parse_number("open", rest).map(Intent::Open),
        "close" => Ok(Intent::Close),
        "gen" | "generate" => {
            if rest.trim().is_empty() {
                Ok(Intent::Generate(None))
            } else {
                parse_number("gen", rest).map(|n| Intent::Generate(Some(n)))
            }
        }
        "pick" => parse_number("pick", rest).map(Intent::Pick),
        "" | "show" | "list" => Ok(Intent::Show),
        "help" | "?" => Ok(Intent::Help),
        "quit" | "exit" => Ok(Intent::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_number(command: &'static str, raw: &str) -> Result<usize, CommandError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CommandError::MissingNumber(command));
    }
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber(raw.to_string())),
    }
}

/// Translates an intent into store messages using the current view for
/// number-to-id resolution. `Show`, `Help` and `Quit` produce no messages.
pub fn intent_to_msgs(intent: &Intent, view: &AppViewModel) -> Result<Vec<Msg>, CommandError> {
    match intent {
        Intent::Add(title) => Ok(vec![
            Msg::TopicInputChanged(title.clone()),
            Msg::TopicSubmitted,
        ]),
        Intent::Open(n) => {
            let card = view
                .topics
                .get(n - 1)
                .ok_or(CommandError::NoSuchTopic(*n))?;
            Ok(vec![Msg::TopicSelected(Some(card.id.clone()))])
        }
        Intent::Close => Ok(vec![Msg::TopicSelected(None)]),
        Intent::Generate(Some(n)) => {
            let card = view
                .topics
                .get(n - 1)
                .ok_or(CommandError::NoSuchTopic(*n))?;
            Ok(vec![Msg::GenerateSuggestionsClicked {
                topic_id: card.id.clone(),
            }])
        }
        Intent::Generate(None) => {
            let card = view.selected_topic().ok_or(CommandError::NoOpenTopic)?;
            Ok(vec![Msg::GenerateSuggestionsClicked {
                topic_id: card.id.clone(),
            }])
        }
        Intent::Pick(n) => {
            let card = view.selected_topic().ok_or(CommandError::NoOpenTopic)?;
            if *n > card.suggestions.len() {
                return Err(CommandError::NoSuchSuggestion(*n));
            }
            Ok(vec![Msg::SuggestionSelected {
                topic_id: card.id.clone(),
                index: n - 1,
            }])
        }
        Intent::Show | Intent::Help | Intent::Quit => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindlore_core::{update, AppState, SequentialIdGenerator, Topic, TopicId};

    fn view_with_open_topic() -> AppViewModel {
        let state = AppState::with_id_generator(SequentialIdGenerator::new("t")).with_topics(vec![
            Topic::new(TopicId::new("a"), "Alpha"),
            Topic::new(TopicId::new("b"), "Beta"),
        ]);
        let (state, _) = update(state, Msg::TopicSelected(Some(TopicId::new("b"))));
        state.view()
    }

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(
            parse_command("add   Spaced title "),
            Ok(Intent::Add("  Spaced title ".to_string()))
        );
        assert_eq!(parse_command("add"), Ok(Intent::Add(String::new())));
        assert_eq!(parse_command("open 2"), Ok(Intent::Open(2)));
        assert_eq!(parse_command("gen"), Ok(Intent::Generate(None)));
        assert_eq!(parse_command("gen 3"), Ok(Intent::Generate(Some(3))));
        assert_eq!(parse_command("pick 1"), Ok(Intent::Pick(1)));
        assert_eq!(parse_command(""), Ok(Intent::Show));
        assert_eq!(parse_command("quit"), Ok(Intent::Quit));
    }

    #[test]
    fn rejects_bad_numbers_and_unknown_words() {
        assert_eq!(parse_command("open"), Err(CommandError::MissingNumber("open")));
        assert_eq!(
            parse_command("open 0"),
            Err(CommandError::InvalidNumber("0".to_string()))
        );
        assert_eq!(
            parse_command("pick x"),
            Err(CommandError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            parse_command("delete 1"),
            Err(CommandError::Unknown("delete".to_string()))
        );
    }

    #[test]
    fn resolves_numbers_against_rendered_order() {
        let view = view_with_open_topic();
        assert_eq!(
            intent_to_msgs(&Intent::Open(1), &view),
            Ok(vec![Msg::TopicSelected(Some(TopicId::new("a")))])
        );
        assert_eq!(
            intent_to_msgs(&Intent::Generate(None), &view),
            Ok(vec![Msg::GenerateSuggestionsClicked {
                topic_id: TopicId::new("b")
            }])
        );
        assert_eq!(
            intent_to_msgs(&Intent::Open(3), &view),
            Err(CommandError::NoSuchTopic(3))
        );
    }

    #[test]
    fn pick_requires_open_topic_with_suggestion() {
        let view = view_with_open_topic();
        assert_eq!(
            intent_to_msgs(&Intent::Pick(1), &view),
            Err(CommandError::NoSuchSuggestion(1))
        );
        assert_eq!(
            intent_to_msgs(&Intent::Pick(1), &AppViewModel::default()),
            Err(CommandError::NoOpenTopic)
        );
    }

    #[test]
    fn add_feeds_entry_then_submits() {
        assert_eq!(
            intent_to_msgs(&Intent::Add("Idea".to_string()), &AppViewModel::default()),
            Ok(vec![
                Msg::TopicInputChanged("Idea".to_string()),
                Msg::TopicSubmitted
            ])
        );
    }
}
