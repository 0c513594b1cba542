use std::io::{self, BufRead, Write};
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use mindlore_core::{update, AppState, Effect, Msg};
use mindlore_engine::HttpSuggestionClient;
use mindlore_logging::{mindlore_info, LevelFilter};

use super::config::{load_config, AppConfig, CONFIG_FILENAME};
use super::effects::EffectRunner;
use super::ui;
use super::ui::commands::{intent_to_msgs, parse_command, Intent};

/// Everything the main loop reacts to.
pub enum ShellEvent {
    /// A line typed by the user.
    Line(String),
    /// A message produced off the main thread (engine completions).
    Msg(Msg),
    /// Stdin reached end of file.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("resolve working directory")?;
    let config: AppConfig =
        load_config(&cwd)?.with_env_overrides(|key| std::env::var(key).ok());
    mindlore_logging::initialize(config.log_destination.into(), LevelFilter::Info);
    match &config.loaded_from {
        Some(path) => mindlore_info!("Loaded config from {:?}", path),
        None => mindlore_info!("No {} found; using defaults", CONFIG_FILENAME),
    }
    mindlore_info!("Starting MindLore against {}", config.api_base);

    let client = HttpSuggestionClient::new(&config.client_settings())
        .context("build suggestion client")?;
    let (event_tx, event_rx) = mpsc::channel::<ShellEvent>();
    let effects = EffectRunner::new(Arc::new(client), event_tx.clone())
        .context("start suggestion engine")?;
    spawn_stdin_reader(event_tx).context("start input reader")?;

    let mut shell = Shell::new(AppState::new());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "MindLore. Type `help` for commands.")?;
    write!(out, "{}", ui::render::render(&shell.state.view()))?;
    prompt(&mut out)?;

    while let Ok(event) = event_rx.recv() {
        let outcome = match event {
            ShellEvent::Line(line) => shell.handle_line(&line),
            ShellEvent::Msg(msg) => shell.handle_msg(msg),
            ShellEvent::InputClosed => break,
        };
        match outcome {
            Outcome::Quit => break,
            Outcome::Continue { effects: pending, output } => {
                effects.enqueue(pending);
                if let Some(text) = output {
                    write!(out, "{text}")?;
                    prompt(&mut out)?;
                }
            }
        }
    }

    mindlore_info!("MindLore shutting down");
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<ShellEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("mindlore-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if event_tx.send(ShellEvent::Line(line)).is_err() {
                    return;
                }
            }
            let _ = event_tx.send(ShellEvent::InputClosed);
        })?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Quit,
    Continue {
        effects: Vec<Effect>,
        /// Text to print, if anything is worth showing.
        output: Option<String>,
    },
}

/// Owns the store and turns input into messages and render output.
struct Shell {
    state: AppState,
}

impl Shell {
    fn new(state: AppState) -> Self {
        Self { state }
    }

    fn handle_line(&mut self, line: &str) -> Outcome {
        let intent = match parse_command(line) {
            Ok(intent) => intent,
            Err(err) => return notice(err.to_string()),
        };
        let msgs = match intent_to_msgs(&intent, &self.state.view()) {
            Ok(msgs) => msgs,
            Err(err) => return notice(err.to_string()),
        };

        match intent {
            Intent::Quit => return Outcome::Quit,
            Intent::Help => return notice(ui::commands::HELP_TEXT.to_string()),
            _ => {}
        }

        let mut effects = Vec::new();
        for msg in msgs {
            effects.extend(self.dispatch_msg(msg));
        }
        let output = self
            .render_if_dirty()
            .or_else(|| (intent == Intent::Show).then(|| ui::render::render(&self.state.view())));
        Outcome::Continue { effects, output }
    }

    fn handle_msg(&mut self, msg: Msg) -> Outcome {
        let effects = self.dispatch_msg(msg);
        Outcome::Continue {
            effects,
            output: self.render_if_dirty().map(|text| format!("\n{text}")),
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    fn render_if_dirty(&mut self) -> Option<String> {
        self.state
            .consume_dirty()
            .then(|| ui::render::render(&self.state.view()))
    }
}

fn notice(text: String) -> Outcome {
    Outcome::Continue {
        effects: Vec::new(),
        output: Some(format!("{text}\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindlore_core::{SequentialIdGenerator, TopicId};

    fn shell() -> Shell {
        Shell::new(AppState::with_id_generator(SequentialIdGenerator::new("topic")))
    }

    fn output_of(outcome: Outcome) -> String {
        match outcome {
            Outcome::Continue { output, .. } => output.unwrap_or_default(),
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn add_open_and_generate_flow() {
        let mut shell = shell();
        let text = output_of(shell.handle_line("add  Rust lifetimes "));
        assert!(text.contains("> 1. Rust lifetimes\n"));

        let text = output_of(shell.handle_line("open 1"));
        assert!(text.contains("v 1. Rust lifetimes\n"));

        let outcome = shell.handle_line("gen");
        let Outcome::Continue { effects, output } = outcome else {
            panic!("unexpected quit");
        };
        assert_eq!(
            effects,
            vec![Effect::RequestSuggestions {
                topic_id: TopicId::new("topic-1"),
                title: "Rust lifetimes".to_string(),
            }]
        );
        assert!(output.unwrap_or_default().contains("Generating..."));

        // A second request while in flight is swallowed by the store.
        let Outcome::Continue { effects, .. } = shell.handle_line("gen") else {
            panic!("unexpected quit");
        };
        assert!(effects.is_empty());

        let text = output_of(shell.handle_msg(Msg::SuggestionsReceived {
            topic_id: TopicId::new("topic-1"),
            suggestions: vec!["First".to_string(), "Second".to_string()],
        }));
        assert!(text.contains("[1] First"));
        assert!(text.contains("[2] Second"));
    }

    #[test]
    fn errors_are_reported_without_state_change() {
        let mut shell = shell();
        assert_eq!(
            output_of(shell.handle_line("open 4")),
            "There is no topic 4\n"
        );
        assert_eq!(output_of(shell.handle_line("pick 1")), "Open a topic first\n");
        assert!(output_of(shell.handle_line("bogus")).starts_with("Unknown command `bogus`"));
        assert!(!shell.state.view().has_topics());
    }

    #[test]
    fn show_redraws_even_when_clean() {
        let mut shell = shell();
        assert_eq!(output_of(shell.handle_line("show")), "No saved topics\n");
    }

    #[test]
    fn quit_and_help() {
        let mut shell = shell();
        assert_eq!(shell.handle_line("quit"), Outcome::Quit);
        assert!(output_of(shell.handle_line("help")).contains("add <title>"));
    }
}
