use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use mindlore_core::{Effect, Msg, TopicId};
use mindlore_engine::{EngineEvent, EngineHandle, SuggestionClient};
use mindlore_logging::mindlore_info;

use super::app::ShellEvent;

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(
        client: Arc<dyn SuggestionClient>,
        event_tx: mpsc::Sender<ShellEvent>,
    ) -> io::Result<Self> {
        let engine = Arc::new(EngineHandle::new(client)?);
        let runner = Self { engine };
        runner.spawn_event_loop(event_tx)?;
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RequestSuggestions { topic_id, title } => {
                    mindlore_info!(
                        "RequestSuggestions topic_id={} title_len={}",
                        topic_id,
                        title.len()
                    );
                    self.engine.request_suggestions(topic_id.as_str(), title);
                }
            }
        }
    }

    fn spawn_event_loop(&self, event_tx: mpsc::Sender<ShellEvent>) -> io::Result<()> {
        let engine = self.engine.clone();
        thread::Builder::new()
            .name("mindlore-effects".to_string())
            .spawn(move || loop {
                let Some(event) = engine.recv_timeout(Duration::from_millis(50)) else {
                    continue;
                };
                if event_tx.send(ShellEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            })?;
        Ok(())
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SuggestionsCompleted { key, result } => {
            let topic_id = TopicId::new(key);
            match result {
                Ok(suggestions) => Msg::SuggestionsReceived {
                    topic_id,
                    suggestions,
                },
                Err(err) => Msg::SuggestionsFailed {
                    topic_id,
                    reason: err.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindlore_engine::{FailureKind, GenerationError};

    #[test]
    fn completions_map_back_to_topic_messages() {
        let ok = map_event(EngineEvent::SuggestionsCompleted {
            key: "topic-1".to_string(),
            result: Ok(vec!["A".to_string()]),
        });
        assert_eq!(
            ok,
            Msg::SuggestionsReceived {
                topic_id: TopicId::new("topic-1"),
                suggestions: vec!["A".to_string()],
            }
        );

        let failed = map_event(EngineEvent::SuggestionsCompleted {
            key: "topic-2".to_string(),
            result: Err(GenerationError {
                kind: FailureKind::HttpStatus(503),
                message: "503 Service Unavailable".to_string(),
            }),
        });
        assert_eq!(
            failed,
            Msg::SuggestionsFailed {
                topic_id: TopicId::new("topic-2"),
                reason: "http status 503: 503 Service Unavailable".to_string(),
            }
        );
    }
}
