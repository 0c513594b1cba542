use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use mindlore_logging::{mindlore_info, mindlore_warn};

use crate::client::SuggestionClient;
use crate::{EngineEvent, RequestKey};

enum EngineCommand {
    Generate { key: RequestKey, topic: String },
}

/// Runs suggestion requests on a background tokio runtime and reports
/// completions as [`EngineEvent`]s.
///
/// Requests run concurrently; the engine does not deduplicate them.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn SuggestionClient>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("mindlore-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(client.as_ref(), command, event_tx).await;
                    });
                }
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        })
    }

    pub fn request_suggestions(&self, key: impl Into<RequestKey>, topic: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Generate {
            key: key.into(),
            topic: topic.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn SuggestionClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Generate { key, topic } => {
            mindlore_info!("Generating suggestions key={}", key);
            let result = client.generate(&topic).await;
            match &result {
                Ok(suggestions) => {
                    mindlore_info!("Received {} suggestions key={}", suggestions.len(), key)
                }
                Err(err) => mindlore_warn!("Suggestions failed key={}: {}", key, err),
            }
            let _ = event_tx.send(EngineEvent::SuggestionsCompleted { key, result });
        }
    }
}
