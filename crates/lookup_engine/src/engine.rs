use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_trace, engine_warn};
use lookup_core::{Generation, RequestId};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, SearchSource};

enum EngineCommand {
    ScheduleDebounce {
        generation: Generation,
        delay: Duration,
    },
    CancelDebounce,
    Fetch {
        request_id: RequestId,
        query: String,
    },
    ScheduleRetry {
        attempt: u32,
        delay: Duration,
    },
}

/// Runs timers and lookups on a background tokio runtime and reports back as events.
///
/// Only one debounce timer is ever pending; arming a new one cancels the old.
/// Lookups are never cancelled once issued.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(source: Arc<dyn SearchSource>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("lookup-engine")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::Builder::new()
            .name("lookup-engine-commands".to_string())
            .spawn(move || run_commands(runtime, source, cmd_rx, event_tx))?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn schedule_debounce(&self, generation: Generation, delay: Duration) {
        self.send(EngineCommand::ScheduleDebounce { generation, delay });
    }

    pub fn cancel_debounce(&self) {
        self.send(EngineCommand::CancelDebounce);
    }

    pub fn fetch(&self, request_id: RequestId, query: impl Into<String>) {
        self.send(EngineCommand::Fetch {
            request_id,
            query: query.into(),
        });
    }

    pub fn schedule_retry(&self, attempt: u32, delay: Duration) {
        self.send(EngineCommand::ScheduleRetry { attempt, delay });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("Engine command loop has stopped; command dropped");
        }
    }
}

fn run_commands(
    runtime: Runtime,
    source: Arc<dyn SearchSource>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let mut debounce: Option<CancellationToken> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::ScheduleDebounce { generation, delay } => {
                if let Some(previous) = debounce.take() {
                    previous.cancel();
                }
                let token = CancellationToken::new();
                debounce = Some(token.clone());
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let elapsed = token
                        .run_until_cancelled(tokio::time::sleep(delay))
                        .await
                        .is_some();
                    if elapsed {
                        engine_trace!("Debounce generation {} elapsed", generation);
                        let _ = event_tx.send(EngineEvent::DebounceElapsed { generation });
                    }
                });
            }
            EngineCommand::CancelDebounce => {
                if let Some(previous) = debounce.take() {
                    previous.cancel();
                }
            }
            EngineCommand::Fetch { request_id, query } => {
                let source = source.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let result = source.search(&query).await;
                    match &result {
                        Ok(records) => engine_info!(
                            "Request {} for {:?} returned {} records",
                            request_id,
                            query,
                            records.len()
                        ),
                        Err(err) => engine_warn!(
                            "Request {} for {:?} failed ({}): {}",
                            request_id,
                            query,
                            err.kind,
                            err.message
                        ),
                    }
                    let _ = event_tx.send(EngineEvent::FetchCompleted {
                        request_id,
                        query,
                        result,
                    });
                });
            }
            EngineCommand::ScheduleRetry { attempt, delay } => {
                engine_debug!("Retry {} scheduled in {:?}", attempt, delay);
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = event_tx.send(EngineEvent::RetryDelayElapsed { attempt });
                });
            }
        }
    }

    if let Some(pending) = debounce {
        pending.cancel();
    }
    runtime.shutdown_background();
}
