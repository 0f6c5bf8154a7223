use engine_logging::{engine_debug, engine_info};
use lookup_core::{Effect, Msg};
use lookup_engine::{EngineEvent, EngineHandle};

/// Executes core effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ScheduleDebounce { generation, delay } => {
                    self.engine.schedule_debounce(generation, delay);
                }
                Effect::CancelDebounce => self.engine.cancel_debounce(),
                Effect::Fetch { request_id, query } => {
                    engine_info!(
                        "Fetch request_id={} query_len={} query={:?}",
                        request_id,
                        query.len(),
                        query
                    );
                    self.engine.fetch(request_id, query);
                }
                Effect::ScheduleRetry { attempt, delay } => {
                    engine_info!("Retry attempt={} backoff={:?}", attempt, delay);
                    self.engine.schedule_retry(attempt, delay);
                }
            }
        }
    }

    /// Messages for every engine event received so far.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(to_msg(event));
        }
        inbox
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::DebounceElapsed { generation } => Msg::DebounceElapsed { generation },
        EngineEvent::FetchCompleted {
            request_id,
            query,
            result,
        } => {
            engine_debug!("Completion request_id={} query={:?}", request_id, query);
            Msg::FetchCompleted {
                request_id,
                result: result.map_err(|err| err.message),
            }
        }
        EngineEvent::RetryDelayElapsed { .. } => Msg::RetryDelayElapsed,
    }
}
