use crate::{filter_records, Effect, Msg, SearchState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SearchState, msg: Msg) -> (SearchState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged(query) => {
            state.set_query(query);
            let generation = state.arm_debounce();
            vec![Effect::ScheduleDebounce {
                generation,
                delay: state.settings().debounce,
            }]
        }
        Msg::DebounceElapsed { generation } => {
            if state.fire_debounce(generation) {
                evaluate(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::FetchCompleted { request_id, result } => {
            // Completions of superseded requests never reach the result set.
            let Some(query) = state.take_in_flight(request_id) else {
                return (state, Vec::new());
            };
            match result {
                Ok(records) => {
                    let filtered =
                        filter_records(records, &query, &state.settings().searchable_fields);
                    state.commit_success(query, filtered);
                }
                Err(message) => state.commit_failure(message),
            }
            Vec::new()
        }
        Msg::RetryClicked => match state.take_retry() {
            Some((attempt, delay)) => vec![Effect::ScheduleRetry { attempt, delay }],
            None => Vec::new(),
        },
        Msg::RetryDelayElapsed => {
            state.finish_retry_delay();
            evaluate(&mut state)
        }
        Msg::Refetch => refetch(&mut state),
        Msg::CancelPending => {
            if state.disarm_debounce() {
                vec![Effect::CancelDebounce]
            } else {
                Vec::new()
            }
        }
        Msg::Reset => {
            let was_pending = state.disarm_debounce();
            state.reset();
            if was_pending {
                vec![Effect::CancelDebounce]
            } else {
                Vec::new()
            }
        }
        Msg::ClearCache => {
            state.clear_cache();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Runs one pipeline evaluation of the current query: empty, cached, or fetched.
fn evaluate(state: &mut SearchState) -> Vec<Effect> {
    let (request_id, query) = state.begin_evaluation();

    if query.trim().is_empty() {
        state.show_empty();
        return Vec::new();
    }

    if let Some(cached) = state.cache().get(&query) {
        let cached = cached.to_vec();
        state.show_cached(cached);
        return Vec::new();
    }

    state.start_fetch(request_id, query.clone());
    vec![Effect::Fetch { request_id, query }]
}

/// Re-issues the current query over the network, bypassing the cache.
fn refetch(state: &mut SearchState) -> Vec<Effect> {
    let (request_id, query) = state.begin_evaluation();

    if query.trim().is_empty() {
        state.show_empty();
        return Vec::new();
    }

    state.start_fetch(request_id, query.clone());
    vec![Effect::Fetch { request_id, query }]
}
