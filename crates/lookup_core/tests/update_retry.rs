use std::sync::Once;
use std::time::Duration;

use lookup_core::{update, Effect, Msg, PipelineSettings, Record, SearchState};
use serde_json::json;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn failed_search(state: SearchState, query: &str) -> SearchState {
    let (state, effects) = update(state, Msg::QueryChanged(query.to_string()));
    let Some(Effect::ScheduleDebounce { generation, .. }) = effects.first().cloned() else {
        panic!("expected debounce effect");
    };
    let (state, effects) = update(state, Msg::DebounceElapsed { generation });
    let request_id = fetch_id(&effects).expect("fetch effect");
    fail(state, request_id)
}

fn fail(state: SearchState, request_id: u64) -> SearchState {
    update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Err("HTTP 500: Internal Server Error".to_string()),
        },
    )
    .0
}

fn fetch_id(effects: &[Effect]) -> Option<u64> {
    effects.iter().find_map(|effect| match effect {
        Effect::Fetch { request_id, .. } => Some(*request_id),
        _ => None,
    })
}

#[test]
fn first_retry_has_zero_backoff_and_reissues_request() {
    init_logging();
    let state = failed_search(SearchState::new(), "x");

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(
        effects,
        vec![Effect::ScheduleRetry {
            attempt: 1,
            delay: Duration::ZERO,
        }]
    );
    assert_eq!(state.view().retry_count, 1);

    let (state, effects) = update(state, Msg::RetryDelayElapsed);
    assert!(fetch_id(&effects).is_some());
    assert!(state.view().loading);
    assert_eq!(state.view().error, None);
}

#[test]
fn backoff_grows_linearly_with_prior_retries() {
    init_logging();
    let mut state = failed_search(SearchState::new(), "x");
    let mut delays = Vec::new();

    for _ in 0..3 {
        let (next, effects) = update(state, Msg::RetryClicked);
        for effect in &effects {
            if let Effect::ScheduleRetry { delay, .. } = effect {
                delays.push(*delay);
            }
        }
        let (next, effects) = update(next, Msg::RetryDelayElapsed);
        state = fail(next, fetch_id(&effects).expect("fetch effect"));
    }

    assert_eq!(
        delays,
        vec![
            Duration::ZERO,
            Duration::from_millis(1000),
            Duration::from_millis(2000),
        ]
    );
    assert_eq!(state.view().retry_count, 3);
    assert!(!state.view().can_retry);
}

#[test]
fn retries_beyond_budget_are_noops() {
    init_logging();
    let mut state = failed_search(SearchState::new(), "x");
    for _ in 0..3 {
        state = update(state, Msg::RetryClicked).0;
    }
    assert_eq!(state.retry_count(), 3);

    for _ in 0..5 {
        let (next, effects) = update(state, Msg::RetryClicked);
        assert!(effects.is_empty());
        assert_eq!(next.retry_count(), 3);
        state = next;
    }
}

#[test]
fn success_resets_retry_counter() {
    init_logging();
    let state = failed_search(SearchState::new(), "ann");
    let (state, _) = update(state, Msg::RetryClicked);
    let (state, _) = update(state, Msg::RetryClicked);
    assert_eq!(state.retry_count(), 2);

    let (state, effects) = update(state, Msg::RetryDelayElapsed);
    let request_id = fetch_id(&effects).expect("fetch effect");
    let records: Vec<Record> = serde_json::from_value(json!([{"name": "Ann"}])).unwrap();
    let (state, _) = update(
        state,
        Msg::FetchCompleted {
            request_id,
            result: Ok(records),
        },
    );

    let view = state.view();
    assert_eq!(view.retry_count, 0);
    assert_eq!(view.error, None);
    assert_eq!(view.results.len(), 1);
    assert!(!view.can_retry);
}

#[test]
fn custom_budget_and_unit_are_honoured() {
    init_logging();
    let settings = PipelineSettings {
        max_retries: 1,
        backoff_unit: Duration::from_millis(250),
        ..PipelineSettings::default()
    };
    let state = failed_search(SearchState::with_settings(settings), "x");

    let (state, effects) = update(state, Msg::RetryClicked);
    assert_eq!(effects.len(), 1);
    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().max_retries, 1);
}

#[test]
fn retry_stays_pending_until_every_delay_elapses() {
    init_logging();
    let state = failed_search(SearchState::new(), "x");
    assert!(!state.is_retry_pending());

    let (state, _) = update(state, Msg::RetryClicked);
    let (state, _) = update(state, Msg::RetryClicked);
    assert!(state.is_retry_pending());

    let (state, effects) = update(state, Msg::RetryDelayElapsed);
    assert!(fetch_id(&effects).is_some());
    assert!(state.is_retry_pending());
    assert!(state.is_loading());

    let (state, _) = update(state, Msg::RetryDelayElapsed);
    assert!(!state.is_retry_pending());
}

#[test]
fn exhausted_budget_schedules_nothing_pending() {
    init_logging();
    let mut state = failed_search(SearchState::new(), "x");
    for _ in 0..3 {
        state = update(state, Msg::RetryClicked).0;
        state = update(state, Msg::RetryDelayElapsed).0;
    }
    let (state, effects) = update(state, Msg::RetryClicked);
    assert!(effects.is_empty());
    assert!(!state.is_retry_pending());
}
