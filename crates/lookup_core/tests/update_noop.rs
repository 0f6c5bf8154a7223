use lookup_core::{update, Msg, SearchState};

#[test]
fn update_is_noop() {
    let state = SearchState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn tick_leaves_state_clean() {
    let mut state = SearchState::new();
    let (mut next, effects) = update(state.clone(), Msg::Tick);

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert!(!state.consume_dirty());
}
