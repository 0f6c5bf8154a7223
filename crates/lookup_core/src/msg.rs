use crate::{Generation, Record, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search input (raw, not yet debounced).
    QueryChanged(String),
    /// The debounce timer armed for `generation` fired.
    DebounceElapsed { generation: Generation },
    /// A remote lookup finished. Errors carry the user-facing message.
    FetchCompleted {
        request_id: RequestId,
        result: Result<Vec<Record>, String>,
    },
    /// User clicked Retry.
    RetryClicked,
    /// The retry backoff delay has passed.
    RetryDelayElapsed,
    /// Look the current query up again, ignoring any cached result set.
    /// Leaves the retry counter alone.
    Refetch,
    /// Drop the pending debounced evaluation without touching results.
    CancelPending,
    /// Return the pipeline to its initial state, keeping the cache.
    Reset,
    /// Forget every cached result set.
    ClearCache,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
