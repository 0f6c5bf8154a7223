use crate::Record;

/// Read-only projection of the pipeline for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchViewModel {
    pub query: String,
    pub debounced_query: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub results: Vec<Record>,
    pub cache_size: usize,
    pub retry_count: u32,
    pub max_retries: u32,
    /// True when an error is shown and the retry budget is not exhausted.
    pub can_retry: bool,
    pub dirty: bool,
}
