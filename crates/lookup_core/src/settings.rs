use std::time::Duration;

/// Tunables of the lookup pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    /// Quiescence window measured from the last query change.
    pub debounce: Duration,
    /// Manual retries allowed before a successful lookup resets the counter.
    pub max_retries: u32,
    /// Backoff per retry already taken; the first retry waits zero.
    pub backoff_unit: Duration,
    /// Record fields matched against the query. Empty means every string field.
    pub searchable_fields: Vec<String>,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            max_retries: 3,
            backoff_unit: Duration::from_millis(1000),
            searchable_fields: Vec::new(),
        }
    }
}

impl PipelineSettings {
    /// Backoff before the retry taken when `retries_so_far` retries already happened.
    pub fn backoff_for(&self, retries_so_far: u32) -> Duration {
        self.backoff_unit.saturating_mul(retries_so_far)
    }
}
