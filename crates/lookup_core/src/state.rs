use crate::view_model::SearchViewModel;
use crate::{PipelineSettings, QueryCache, Record};

/// Sequence number of a debounce arming.
pub type Generation = u64;
/// Sequence number of a pipeline evaluation that may commit results.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct InFlight {
    request_id: RequestId,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    settings: PipelineSettings,
    query: String,
    debounced_query: Option<String>,
    results: Vec<Record>,
    error: Option<String>,
    loading: bool,
    retry_count: u32,
    retries_pending: u32,
    cache: QueryCache,
    debounce_generation: Generation,
    debounce_pending: bool,
    latest_request: RequestId,
    in_flight: Option<InFlight>,
    dirty: bool,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PipelineSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> SearchViewModel {
        SearchViewModel {
            query: self.query.clone(),
            debounced_query: self.debounced_query.clone(),
            loading: self.loading,
            error: self.error.clone(),
            results: self.results.clone(),
            cache_size: self.cache.len(),
            retry_count: self.retry_count,
            max_retries: self.settings.max_retries,
            can_retry: self.error.is_some() && self.can_retry(),
            dirty: self.dirty,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn is_debounce_pending(&self) -> bool {
        self.debounce_pending
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while a retry backoff has been scheduled but has not elapsed yet.
    pub fn is_retry_pending(&self) -> bool {
        self.retries_pending > 0
    }

    /// Returns whether observable state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn can_retry(&self) -> bool {
        self.retry_count < self.settings.max_retries
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.dirty = true;
        }
    }

    /// Arms a new debounce generation, superseding any earlier one.
    pub(crate) fn arm_debounce(&mut self) -> Generation {
        self.debounce_generation += 1;
        self.debounce_pending = true;
        self.debounce_generation
    }

    /// Consumes the pending debounce if `generation` is the latest armed one.
    pub(crate) fn fire_debounce(&mut self, generation: Generation) -> bool {
        if self.debounce_pending && generation == self.debounce_generation {
            self.debounce_pending = false;
            true
        } else {
            false
        }
    }

    /// Disarms the pending debounce. Returns whether one was pending.
    pub(crate) fn disarm_debounce(&mut self) -> bool {
        let was_pending = self.debounce_pending;
        if was_pending {
            self.debounce_generation += 1;
            self.debounce_pending = false;
        }
        was_pending
    }

    /// Starts an evaluation of the current query. Any in-flight request becomes stale.
    pub(crate) fn begin_evaluation(&mut self) -> (RequestId, String) {
        self.latest_request += 1;
        self.in_flight = None;
        let query = self.query.clone();
        if self.debounced_query.as_deref() != Some(query.as_str()) {
            self.debounced_query = Some(query.clone());
            self.dirty = true;
        }
        (self.latest_request, query)
    }

    pub(crate) fn show_empty(&mut self) {
        self.results.clear();
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn show_cached(&mut self, results: Vec<Record>) {
        self.results = results;
        self.loading = false;
        self.dirty = true;
    }

    pub(crate) fn start_fetch(&mut self, request_id: RequestId, query: String) {
        self.in_flight = Some(InFlight { request_id, query });
        self.loading = true;
        self.error = None;
        self.dirty = true;
    }

    /// Takes the in-flight query if `request_id` is the latest issued request.
    pub(crate) fn take_in_flight(&mut self, request_id: RequestId) -> Option<String> {
        match &self.in_flight {
            Some(in_flight) if in_flight.request_id == request_id => {
                self.in_flight.take().map(|in_flight| in_flight.query)
            }
            _ => None,
        }
    }

    pub(crate) fn commit_success(&mut self, query: String, results: Vec<Record>) {
        self.cache.insert(query, results.clone());
        self.results = results;
        self.error = None;
        self.loading = false;
        self.retry_count = 0;
        self.dirty = true;
    }

    pub(crate) fn commit_failure(&mut self, message: String) {
        self.results.clear();
        self.error = Some(message);
        self.loading = false;
        self.dirty = true;
    }

    /// Bumps the retry counter and returns the backoff to wait before re-evaluating.
    pub(crate) fn take_retry(&mut self) -> Option<(u32, std::time::Duration)> {
        if !self.can_retry() {
            return None;
        }
        let delay = self.settings.backoff_for(self.retry_count);
        self.retry_count += 1;
        self.retries_pending += 1;
        self.dirty = true;
        Some((self.retry_count, delay))
    }

    pub(crate) fn finish_retry_delay(&mut self) {
        self.retries_pending = self.retries_pending.saturating_sub(1);
    }

    /// Clears everything but the cache and settings; in-flight requests become stale.
    pub(crate) fn reset(&mut self) {
        self.query.clear();
        self.debounced_query = None;
        self.results.clear();
        self.error = None;
        self.loading = false;
        self.retry_count = 0;
        self.latest_request += 1;
        self.in_flight = None;
        self.dirty = true;
    }

    pub(crate) fn clear_cache(&mut self) -> bool {
        if self.cache.is_empty() {
            return false;
        }
        self.cache.clear();
        self.dirty = true;
        true
    }
}
