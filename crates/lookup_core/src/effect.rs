use std::time::Duration;

use crate::{Generation, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm the single debounce timer, replacing any pending one.
    ScheduleDebounce {
        generation: Generation,
        delay: Duration,
    },
    /// Disarm the pending debounce timer, if any.
    CancelDebounce,
    /// Issue one remote lookup for `query`.
    Fetch { request_id: RequestId, query: String },
    /// Wait out the retry backoff, then report `Msg::RetryDelayElapsed`.
    ScheduleRetry { attempt: u32, delay: Duration },
}
