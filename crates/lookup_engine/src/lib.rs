//! Lookup engine: IO side of the search pipeline (HTTP, timers, preferences).
mod engine;
mod fetch;
mod prefs;
mod types;

pub use engine::EngineHandle;
pub use fetch::{FetchSettings, ReqwestSource, SearchSource};
pub use prefs::{FilePreferenceStore, MemoryPreferenceStore, PersistError, PreferenceStore};
pub use types::{EngineEvent, FailureKind, FetchError};
