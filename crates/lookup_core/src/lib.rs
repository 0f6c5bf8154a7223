//! Lookup core: pure debounced-search state machine and view-model helpers.
mod cache;
mod effect;
mod msg;
mod record;
mod settings;
mod state;
mod update;
mod view_model;

pub use cache::QueryCache;
pub use effect::Effect;
pub use msg::Msg;
pub use record::{filter_records, Record};
pub use settings::PipelineSettings;
pub use state::{Generation, RequestId, SearchState};
pub use update::update;
pub use view_model::SearchViewModel;
