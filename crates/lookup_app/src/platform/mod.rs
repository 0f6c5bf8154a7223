//! Terminal front end: input, effect execution, rendering.
mod app;
mod config;
mod effects;
mod input;
mod preferences;
mod ui;

pub use app::run_app;
