use lookup_core::{Record, SearchViewModel};

use crate::platform::preferences::Theme;

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Text frame for the current view model.
pub fn render(view: &SearchViewModel, theme: Theme) -> String {
    let paint = |color: &str, text: String| match theme {
        Theme::Dark => format!("{color}{text}{RESET}"),
        Theme::Light => text,
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "Search: {:?} | Debounced: {:?}",
        view.query,
        view.debounced_query.as_deref().unwrap_or_default()
    ));

    if view.loading {
        lines.push(paint(YELLOW, "Loading...".to_string()));
    } else {
        if let Some(error) = &view.error {
            let mut text = format!("Error: {error}");
            if view.can_retry {
                text.push_str(&format!(
                    "  [:retry ({}/{})]",
                    view.retry_count, view.max_retries
                ));
            }
            lines.push(paint(RED, text));
        }
        // A cache hit after a failure shows both the stale error and the results.
        if view.error.is_none() || !view.results.is_empty() {
            lines.push(format!("Results ({})", view.results.len()));
            lines.extend(view.results.iter().map(|record| format!("  - {}", describe(record))));
        }
    }

    lines.push(paint(
        DIM,
        format!(
            "Cache: {} entries | Retry: {}/{} | Connection: {}",
            view.cache_size,
            view.retry_count,
            view.max_retries,
            if view.error.is_some() { "Error" } else { "Connected" }
        ),
    ));

    lines.join("\n")
}

/// One-line summary: id plus the first human-readable field.
fn describe(record: &Record) -> String {
    let label = ["title", "name", "email"]
        .iter()
        .find_map(|key| record.get_str(key))
        .map(str::to_string)
        .unwrap_or_else(|| serde_json::Value::Object(record.fields().clone()).to_string());
    match record.id() {
        Some(id) => format!("#{id} {label}"),
        None => label,
    }
}
