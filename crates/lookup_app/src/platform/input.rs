use lookup_core::Msg;

use super::preferences::Theme;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the pipeline.
    Dispatch(Msg),
    SetTheme(Theme),
    Help,
    Quit,
    /// Unrecognised `:command`, with a message for the user.
    Invalid(String),
}

pub const HELP: &str = "\
Type to search. Every line replaces the query.
  :retry             retry the failed lookup
  :refetch           look the current query up again, skipping the cache
  :cancel            drop the pending (debounced) lookup
  :reset             clear query, results and error (cache is kept)
  :clear-cache       forget cached results
  :theme light|dark  switch and remember the theme
  :help              show this text
  :quit              exit";

/// Lines starting with `:` are commands; anything else is the new query.
pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return Command::Dispatch(Msg::QueryChanged(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("retry"), None) => Command::Dispatch(Msg::RetryClicked),
        (Some("refetch"), None) => Command::Dispatch(Msg::Refetch),
        (Some("cancel"), None) => Command::Dispatch(Msg::CancelPending),
        (Some("reset"), None) => Command::Dispatch(Msg::Reset),
        (Some("clear-cache"), None) => Command::Dispatch(Msg::ClearCache),
        (Some("theme"), Some(name)) => match name.parse() {
            Ok(theme) => Command::SetTheme(theme),
            Err(err) => Command::Invalid(err),
        },
        (Some("help"), None) => Command::Help,
        (Some("quit" | "q"), None) => Command::Quit,
        _ => Command::Invalid(format!("unknown command {line:?}, try :help")),
    }
}
