use std::fmt;
use std::str::FromStr;

use engine_logging::engine_warn;
use lookup_engine::PreferenceStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Stored theme, or the default when absent or unrecognised.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        match store.get(THEME_KEY) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                engine_warn!("Ignoring unknown stored theme {:?}", raw);
                Theme::default()
            }),
            None => Theme::default(),
        }
    }

    /// Persist the theme; failures are logged and the in-memory choice still applies.
    pub fn store(self, store: &mut dyn PreferenceStore) {
        if let Err(err) = store.set(THEME_KEY, self.as_str()) {
            engine_warn!("Failed to persist theme {}: {}", self, err);
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme {other:?}")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_engine::MemoryPreferenceStore;

    #[test]
    fn theme_survives_store_round_trip() {
        let mut store = MemoryPreferenceStore::new();
        assert_eq!(Theme::load(&store), Theme::Light);

        Theme::Dark.store(&mut store);
        assert_eq!(Theme::load(&store), Theme::Dark);
    }

    #[test]
    fn unknown_stored_theme_falls_back() {
        let mut store = MemoryPreferenceStore::new();
        store.set(THEME_KEY, "sepia").unwrap();
        assert_eq!(Theme::load(&store), Theme::Light);
    }
}
