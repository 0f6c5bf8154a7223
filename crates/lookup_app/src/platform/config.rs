use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use engine_logging::LogDestination;
use log::LevelFilter;
use lookup_core::PipelineSettings;
use lookup_engine::FetchSettings;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Debounced lookup against a JSON listing endpoint.
#[derive(Debug, Default, Parser)]
#[command(name = "lookup", version, about)]
pub struct Cli {
    /// RON configuration file.
    #[arg(short, long, env = "LOOKUP_CONFIG")]
    pub config: Option<PathBuf>,
    /// Listing endpoint queried as `<base>?q=<term>`.
    #[arg(long)]
    pub base_url: Option<String>,
    /// Quiescence window in milliseconds.
    #[arg(long)]
    pub debounce_ms: Option<u64>,
    /// Record field matched against the query (repeatable).
    #[arg(long = "field")]
    pub fields: Vec<String>,
    /// Manual retries allowed after a failure.
    #[arg(long)]
    pub max_retries: Option<u32>,
    /// Log file path.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
    /// Log level (off, error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    #[default]
    File,
    Terminal,
    Both,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub query_param: String,
    pub searchable_fields: Vec<String>,
    pub debounce_ms: u64,
    pub max_retries: u32,
    pub backoff_unit_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_bytes: u64,
    pub preferences_path: PathBuf,
    pub log_target: LogTarget,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let pipeline = PipelineSettings::default();
        let fetch = FetchSettings::default();
        Self {
            base_url: fetch.base_url,
            query_param: fetch.query_param,
            searchable_fields: vec!["name".to_string(), "email".to_string()],
            debounce_ms: pipeline.debounce.as_millis() as u64,
            max_retries: pipeline.max_retries,
            backoff_unit_ms: pipeline.backoff_unit.as_millis() as u64,
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            max_bytes: fetch.max_bytes,
            preferences_path: PathBuf::from("./.lookup_prefs.ron"),
            log_target: LogTarget::File,
            log_file: PathBuf::from("./lookup.log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults, then the config file (if any), then command-line overrides.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.level_filter()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_cli(&mut self, cli: &Cli) {
        if let Some(base_url) = &cli.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(debounce_ms) = cli.debounce_ms {
            self.debounce_ms = debounce_ms;
        }
        if !cli.fields.is_empty() {
            self.searchable_fields = cli.fields.clone();
        }
        if let Some(max_retries) = cli.max_retries {
            self.max_retries = max_retries;
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = log_file.clone();
        }
        if let Some(level) = &cli.log_level {
            self.log_level = level.clone();
        }
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn log_destination(&self) -> LogDestination {
        match self.log_target {
            LogTarget::File => LogDestination::File(self.log_file.clone()),
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both(self.log_file.clone()),
            LogTarget::Off => LogDestination::Off,
        }
    }

    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            max_retries: self.max_retries,
            backoff_unit: Duration::from_millis(self.backoff_unit_ms),
            searchable_fields: self.searchable_fields.clone(),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            query_param: self.query_param.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_bytes,
        }
    }
}
