//! Export configuration
//!
//! All settings of a run are resolved once at startup into an
//! [`ExportConfig`], which is then passed to every stage of the pipeline.
//!
//! Values come from, in order of precedence:
//!
//! 1. command line flags
//! 2. an optional defaults file `awslogs-downloader.json`
//! 3. built-in defaults
//!
//! # awslogs-downloader.json Format
//!
//! ```json
//! {
//!   "profile": "sandbox",
//!   "region": "eu-central-1",
//!   "interval_minutes": 60,
//!   "output_dir": "logs",
//!   "timeout_secs": 120,
//!   "max_consecutive_page_errors": 5
//! }
//! ```
//!
//! Every key is optional.

#![warn(clippy::all, rust_2018_idioms)]

use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::app::cli::Cli;
use crate::app::data_plane::cloudwatch_logs::error::WindowError;
use crate::app::data_plane::cloudwatch_logs::event_fetcher::DEFAULT_MAX_CONSECUTIVE_PAGE_ERRORS;
use crate::app::data_plane::cloudwatch_logs::window::{TimeWindow, DEFAULT_INTERVAL_MINUTES};

/// File name searched for in the current directory and the user config directory
pub const DEFAULTS_FILE_NAME: &str = "awslogs-downloader.json";

pub const DEFAULT_PROFILE: &str = "dev";
pub const DEFAULT_REGION: &str = "eu-central-1";

/// Defaults loaded from awslogs-downloader.json
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsFile {
    pub profile: Option<String>,
    pub region: Option<String>,
    pub interval_minutes: Option<i64>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub max_consecutive_page_errors: Option<u32>,
}

impl DefaultsFile {
    /// Find and load the defaults file
    ///
    /// An explicit path wins. Otherwise the current directory is searched,
    /// then the platform config directory. Returns None if no usable file is found.
    pub fn discover(explicit_path: Option<&Path>) -> Option<Self> {
        if let Some(path) = explicit_path {
            if !path.exists() {
                warn!("Defaults file {:?} does not exist, using built-in defaults", path);
                return None;
            }
            return Self::load_from_path(path);
        }

        let mut candidates = vec![PathBuf::from(DEFAULTS_FILE_NAME)];
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "", "awslogs-downloader") {
            candidates.push(proj_dirs.config_dir().join(DEFAULTS_FILE_NAME));
        }

        candidates
            .into_iter()
            .find(|path| path.exists())
            .and_then(Self::load_from_path)
    }

    /// Load defaults from a specific path
    ///
    /// Returns None if the file doesn't exist or is invalid.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No defaults file found at {:?}", path);
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<DefaultsFile>(&contents) {
                Ok(defaults) => {
                    debug!("Loaded defaults from {:?}: {:?}", path, defaults);
                    Some(defaults)
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }
}

/// Resolved settings of one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub log_group: String,
    pub window: TimeWindow,
    pub profile: String,
    pub region: String,
    pub output_dir: PathBuf,
    /// Per-call timeout for AWS requests, None waits indefinitely
    pub timeout: Option<Duration>,
    pub max_consecutive_page_errors: u32,
}

impl ExportConfig {
    /// Config with built-in defaults for everything but the group and window
    pub fn new(log_group: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            log_group: log_group.into(),
            window,
            profile: DEFAULT_PROFILE.to_string(),
            region: DEFAULT_REGION.to_string(),
            output_dir: PathBuf::from("."),
            timeout: None,
            max_consecutive_page_errors: DEFAULT_MAX_CONSECUTIVE_PAGE_ERRORS,
        }
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_max_consecutive_page_errors(mut self, max: u32) -> Self {
        self.max_consecutive_page_errors = max;
        self
    }

    /// Build the config from parsed flags and optional defaults
    pub fn from_cli(cli: &Cli, defaults: Option<&DefaultsFile>) -> Result<Self, WindowError> {
        Self::from_cli_at(cli, defaults, Utc::now())
    }

    /// Same as [`ExportConfig::from_cli`] with an explicit "now"
    ///
    /// Fails if the end time cannot be parsed or the interval is not
    /// strictly positive.
    pub fn from_cli_at(
        cli: &Cli,
        defaults: Option<&DefaultsFile>,
        now: DateTime<Utc>,
    ) -> Result<Self, WindowError> {
        let fallback = DefaultsFile::default();
        let defaults = defaults.unwrap_or(&fallback);

        let interval_minutes = cli
            .interval
            .or(defaults.interval_minutes)
            .unwrap_or(DEFAULT_INTERVAL_MINUTES);

        let window = TimeWindow::resolve_at(cli.end_time.as_deref(), interval_minutes, now)?;
        window.validate()?;

        Ok(Self {
            log_group: cli.log_group.clone(),
            window,
            profile: cli
                .profile
                .clone()
                .or_else(|| defaults.profile.clone())
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            region: cli
                .region
                .clone()
                .or_else(|| defaults.region.clone())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            output_dir: cli
                .output_dir
                .clone()
                .or_else(|| defaults.output_dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            timeout: cli
                .timeout_secs
                .or(defaults.timeout_secs)
                .map(Duration::from_secs),
            max_consecutive_page_errors: defaults
                .max_consecutive_page_errors
                .unwrap_or(DEFAULT_MAX_CONSECUTIVE_PAGE_ERRORS),
        })
    }
}
