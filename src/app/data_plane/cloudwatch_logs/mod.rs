//! CloudWatch Logs Export Module
//!
//! Downloads the events of a log group within a time window, one file per
//! log stream.
//!
//! ## Pipeline
//!
//! ```text
//! TimeWindow ──> stream_lister ──> stream names ──> event_fetcher ──> output
//!                 (DescribeLogStreams)               (GetLogEvents, paginated)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use awslogs_downloader::app::data_plane::cloudwatch_logs::{run_export, CloudWatchLogsClient};
//! use awslogs_downloader::app::export_config::ExportConfig;
//! # async fn example(config: ExportConfig) -> anyhow::Result<()> {
//! let client =
//!     CloudWatchLogsClient::from_profile(&config.profile, &config.region, config.timeout).await;
//! let summary = run_export(&client, &config).await?;
//!
//! for file in &summary.files {
//!     println!("{}: {} events", file.path.display(), file.stats.events_written);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(clippy::all, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod event_fetcher;
pub mod exporter;
pub mod output;
pub mod source;
pub mod stream_lister;
pub mod types;
pub mod window;

// Re-export commonly used types
pub use client::CloudWatchLogsClient;
pub use error::{ExportError, SourceError, WindowError};
pub use event_fetcher::{download_stream, DownloadStats, DEFAULT_MAX_CONSECUTIVE_PAGE_ERRORS};
pub use exporter::{run_export, ExportSummary, StreamExport};
pub use output::{file_header, log_file_name, StreamLogFile};
pub use source::LogSource;
pub use stream_lister::{is_stream_in_window, list_streams_in_window};
pub use types::{EventPage, GetEventsRequest, LogEvent, LogStreamDescriptor};
pub use window::{TimeWindow, DEFAULT_INTERVAL_MINUTES, TIME_FORMAT};
