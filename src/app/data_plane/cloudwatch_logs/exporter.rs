//! Export pipeline: list matching streams, then download each one to its own file
//!
//! Streams are processed one after the other in the order returned by the
//! lister. A listing failure aborts the run before any file or directory is
//! created; the output directory is only created once there is a stream to
//! write.

#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;
use tracing::info;

use crate::app::export_config::ExportConfig;

use super::error::ExportError;
use super::event_fetcher::{download_stream, DownloadStats};
use super::output::{log_file_name, StreamLogFile};
use super::source::LogSource;
use super::stream_lister::list_streams_in_window;

/// Result of downloading one stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamExport {
    pub stream_name: String,
    pub path: PathBuf,
    pub stats: DownloadStats,
}

/// Result of a whole export run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Streams that overlapped the window, in download order
    pub streams_matched: Vec<String>,
    pub files: Vec<StreamExport>,
}

impl ExportSummary {
    pub fn events_written(&self) -> usize {
        self.files.iter().map(|f| f.stats.events_written).sum()
    }

    /// Streams given up after repeated page errors
    pub fn incomplete_streams(&self) -> Vec<&str> {
        self.files
            .iter()
            .filter(|f| !f.stats.completed)
            .map(|f| f.stream_name.as_str())
            .collect()
    }
}

/// Run one export for the configured log group and window
pub async fn run_export<S: LogSource + ?Sized>(
    source: &S,
    config: &ExportConfig,
) -> Result<ExportSummary, ExportError> {
    let window = &config.window;

    let stream_names = list_streams_in_window(source, &config.log_group, window)
        .await
        .map_err(ExportError::ListStreams)?;

    println!(
        "Streams in range from {} till {} are:",
        window.format_start(),
        window.format_end()
    );
    println!("{:?}", stream_names);

    if !stream_names.is_empty() {
        std::fs::create_dir_all(&config.output_dir).map_err(|err| ExportError::Output {
            path: config.output_dir.clone(),
            source: err,
        })?;
    }

    let mut files = Vec::with_capacity(stream_names.len());

    for stream_name in &stream_names {
        let mut file = StreamLogFile::create(&config.output_dir, stream_name, window)
            .map_err(|err| ExportError::Output {
                path: config.output_dir.join(log_file_name(stream_name)),
                source: err,
            })?;
        let path = file.path().to_path_buf();

        println!("\nDownloading logs into file {}", path.display());
        info!("Downloading stream {} into {:?}", stream_name, path);

        let output_error = |err: std::io::Error| ExportError::Output {
            path: path.clone(),
            source: err,
        };

        let stats = download_stream(
            source,
            &config.log_group,
            stream_name,
            window,
            &mut file,
            config.max_consecutive_page_errors,
        )
        .await
        .map_err(output_error)?;
        file.close().map_err(output_error)?;

        files.push(StreamExport {
            stream_name: stream_name.clone(),
            path,
            stats,
        });
    }

    let summary = ExportSummary {
        streams_matched: stream_names,
        files,
    };

    info!(
        "Export of {} finished: {} file(s), {} event(s), {} incomplete stream(s)",
        config.log_group,
        summary.files.len(),
        summary.events_written(),
        summary.incomplete_streams().len()
    );
    Ok(summary)
}
