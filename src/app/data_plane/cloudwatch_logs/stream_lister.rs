//! Selects the log streams of a group that have activity inside the window

#![warn(clippy::all, rust_2018_idioms)]

use tracing::{debug, info};

use super::error::SourceError;
use super::source::LogSource;
use super::types::LogStreamDescriptor;
use super::window::TimeWindow;

/// Whether a listed stream has events overlapping the window
///
/// Streams that never received an event carry no timestamps and never match.
pub fn is_stream_in_window(stream: &LogStreamDescriptor, window: &TimeWindow) -> bool {
    match (stream.first_event_time, stream.last_event_time) {
        (Some(first), Some(last)) => window.overlaps(first, last),
        _ => false,
    }
}

/// List the names of the streams overlapping the window
///
/// Names keep the order reported by the source (most recent event first).
/// Any error reported by the source is returned as is; the caller must not
/// continue with a partial list.
pub async fn list_streams_in_window<S: LogSource + ?Sized>(
    source: &S,
    log_group_name: &str,
    window: &TimeWindow,
) -> Result<Vec<String>, SourceError> {
    let streams = source
        .describe_log_streams(log_group_name, Some(window.start_millis()))
        .await?;

    let total = streams.len();
    let names: Vec<String> = streams
        .into_iter()
        .filter(|stream| {
            let in_window = is_stream_in_window(stream, window);
            if !in_window {
                debug!("Skipping stream {} outside of window", stream.name);
            }
            in_window
        })
        .map(|stream| stream.name)
        .collect();

    info!(
        "{} of {} streams in {} overlap {} .. {}",
        names.len(),
        total,
        log_group_name,
        window.format_start(),
        window.format_end()
    );
    Ok(names)
}
