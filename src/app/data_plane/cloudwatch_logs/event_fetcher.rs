//! Paginated download of one log stream
//!
//! Pages are requested from the head of the stream, bounded by the window,
//! until the source returns a page without events. Each page is filtered,
//! written and flushed before the next one is requested.
//!
//! A failed page is not fatal: its error text is reported, nothing is
//! written for it, and the next request reuses the last known cursor. Only
//! after `max_consecutive_page_errors` failures in a row is the stream
//! given up, so a persistent error cannot loop forever.

#![warn(clippy::all, rust_2018_idioms)]

use std::io;
use tracing::{debug, info, warn};

use super::output::StreamLogFile;
use super::source::LogSource;
use super::types::GetEventsRequest;
use super::window::TimeWindow;

/// Consecutive failed pages tolerated before a stream is given up
pub const DEFAULT_MAX_CONSECUTIVE_PAGE_ERRORS: u32 = 5;

/// Outcome of downloading one stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadStats {
    /// Calls made to the source, failed ones included
    pub requests: usize,
    /// Non-empty pages received
    pub pages: usize,
    /// Events written to the file
    pub events_written: usize,
    /// Events received but outside the window
    pub events_skipped: usize,
    /// Pages that reported an error
    pub page_errors: usize,
    /// False when the stream was given up after repeated page errors
    pub completed: bool,
}

/// Download the events of `log_stream_name` inside `window` into `file`
///
/// Returns an error only when writing to the file fails.
pub async fn download_stream<S: LogSource + ?Sized>(
    source: &S,
    log_group_name: &str,
    log_stream_name: &str,
    window: &TimeWindow,
    file: &mut StreamLogFile,
    max_consecutive_page_errors: u32,
) -> io::Result<DownloadStats> {
    let max_consecutive_page_errors = max_consecutive_page_errors.max(1);
    let mut stats = DownloadStats::default();
    let mut next_token: Option<String> = None;
    let mut consecutive_errors = 0;

    loop {
        let request = GetEventsRequest::first_page(
            log_group_name,
            log_stream_name,
            window.start_millis(),
            window.end_millis(),
        )
        .with_next_token(next_token.clone());

        stats.requests += 1;
        let page = match source.get_log_events(request).await {
            Ok(page) => {
                consecutive_errors = 0;
                page
            }
            Err(err) => {
                stats.page_errors += 1;
                consecutive_errors += 1;
                eprintln!("{}", err);
                warn!(
                    "Page {} of stream {} failed ({} in a row): {}",
                    stats.requests, log_stream_name, consecutive_errors, err
                );

                if consecutive_errors >= max_consecutive_page_errors {
                    warn!(
                        "Giving up stream {} after {} consecutive failed pages",
                        log_stream_name, consecutive_errors
                    );
                    return Ok(stats);
                }
                continue;
            }
        };

        if page.is_empty() {
            debug!(
                "Stream {} finished after {} request(s)",
                log_stream_name, stats.requests
            );
            break;
        }

        stats.pages += 1;
        next_token = page.next_forward_token;

        for event in &page.events {
            if window.contains(event.timestamp) {
                file.append_message(&event.message)?;
                stats.events_written += 1;
            } else {
                stats.events_skipped += 1;
            }
        }
        file.flush()?;

        if let Some(last) = page.events.last() {
            println!("Last downloaded event: {}", last.message);
            debug!("Last downloaded event of {}: {}", log_stream_name, last.message);
        }
    }

    stats.completed = true;
    info!(
        "Downloaded stream {}: {} page(s), {} event(s) written, {} outside window, {} failed page(s)",
        log_stream_name,
        stats.pages,
        stats.events_written,
        stats.events_skipped,
        stats.page_errors
    );
    Ok(stats)
}
