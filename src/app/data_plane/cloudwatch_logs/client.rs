//! CloudWatch Logs Client Wrapper
//!
//! Implements [`LogSource`] on top of the AWS SDK, using the named profile
//! from the shared AWS config. The caller must already be logged in to that
//! profile (e.g. `aws sso login --profile dev`).

#![warn(clippy::all, rust_2018_idioms)]

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_cloudwatchlogs as cloudwatchlogs;
use aws_sdk_cloudwatchlogs::error::DisplayErrorContext;
use aws_types::region::Region;
use std::time::Duration;
use tracing::debug;

use super::error::SourceError;
use super::source::LogSource;
use super::types::{EventPage, GetEventsRequest, LogEvent, LogStreamDescriptor};

/// CloudWatch Logs client wrapper
#[derive(Clone)]
pub struct CloudWatchLogsClient {
    client: cloudwatchlogs::Client,
}

impl CloudWatchLogsClient {
    /// Create a client from an already loaded SDK config
    pub fn new(aws_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: cloudwatchlogs::Client::new(aws_config),
        }
    }

    /// Load the SDK config for a profile and region and create a client
    ///
    /// `timeout` bounds every operation, including retries. `None` keeps
    /// the SDK default of no operation timeout.
    pub async fn from_profile(profile: &str, region: &str, timeout: Option<Duration>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .profile_name(profile)
            .region(Region::new(region.to_string()));

        if let Some(timeout) = timeout {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(timeout)
                    .build(),
            );
        }

        let aws_config = loader.load().await;

        debug!(
            "Created CloudWatch Logs client for profile {} in region {}",
            profile, region
        );
        Self::new(&aws_config)
    }
}

#[async_trait]
impl LogSource for CloudWatchLogsClient {
    async fn describe_log_streams(
        &self,
        log_group_name: &str,
        not_before_ms: Option<i64>,
    ) -> Result<Vec<LogStreamDescriptor>, SourceError> {
        let mut paginator = self
            .client
            .describe_log_streams()
            .log_group_name(log_group_name)
            .order_by(cloudwatchlogs::types::OrderBy::LastEventTime)
            .descending(true)
            .into_paginator()
            .send();

        let mut descriptors = Vec::new();
        let mut pages = 0;

        while let Some(page) = paginator.next().await {
            let page = page.map_err(|e| SourceError::new(DisplayErrorContext(&e).to_string()))?;
            pages += 1;

            let streams = page.log_streams.unwrap_or_default();
            let page_descriptors: Vec<LogStreamDescriptor> =
                streams.iter().filter_map(stream_descriptor_from_sdk).collect();

            let stop = remaining_streams_are_older(&page_descriptors, not_before_ms);
            descriptors.extend(page_descriptors);

            if stop {
                debug!(
                    "Stopping stream listing for {} after {} page(s), remaining streams are older",
                    log_group_name, pages
                );
                break;
            }
        }

        debug!(
            "Listed {} log streams for {} in {} page(s)",
            descriptors.len(),
            log_group_name,
            pages
        );
        Ok(descriptors)
    }

    async fn get_log_events(&self, request: GetEventsRequest) -> Result<EventPage, SourceError> {
        let response = self
            .client
            .get_log_events()
            .log_group_name(request.log_group_name)
            .log_stream_name(request.log_stream_name)
            .start_time(request.start_time)
            .end_time(request.end_time)
            .start_from_head(request.start_from_head)
            .set_next_token(request.next_token)
            .send()
            .await
            .map_err(|e| SourceError::new(DisplayErrorContext(&e).to_string()))?;

        let events = response
            .events
            .unwrap_or_default()
            .iter()
            .map(log_event_from_sdk)
            .collect();

        Ok(EventPage::new(events, response.next_forward_token))
    }
}

/// Whether the streams after this page all ended at or before `not_before_ms`
///
/// Pages are ordered by last event time, descending, so only the last
/// stream of the page has to be checked.
fn remaining_streams_are_older(page: &[LogStreamDescriptor], not_before_ms: Option<i64>) -> bool {
    match (not_before_ms, page.last()) {
        (Some(not_before), Some(oldest)) => oldest
            .last_event_time
            .is_some_and(|last_event| last_event <= not_before),
        _ => false,
    }
}

/// Convert an SDK stream description, skipping entries without a name
fn stream_descriptor_from_sdk(
    stream: &cloudwatchlogs::types::LogStream,
) -> Option<LogStreamDescriptor> {
    let name = stream.log_stream_name.clone()?;
    Some(LogStreamDescriptor {
        name,
        first_event_time: stream.first_event_timestamp,
        last_event_time: stream.last_event_timestamp,
    })
}

fn log_event_from_sdk(event: &cloudwatchlogs::types::OutputLogEvent) -> LogEvent {
    LogEvent::new(
        event.timestamp.unwrap_or(0),
        event.message.clone().unwrap_or_default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudwatchlogs::types::{LogStream, OutputLogEvent};

    #[test]
    fn test_stream_descriptor_conversion() {
        let stream = LogStream::builder()
            .log_stream_name("2021/09/04/[1]abc")
            .first_event_timestamp(1000)
            .last_event_timestamp(2000)
            .build();

        let descriptor = stream_descriptor_from_sdk(&stream).unwrap();
        assert_eq!(descriptor, LogStreamDescriptor::new("2021/09/04/[1]abc", 1000, 2000));
    }

    #[test]
    fn test_stream_without_events_keeps_missing_timestamps() {
        let stream = LogStream::builder().log_stream_name("idle").build();

        let descriptor = stream_descriptor_from_sdk(&stream).unwrap();
        assert!(descriptor.first_event_time.is_none());
        assert!(descriptor.last_event_time.is_none());
    }

    #[test]
    fn test_stream_without_name_is_skipped() {
        let stream = LogStream::builder().first_event_timestamp(1).build();
        assert!(stream_descriptor_from_sdk(&stream).is_none());
    }

    fn listing_page() -> Vec<LogStreamDescriptor> {
        vec![
            LogStreamDescriptor::new("newest", 5_000, 9_000),
            LogStreamDescriptor::new("oldest", 1_000, 4_000),
        ]
    }

    #[test]
    fn test_stops_when_oldest_stream_ends_at_boundary() {
        assert!(remaining_streams_are_older(&listing_page(), Some(4_000)));
        assert!(remaining_streams_are_older(&listing_page(), Some(7_000)));
    }

    #[test]
    fn test_continues_when_oldest_stream_ends_after_boundary() {
        assert!(!remaining_streams_are_older(&listing_page(), Some(3_999)));
    }

    #[test]
    fn test_continues_when_oldest_stream_has_no_events() {
        let mut page = listing_page();
        page.push(LogStreamDescriptor::without_events("idle"));
        assert!(!remaining_streams_are_older(&page, Some(4_000)));
    }

    #[test]
    fn test_continues_without_lower_bound_or_streams() {
        assert!(!remaining_streams_are_older(&listing_page(), None));
        assert!(!remaining_streams_are_older(&[], Some(4_000)));
    }

    #[test]
    fn test_log_event_conversion() {
        let event = OutputLogEvent::builder()
            .timestamp(1630731600000)
            .message("GET /health 200")
            .ingestion_time(1630731600100)
            .build();

        assert_eq!(
            log_event_from_sdk(&event),
            LogEvent::new(1630731600000, "GET /health 200")
        );
    }
}
