//! Log source abstraction
//!
//! The export pipeline only needs two operations from CloudWatch Logs. They
//! are expressed as a trait so the pipeline can run against the AWS SDK
//! client or against an in-memory source.

#![warn(clippy::all, rust_2018_idioms)]

use async_trait::async_trait;

use super::error::SourceError;
use super::types::{EventPage, GetEventsRequest, LogStreamDescriptor};

#[async_trait]
pub trait LogSource: Send + Sync {
    /// List the streams of a log group, most recent event first
    ///
    /// `not_before_ms` lets the source stop paging once every remaining
    /// stream ended at or before that time. Sources may ignore it.
    async fn describe_log_streams(
        &self,
        log_group_name: &str,
        not_before_ms: Option<i64>,
    ) -> Result<Vec<LogStreamDescriptor>, SourceError>;

    /// Fetch one page of events
    async fn get_log_events(&self, request: GetEventsRequest) -> Result<EventPage, SourceError>;
}
