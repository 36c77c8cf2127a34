//! CloudWatch Logs Data Types
//!
//! Data structures exchanged between the log source, the stream lister and
//! the event fetcher. Timestamps are Unix milliseconds, as returned by the
//! CloudWatch Logs API.

#![warn(clippy::all, rust_2018_idioms)]

/// A log stream as reported by `DescribeLogStreams`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogStreamDescriptor {
    /// Name of the log stream
    pub name: String,
    /// Timestamp of the first event in the stream (Unix milliseconds)
    pub first_event_time: Option<i64>,
    /// Timestamp of the most recent event in the stream (Unix milliseconds)
    pub last_event_time: Option<i64>,
}

impl LogStreamDescriptor {
    /// Create a descriptor for a stream that has received events
    pub fn new(name: impl Into<String>, first_event_time: i64, last_event_time: i64) -> Self {
        Self {
            name: name.into(),
            first_event_time: Some(first_event_time),
            last_event_time: Some(last_event_time),
        }
    }

    /// Create a descriptor for a stream that never received an event
    pub fn without_events(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            first_event_time: None,
            last_event_time: None,
        }
    }
}

/// A single log event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    /// Event timestamp (Unix milliseconds)
    pub timestamp: i64,
    /// Log message content
    pub message: String,
}

impl LogEvent {
    /// Create a new log event
    pub fn new(timestamp: i64, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// Parameters of one `GetLogEvents` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetEventsRequest {
    pub log_group_name: String,
    pub log_stream_name: String,
    /// Start of the requested range (Unix milliseconds)
    pub start_time: i64,
    /// End of the requested range (Unix milliseconds)
    pub end_time: i64,
    /// Read chronologically from the earliest matching event
    pub start_from_head: bool,
    /// Continuation cursor from the previous page
    pub next_token: Option<String>,
}

impl GetEventsRequest {
    /// Request for the first page of a stream, read from the head
    pub fn first_page(
        log_group_name: impl Into<String>,
        log_stream_name: impl Into<String>,
        start_time: i64,
        end_time: i64,
    ) -> Self {
        Self {
            log_group_name: log_group_name.into(),
            log_stream_name: log_stream_name.into(),
            start_time,
            end_time,
            start_from_head: true,
            next_token: None,
        }
    }

    /// Set the continuation cursor
    pub fn with_next_token(mut self, next_token: Option<String>) -> Self {
        self.next_token = next_token;
        self
    }
}

/// One page returned by `GetLogEvents`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPage {
    /// Events in this page, oldest first
    pub events: Vec<LogEvent>,
    /// Cursor for the next page
    pub next_forward_token: Option<String>,
}

impl EventPage {
    pub fn new(events: Vec<LogEvent>, next_forward_token: Option<String>) -> Self {
        Self {
            events,
            next_forward_token,
        }
    }

    /// Page with no events; ends the pagination of a stream
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_descriptor_timestamps() {
        let active = LogStreamDescriptor::new("2021/09/04/[1]abc", 1630731600000, 1630735500000);
        assert_eq!(active.name, "2021/09/04/[1]abc");
        assert_eq!(active.first_event_time, Some(1630731600000));
        assert_eq!(active.last_event_time, Some(1630735500000));

        let idle = LogStreamDescriptor::without_events("empty-stream");
        assert!(idle.first_event_time.is_none());
        assert!(idle.last_event_time.is_none());
    }

    #[test]
    fn test_page_without_events_is_empty() {
        assert!(EventPage::empty().is_empty());
        assert!(EventPage::new(Vec::new(), Some("f/123".to_string())).is_empty());

        let page = EventPage::new(vec![LogEvent::new(2000, "second")], Some("f/123".to_string()));
        assert!(!page.is_empty());
        assert_eq!(page.next_forward_token.as_deref(), Some("f/123"));
    }

    #[test]
    fn test_first_page_request_reads_from_head() {
        let request = GetEventsRequest::first_page("/ecs/app", "stream", 10, 20);

        assert!(request.start_from_head);
        assert!(request.next_token.is_none());

        let next = request.with_next_token(Some("f/1".to_string()));
        assert_eq!(next.next_token.as_deref(), Some("f/1"));
    }
}
