//! Export time window
//!
//! The window is resolved once at startup from the optional `--end-time`
//! argument and the interval in minutes. Both the stream overlap test and
//! the per-event filter use strict comparisons on both bounds.

#![warn(clippy::all, rust_2018_idioms)]

use chrono::{DateTime, Duration, FixedOffset, Utc};

use super::error::WindowError;

/// Format of `--end-time` and of the times written into file headers
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// Interval used when none is configured
pub const DEFAULT_INTERVAL_MINUTES: i64 = 30;

/// Time range used to select streams and filter events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl TimeWindow {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Resolve the window ending at `end_argument`, or now (UTC) when absent or empty
    pub fn resolve(end_argument: Option<&str>, interval_minutes: i64) -> Result<Self, WindowError> {
        Self::resolve_at(end_argument, interval_minutes, Utc::now())
    }

    /// Same as [`TimeWindow::resolve`] with an explicit "now"
    ///
    /// The interval is not validated here, a negative value produces an
    /// inverted window. See [`TimeWindow::validate`].
    pub fn resolve_at(
        end_argument: Option<&str>,
        interval_minutes: i64,
        now: DateTime<Utc>,
    ) -> Result<Self, WindowError> {
        let end = match end_argument.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => parse_end_time(text)?,
            None => now.into(),
        };

        let interval = Duration::try_minutes(interval_minutes)
            .ok_or(WindowError::IntervalOutOfRange(interval_minutes))?;
        let start = end
            .checked_sub_signed(interval)
            .ok_or(WindowError::IntervalOutOfRange(interval_minutes))?;

        Ok(Self { start, end })
    }

    /// Reject windows where start is not strictly before end
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.start < self.end {
            Ok(())
        } else {
            let minutes = (self.end - self.start).num_minutes();
            Err(WindowError::NonPositiveInterval(minutes))
        }
    }

    /// Window start in Unix milliseconds
    pub fn start_millis(&self) -> i64 {
        self.start.timestamp_millis()
    }

    /// Window end in Unix milliseconds
    pub fn end_millis(&self) -> i64 {
        self.end.timestamp_millis()
    }

    /// Whether an event timestamp lies strictly inside the window
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms > self.start_millis() && timestamp_ms < self.end_millis()
    }

    /// Whether a stream's activity range overlaps the window
    ///
    /// A stream whose last event is exactly at the start, or whose first
    /// event is exactly at the end, does not overlap.
    pub fn overlaps(&self, first_event_ms: i64, last_event_ms: i64) -> bool {
        last_event_ms > self.start_millis() && first_event_ms < self.end_millis()
    }

    pub fn format_start(&self) -> String {
        self.start.format(TIME_FORMAT).to_string()
    }

    pub fn format_end(&self) -> String {
        self.end.format(TIME_FORMAT).to_string()
    }
}

/// Parse an end time such as `2021-09-04 05:59:50 +00:00` or `2021-09-04 05:59:50 +0000`
pub fn parse_end_time(input: &str) -> Result<DateTime<FixedOffset>, WindowError> {
    DateTime::parse_from_str(input, TIME_FORMAT).map_err(|source| WindowError::Parse {
        input: input.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(text: &str) -> DateTime<FixedOffset> {
        parse_end_time(text).unwrap()
    }

    #[test]
    fn test_parse_end_time_with_colon_offset() {
        let end = parse_end_time("2021-09-04 05:59:50 +00:00").unwrap();
        assert_eq!(end.timestamp(), 1630735190);
    }

    #[test]
    fn test_parse_end_time_with_compact_offset() {
        let end = parse_end_time("2021-09-04 07:59:50 +0200").unwrap();
        assert_eq!(end.timestamp(), 1630735190);
        assert_eq!(end.offset().local_minus_utc(), 2 * 3600);
    }

    #[test]
    fn test_parse_end_time_rejects_other_formats() {
        assert!(matches!(
            parse_end_time("2021-09-04T05:59:50Z"),
            Err(WindowError::Parse { .. })
        ));
        assert!(parse_end_time("2021-09-04 05:59:50").is_err());
        assert!(parse_end_time("yesterday").is_err());
    }

    #[test]
    fn test_resolve_explicit_end() {
        let window = TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), 60).unwrap();

        assert_eq!(window.end, utc("2021-09-04 06:00:00 +00:00"));
        assert_eq!(window.start, utc("2021-09-04 05:00:00 +00:00"));
        assert_eq!(window.end_millis() - window.start_millis(), 60 * 60 * 1000);
    }

    #[test]
    fn test_resolve_defaults_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let window = TimeWindow::resolve_at(None, DEFAULT_INTERVAL_MINUTES, now).unwrap();
        assert_eq!(window.end.timestamp(), now.timestamp());
        assert_eq!(window.end.offset().local_minus_utc(), 0);
        assert_eq!((window.end - window.start).num_minutes(), 30);

        let empty = TimeWindow::resolve_at(Some(""), 30, now).unwrap();
        assert_eq!(empty, window);
    }

    #[test]
    fn test_resolve_negative_interval_inverts_window() {
        let window = TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), -10).unwrap();

        assert!(window.start > window.end);
        assert!(matches!(
            window.validate(),
            Err(WindowError::NonPositiveInterval(-10))
        ));
    }

    #[test]
    fn test_zero_interval_is_invalid() {
        let window = TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), 0).unwrap();
        assert!(window.validate().is_err());
    }

    #[test]
    fn test_contains_is_strict() {
        let window = TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), 60).unwrap();

        assert!(!window.contains(window.start_millis()));
        assert!(!window.contains(window.end_millis()));
        assert!(window.contains(window.start_millis() + 1));
        assert!(window.contains(window.end_millis() - 1));
    }

    #[test]
    fn test_overlaps_excludes_boundaries() {
        let window = TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), 60).unwrap();
        let (start, end) = (window.start_millis(), window.end_millis());

        // ends exactly at start
        assert!(!window.overlaps(start - 1000, start));
        // begins exactly at end
        assert!(!window.overlaps(end, end + 1000));
        // entirely before and after
        assert!(!window.overlaps(start - 2000, start - 1000));
        assert!(!window.overlaps(end + 1000, end + 2000));

        assert!(window.overlaps(start - 1000, start + 1));
        assert!(window.overlaps(end - 1, end + 1000));
        assert!(window.overlaps(start - 1000, end + 1000));
    }

    #[test]
    fn test_header_time_format() {
        let window = TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), 60).unwrap();

        assert_eq!(window.format_start(), "2021-09-04 05:00:00 +0000");
        assert_eq!(window.format_end(), "2021-09-04 06:00:00 +0000");
    }
}
