//! AWS Logs Downloader - export CloudWatch log events to local files
//!
//! Fetches the log events of a named log group within a bounded time window
//! and writes one file per log stream that has matching events, so logs can
//! be inspected offline without the AWS console.
//!
//! # Pipeline
//!
//! 1. **Window** ([`app::data_plane::cloudwatch_logs::window`]): end time (explicit or now) minus an interval
//! 2. **Stream listing** ([`app::data_plane::cloudwatch_logs::stream_lister`]): streams whose activity overlaps the window
//! 3. **Event fetching** ([`app::data_plane::cloudwatch_logs::event_fetcher`]): paginated download filtered by the window
//! 4. **Output** ([`app::data_plane::cloudwatch_logs::output`]): one truncated `<stream>.log` file per stream
//!
//! Authentication is delegated to an existing AWS profile login; the AWS SDK
//! picks up the shared config and credentials of that profile.

#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
