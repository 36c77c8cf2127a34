//! Data Plane Services Module
//!
//! AWS data plane integrations. Data plane services read the data held by
//! AWS resources, as opposed to control plane operations that discover and
//! manage the resources themselves.
//!
//! ## Available Services
//!
//! - **CloudWatch Logs**: Export the log events of a log group within a time window

pub mod cloudwatch_logs;

pub use cloudwatch_logs::{
    run_export, CloudWatchLogsClient, ExportError, ExportSummary, LogSource, TimeWindow,
};
