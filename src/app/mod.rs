//! Core application modules for the AWS logs downloader.
//!
//! # Module Organization
//!
//! - [`cli`] - Command line flags
//! - [`export_config`] - Resolution of flags, defaults file and built-in defaults into one config value
//! - [`logging`] - Diagnostics log file and console warnings
//! - [`data_plane`] - CloudWatch Logs client and the export pipeline
//!
//! # Architecture
//!
//! The binary parses [`cli::Cli`], resolves an [`export_config::ExportConfig`]
//! and hands it to [`data_plane::cloudwatch_logs::run_export`] together with a
//! [`data_plane::cloudwatch_logs::CloudWatchLogsClient`]. Nothing is shared
//! between stages except that read-only config.

pub mod cli;
pub mod data_plane;
pub mod export_config;
pub mod logging;
