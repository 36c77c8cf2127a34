//! Command line surface

#![warn(clippy::all, rust_2018_idioms)]

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Version reported by `-v/--version`, including the commit the binary was built from
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_COMMIT"), ")");

const LONG_ABOUT: &str = "\
Download aws logs for a log group in particular time period. \
In case there are multiple log streams for that period multiple files will be created. \
Downloaded files will be stored in the output directory (default: current directory), \
and will be named by the log streams that have log events in the given time period. \
If a stream name contains forward slashes, they are replaced by underscores. \
Each file is overwritten if it already exists.

Prerequisite: you need to be logged in to your aws profile (e.g. `aws sso login --profile dev`).

Usage example: awslogs-downloader -g /ecs/my-cluster-test-my-app -t \"2021-09-04 05:59:50 +00:00\" -i 60";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "awslogs-downloader",
    version = VERSION,
    about = "Download CloudWatch log events of a log group within a time window",
    long_about = LONG_ABOUT,
    disable_version_flag = true
)]
pub struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    pub version: Option<bool>,

    /// (required) Log group name for which the log stream events are downloaded
    #[arg(short = 'g', long = "log-group", value_name = "LOG_GROUP")]
    pub log_group: String,

    /// (default: now) End date and time of the downloaded logs, format: %Y-%m-%d %H:%M:%S %z (example: "2021-09-04 05:59:50 +00:00")
    #[arg(short = 't', long = "end-time", value_name = "END_TIME")]
    pub end_time: Option<String>,

    /// (default: 30) Time period in minutes before the end time
    #[arg(short = 'i', long = "interval", value_name = "MINUTES", allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// (default: dev) AWS profile that is logged in and used to download the logs
    #[arg(short = 'p', long = "profile", value_name = "PROFILE")]
    pub profile: Option<String>,

    /// (default: eu-central-1) AWS region from which the logs are downloaded
    #[arg(short = 'r', long = "region", value_name = "REGION")]
    pub region: Option<String>,

    /// (default: .) Directory the log files are written to
    #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Timeout in seconds for each AWS call (default: none)
    #[arg(long = "timeout-secs", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Defaults file to use instead of awslogs-downloader.json
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}
