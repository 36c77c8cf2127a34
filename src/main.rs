#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser;

use awslogs_downloader::app::cli::{Cli, VERSION};
use awslogs_downloader::app::data_plane::cloudwatch_logs::{
    run_export, CloudWatchLogsClient, ExportError, ExportSummary, WindowError,
};
use awslogs_downloader::app::export_config::{DefaultsFile, ExportConfig};
use awslogs_downloader::app::logging::init_logging;

/// Exit code for invalid arguments, reported before any AWS call
const EXIT_INVALID_ARGUMENTS: i32 = 2;

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        let crash_msg = format!(
            "awslogs-downloader crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n",
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
        );

        tracing::error!("{}", crash_msg);
        eprintln!("\n{}", crash_msg);
    }));
}

async fn run(cli: Cli) -> anyhow::Result<ExportSummary> {
    let defaults = DefaultsFile::discover(cli.config.as_deref());
    let config = ExportConfig::from_cli(&cli, defaults.as_ref())?;

    tracing::info!(
        "Exporting {} from {} till {} (profile {}, region {}) into {:?}",
        config.log_group,
        config.window.format_start(),
        config.window.format_end(),
        config.profile,
        config.region,
        config.output_dir
    );

    let client =
        CloudWatchLogsClient::from_profile(&config.profile, &config.region, config.timeout).await;

    let summary = run_export(&client, &config).await?;
    Ok(summary)
}

/// Map a failed run to its exit code, printing what the user needs to see
fn report_failure(err: &anyhow::Error) -> i32 {
    if let Some(export_err) = err.downcast_ref::<ExportError>() {
        match export_err {
            // Raw error text of the listing call, as reported by the service
            ExportError::ListStreams(source_err) => eprintln!("{}", source_err),
            other => eprintln!("error: {}", other),
        }
        return export_err.exit_code();
    }

    eprintln!("error: {:#}", err);
    if err.downcast_ref::<WindowError>().is_some() {
        EXIT_INVALID_ARGUMENTS
    } else {
        1
    }
}

#[tokio::main]
async fn main() {
    setup_panic_handler();

    let cli = Cli::parse();
    let log_path = init_logging();

    tracing::info!("awslogs-downloader {} starting, log file: {:?}", VERSION, log_path);

    match run(cli).await {
        Ok(summary) => {
            let incomplete = summary.incomplete_streams();
            if !incomplete.is_empty() {
                eprintln!(
                    "Warning: gave up on {} stream(s) after repeated errors: {:?}",
                    incomplete.len(),
                    incomplete
                );
            }
            tracing::info!(
                "Done: {} stream(s), {} event(s) written",
                summary.streams_matched.len(),
                summary.events_written()
            );
        }
        Err(err) => {
            tracing::error!("Export failed: {:#}", err);
            std::process::exit(report_failure(&err));
        }
    }
}
