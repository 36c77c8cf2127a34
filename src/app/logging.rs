//! Diagnostics logging
//!
//! Everything at the configured level goes to a log file in the user data
//! directory. Warnings and errors are also shown on the console. When the
//! log file cannot be opened the console layer is the only output.

#![warn(clippy::all, rust_2018_idioms)]

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "awslogs_downloader=info,aws_config=warn,aws_sigv4=warn,\
aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,aws_smithy_http=warn,hyper=warn";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "", "awslogs-downloader")
}

/// Open the diagnostics log file in the user data directory
fn open_log_file() -> Option<(File, PathBuf)> {
    let log_dir = project_dirs()?.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let log_path = log_dir.join("awslogs-downloader.log");
    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
        .ok()?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = file.metadata() {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = std::fs::set_permissions(&log_path, perms) {
                eprintln!("[SECURITY] Failed to set log file permissions: {}", e);
            }
        }
    }

    Some((file, log_path))
}

/// Subscriber writing to `log_file` (if any) and warnings to `console`
pub fn build_subscriber<W>(
    filter: EnvFilter,
    log_file: Option<File>,
    console: W,
) -> impl Subscriber + Send + Sync
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let file_layer = log_file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(console)
        .with_target(false)
        .with_filter(LevelFilter::WARN);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(console_layer)
}

/// Install the global subscriber and the `log` bridge
///
/// Returns the log file path when file logging is active.
pub fn init_logging() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let (log_file, log_path) = match open_log_file() {
        Some((file, path)) => (Some(file), Some(path)),
        None => (None, None),
    };

    let subscriber = build_subscriber(filter, log_file, std::io::stderr);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return None;
    }

    // Bridge `log` records from dependencies into tracing
    if let Err(e) = tracing_log::LogTracer::init() {
        tracing::warn!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    log_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Seek, Write};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_warnings_reach_console_next_to_log_file() {
        let console = SharedBuffer::default();
        let writer = console.clone();
        let mut log_file = tempfile::tempfile().unwrap();

        let subscriber = build_subscriber(
            EnvFilter::new("info"),
            Some(log_file.try_clone().unwrap()),
            move || writer.clone(),
        );
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("Exporting /ecs/app");
            tracing::warn!("Failed to parse defaults file: unknown field `intervall_minutes`");
        });

        let shown = console.contents();
        assert!(shown.contains("unknown field `intervall_minutes`"));
        assert!(!shown.contains("Exporting /ecs/app"));

        let mut logged = String::new();
        log_file.rewind().unwrap();
        log_file.read_to_string(&mut logged).unwrap();
        assert!(logged.contains("Exporting /ecs/app"));
        assert!(logged.contains("intervall_minutes"));
    }

    #[test]
    fn test_console_only_without_log_file() {
        let console = SharedBuffer::default();
        let writer = console.clone();

        let subscriber = build_subscriber(EnvFilter::new("info"), None, move || writer.clone());
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("listing failed");
        });

        assert!(console.contents().contains("listing failed"));
    }
}
