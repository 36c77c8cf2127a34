//! Per-stream output files
//!
//! Each matching stream is written to `<stream name>.log` with every `/`
//! replaced by `_`. An existing file with the same name is truncated.

#![warn(clippy::all, rust_2018_idioms)]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::window::TimeWindow;

/// File name used for a log stream
pub fn log_file_name(stream_name: &str) -> String {
    format!("{}.log", stream_name).replace('/', "_")
}

/// Header written at the top of every file, before any event
pub fn file_header(stream_name: &str, window: &TimeWindow) -> String {
    format!(
        "log stream {} \nsince {} till {} :",
        stream_name,
        window.format_start(),
        window.format_end()
    )
}

/// Open output file for one log stream
#[derive(Debug)]
pub struct StreamLogFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl StreamLogFile {
    /// Create (or truncate) the file for `stream_name` in `output_dir` and write the header
    pub fn create(output_dir: &Path, stream_name: &str, window: &TimeWindow) -> io::Result<Self> {
        let path = output_dir.join(log_file_name(stream_name));
        let file = File::create(&path)?;

        let mut writer = BufWriter::new(file);
        writer.write_all(file_header(stream_name, window).as_bytes())?;

        Ok(Self { path, writer })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event message on its own line
    ///
    /// The message is written verbatim, embedded newlines included.
    pub fn append_message(&mut self, message: &str) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.writer.write_all(message.as_bytes())
    }

    /// Push buffered lines to disk so a partial download stays visible
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn close(mut self) -> io::Result<()> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> TimeWindow {
        TimeWindow::resolve(Some("2021-09-04 06:00:00 +00:00"), 60).unwrap()
    }

    #[test]
    fn test_log_file_name_replaces_slashes() {
        assert_eq!(log_file_name("2021/09/04/[1]abc"), "2021_09_04_[1]abc.log");
        assert_eq!(log_file_name("plain-stream"), "plain-stream.log");
        assert_eq!(log_file_name("/leading/slash"), "_leading_slash.log");
    }

    #[test]
    fn test_header_names_stream_and_window() {
        assert_eq!(
            file_header("ecs/app/123", &window()),
            "log stream ecs/app/123 \nsince 2021-09-04 05:00:00 +0000 till 2021-09-04 06:00:00 +0000 :"
        );
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("app_1.log");
        std::fs::write(&existing, "stale content that must disappear\n".repeat(100)).unwrap();

        let file = StreamLogFile::create(dir.path(), "app/1", &window()).unwrap();
        assert_eq!(file.path(), existing.as_path());
        file.close().unwrap();

        let content = std::fs::read_to_string(&existing).unwrap();
        assert_eq!(content, file_header("app/1", &window()));
    }

    #[test]
    fn test_messages_are_appended_verbatim() {
        let dir = tempfile::tempdir().unwrap();

        let mut file = StreamLogFile::create(dir.path(), "app", &window()).unwrap();
        file.append_message("first").unwrap();
        file.append_message("multi\nline").unwrap();
        file.flush().unwrap();

        let flushed = std::fs::read_to_string(file.path()).unwrap();
        assert!(flushed.ends_with("\nfirst\nmulti\nline"));
        file.close().unwrap();
    }
}
