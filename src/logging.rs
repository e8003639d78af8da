//! Tracing setup. The terminal belongs to the UI, so logs go to a file.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;

use crate::config::{self, LoggingSettings};

/// Install the global subscriber. Returns the log file path in use.
///
/// `RUST_LOG` overrides the configured level. Fails when the log file cannot
/// be opened or a global subscriber is already installed.
pub fn init(settings: &LoggingSettings) -> io::Result<PathBuf> {
    let path = settings
        .file
        .clone()
        .or_else(config::default_log_path)
        .ok_or_else(|| io::Error::other("no log file location (HOME is not set)"))?;

    let file = open_log_file(&path)?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = Arc::new(Mutex::new(file));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(move || FileLogWriter::new(Arc::clone(&writer)))
        .try_init()
        .map_err(|e| io::Error::other(format!("subscriber already installed: {e}")))?;
    Ok(path)
}

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

struct FileLogWriter {
    file: Arc<Mutex<File>>,
}

impl FileLogWriter {
    fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }
}

impl Write for FileLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut guard) = self.file.lock() {
            guard.write_all(buf)?;
            return Ok(buf.len());
        }
        Err(io::Error::other("failed to lock log file"))
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Ok(mut guard) = self.file.lock() {
            guard.flush()?;
            return Ok(());
        }
        Err(io::Error::other("failed to lock log file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_log_file_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state").join("lumina.log");
        let mut file = open_log_file(&path).unwrap();
        writeln!(file, "hello").unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn file_log_writer_appends_through_the_shared_handle() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.log");
        let shared = Arc::new(Mutex::new(open_log_file(&path).unwrap()));

        let mut a = FileLogWriter::new(Arc::clone(&shared));
        let mut b = FileLogWriter::new(shared);
        a.write_all(b"one\n").unwrap();
        b.write_all(b"two\n").unwrap();
        b.flush().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn second_init_reports_the_existing_subscriber() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LoggingSettings {
            level: "debug".to_string(),
            file: Some(dir.path().join("lumina.log")),
        };
        assert_eq!(init(&settings).unwrap(), dir.path().join("lumina.log"));
        assert!(init(&settings).is_err());
    }
}
