//! Rotating log file writer with size-based rotation and backup retention.
//!
//! A thread-safe writer that rotates the log file when it exceeds a size
//! threshold, keeping a fixed number of timestamped backups so disk usage
//! stays bounded.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Maximum file size before rotation (2 MB).
const MAX_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 2;

/// Thread-safe rotating file writer.
///
/// The file handle is opened lazily on first write. Before each write the
/// current file size is checked; past the threshold the file is renamed to
/// `<name>.log.<unix_timestamp>` and a fresh file is started, with backups
/// beyond the retention limit removed.
pub struct FileWriter {
    /// Path to the primary log file.
    file_path: PathBuf,
    /// Lazily-initialized file handle.
    writer: Mutex<Option<std::fs::File>>,
}

impl FileWriter {
    /// Creates a writer for the given path. The file is not opened until the
    /// first write.
    pub const fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            writer: Mutex::new(None),
        }
    }

    /// Appends raw bytes to the file, rotating first if it has grown past the
    /// threshold. Flushes before returning.
    ///
    /// # Errors
    ///
    /// Fails on filesystem errors or a poisoned lock.
    pub fn write_bytes(&self, bytes: &[u8]) -> std::io::Result<()> {
        let mut writer = self.writer.lock().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::Other, format!("lock poisoned: {e}"))
        })?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "no file available"))?;

        file.write_all(bytes)?;
        file.flush()?;

        Ok(())
    }

    fn check_and_rotate(&self, writer: &mut Option<std::fs::File>) -> std::io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > MAX_FILE_SIZE_BYTES {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    fn rotate_files(&self) -> std::io::Result<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_secs();

        let backup_path = self.file_path.with_extension(format!("log.{timestamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()?;

        Ok(())
    }

    /// Removes backups beyond the retention limit, newest first. Individual
    /// deletion errors are ignored so cleanup keeps going.
    fn cleanup_old_backups(&self) -> std::io::Result<()> {
        let parent_dir = self.file_path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "no parent directory")
        })?;

        let file_stem = self
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(file_stem) && name.contains(".log."))
            })
            .collect();

        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

/// `MakeWriter` adapter handing the tracing fmt layer per-event writers that
/// append through the rotating [`FileWriter`].
#[derive(Debug, Clone)]
pub struct MakeFileWriter {
    inner: Arc<FileWriter>,
}

impl MakeFileWriter {
    /// Creates the adapter for the given log file path.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            inner: Arc::new(FileWriter::new(file_path)),
        }
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for MakeFileWriter {
    type Writer = EventWriter;

    fn make_writer(&'a self) -> Self::Writer {
        EventWriter {
            inner: Arc::clone(&self.inner),
            buf: Vec::new(),
        }
    }
}

/// Buffers one formatted event and appends it on flush/drop.
pub struct EventWriter {
    inner: Arc<FileWriter>,
    buf: Vec<u8>,
}

impl Write for EventWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let bytes = std::mem::take(&mut self.buf);
        self.inner.write_bytes(&bytes)
    }
}

impl Drop for EventWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_across_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let writer = FileWriter::new(path.clone());

        writer.write_bytes(b"first\n").unwrap();
        writer.write_bytes(b"second\n").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn event_writer_flushes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.log");
        let make = MakeFileWriter::new(path.clone());

        {
            use tracing_subscriber::fmt::MakeWriter;
            let mut w = make.make_writer();
            w.write_all(b"event line\n").unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "event line\n");
    }
}
