use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{Error, Result};

/// Buffered, exclusively-locked output file.
///
/// Lines are written whole into the buffer and the buffer is flushed at
/// progress-report points and at run end, so a cooperative cancellation
/// never leaves a partial line. The logical byte counter tracks what has
/// been handed to the writer, keeping reported sizes exact even while
/// bytes sit in the buffer.
pub struct OutputSink {
    path: PathBuf,
    writer: BufWriter<File>,
    bytes_written: u64,
}

impl OutputSink {
    /// Create (truncate) the output file and take an exclusive lock on
    /// it for the duration of the run.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        file.try_lock_exclusive()
            .map_err(|_| Error::Locked { path: path.clone() })?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            bytes_written: 0,
        })
    }

    /// Append one candidate line, newline-terminated.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.bytes_written += line.len() as u64 + 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flush, sync to disk, and release the lock. Returns the final
    /// byte count.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(self.bytes_written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lines_round_trip_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = OutputSink::create(&path).unwrap();
        sink.write_line("alpha").unwrap();
        sink.write_line("beta").unwrap();
        sink.finish().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "alpha\nbeta\n");
    }

    #[test]
    fn test_byte_counter_matches_file_size_after_flush() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let mut sink = OutputSink::create(&path).unwrap();
        sink.write_line("candidate").unwrap();
        sink.flush().unwrap();

        let on_disk = std::fs::metadata(&path).unwrap().len();
        assert_eq!(sink.bytes_written(), on_disk);
        assert_eq!(on_disk, 10);
    }

    #[test]
    fn test_second_sink_on_same_path_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");

        let _first = OutputSink::create(&path).unwrap();
        match OutputSink::create(&path) {
            Err(Error::Locked { .. }) => {}
            other => panic!("expected Locked error, got {:?}", other.map(|_| ())),
        }
    }
}
