//! Log file discovery and line reading.
//!
//! Discovery is non-recursive: only regular files directly inside the logs
//! directory whose extension is exactly `log` are returned.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use devlog_core::{DevlogError, Result};
use tracing::{debug, warn};

/// Extension identifying candidate log sources.
pub const LOG_EXTENSION: &str = "log";

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.log` files directly inside `logs_dir`, sorted by file name.
///
/// Returns [`DevlogError::LogsDirNotFound`] when `logs_dir` is not a
/// directory. An existing directory without log files yields an empty list.
pub fn find_log_files(logs_dir: &Path) -> Result<Vec<PathBuf>> {
    if !logs_dir.is_dir() {
        return Err(DevlogError::LogsDirNotFound(logs_dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(logs_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", logs_dir.display(), e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == LOG_EXTENSION)
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!("Found {} log files in {}", files.len(), logs_dir.display());
    Ok(files)
}

/// Open `path` for buffered line reading.
pub fn open_log(path: &Path) -> Result<LogLines<BufReader<File>>> {
    let file = File::open(path).map_err(|source| DevlogError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(LogLines::new(BufReader::new(file), path))
}

// ── LogLines ──────────────────────────────────────────────────────────────────

/// Iterator over the lines of a log source.
///
/// `\n`, `\r\n` and a lone `\r` all end a line and are stripped. Bytes that
/// are not valid UTF-8 are replaced rather than failing the source; only I/O
/// errors are reported, as [`DevlogError::SourceUnavailable`].
pub struct LogLines<R> {
    reader: R,
    path: PathBuf,
    buf: Vec<u8>,
    /// Previous line ended in `\r`; a `\n` right after it belongs to it.
    skip_lf: bool,
    failed: bool,
}

impl<R: BufRead> LogLines<R> {
    pub fn new(reader: R, path: &Path) -> Self {
        Self {
            reader,
            path: path.to_path_buf(),
            buf: Vec::new(),
            skip_lf: false,
            failed: false,
        }
    }

    /// Fill `self.buf` up to the next terminator.
    ///
    /// Returns `false` at end of input with nothing read.
    fn read_line(&mut self) -> std::io::Result<bool> {
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(!self.buf.is_empty());
            }

            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(i) => {
                    self.skip_lf = available[i] == b'\r';
                    self.buf.extend_from_slice(&available[..i]);
                    self.reader.consume(i + 1);
                    return Ok(true);
                }
                None => {
                    let used = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(used);
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for LogLines<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.buf.clear();
        match self.read_line() {
            Ok(false) => None,
            Ok(true) => Some(Ok(String::from_utf8_lossy(&self.buf).into_owned())),
            Err(source) => {
                self.failed = true;
                Some(Err(DevlogError::SourceUnavailable {
                    path: self.path.clone(),
                    source,
                }))
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_log(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn file_names(files: &[PathBuf]) -> Vec<&str> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect()
    }

    // ── find_log_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_log_files_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "ward-c.log", &["x"]);
        write_log(dir.path(), "ward-a.log", &["x"]);
        write_log(dir.path(), "ward-b.log", &["x"]);

        let files = find_log_files(dir.path()).unwrap();
        assert_eq!(file_names(&files), vec!["ward-a.log", "ward-b.log", "ward-c.log"]);
    }

    #[test]
    fn test_find_log_files_ignores_other_extensions() {
        let dir = TempDir::new().unwrap();
        write_log(dir.path(), "devices.log", &["x"]);
        write_log(dir.path(), "notes.txt", &["x"]);
        write_log(dir.path(), "devices.log.bak", &["x"]);
        write_log(dir.path(), "archive.logs", &["x"]);

        let files = find_log_files(dir.path()).unwrap();
        assert_eq!(file_names(&files), vec!["devices.log"]);
    }

    #[test]
    fn test_find_log_files_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("archive");
        std::fs::create_dir_all(&sub).unwrap();
        write_log(dir.path(), "current.log", &["x"]);
        write_log(&sub, "old.log", &["x"]);

        let files = find_log_files(dir.path()).unwrap();
        assert_eq!(file_names(&files), vec!["current.log"]);
    }

    #[test]
    fn test_find_log_files_skips_directories_named_like_logs() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("folder.log")).unwrap();

        let files = find_log_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_log_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = find_log_files(dir.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_find_log_files_missing_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("active_logs");

        let err = find_log_files(&missing).unwrap_err();
        assert!(matches!(err, DevlogError::LogsDirNotFound(ref p) if p == &missing));
    }

    // ── LogLines ──────────────────────────────────────────────────────────────

    #[test]
    fn test_log_lines_strips_terminators() {
        let input = Cursor::new(b"first\r\nsecond\nthird".to_vec());
        let lines: Vec<String> = LogLines::new(input, Path::new("mem.log"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_log_lines_lone_carriage_return_ends_line() {
        let input = Cursor::new(b"a\rb\r\nc\n".to_vec());
        let lines: Vec<String> = LogLines::new(input, Path::new("mem.log"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_log_lines_blank_lines_between_carriage_returns() {
        let input = Cursor::new(b"a\r\rb\r\n\r\nc\r".to_vec());
        let lines: Vec<String> = LogLines::new(input, Path::new("mem.log"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a", "", "b", "", "c"]);
    }

    #[test]
    fn test_log_lines_crlf_split_across_buffer_fill() {
        // A one-byte buffer forces the `\r` and `\n` into separate fills.
        let input = BufReader::with_capacity(1, Cursor::new(b"ab\r\ncd\r\n".to_vec()));
        let lines: Vec<String> = LogLines::new(input, Path::new("mem.log"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["ab", "cd"]);
    }

    #[test]
    fn test_log_lines_keeps_blank_lines() {
        let input = Cursor::new(b"a\n\nb\n".to_vec());
        let lines: Vec<String> = LogLines::new(input, Path::new("mem.log"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn test_log_lines_decodes_invalid_utf8_lossily() {
        let input = Cursor::new(b"2024-01-01 08:00:00 PUMP-A \xff\xfe\n".to_vec());
        let lines: Vec<String> = LogLines::new(input, Path::new("mem.log"))
            .map(|l| l.unwrap())
            .collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("2024-01-01 08:00:00 PUMP-A "));
    }

    #[test]
    fn test_open_log_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.log");

        let err = open_log(&missing).err().expect("missing file must fail");
        match err {
            DevlogError::SourceUnavailable { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_open_log_reads_lines() {
        let dir = TempDir::new().unwrap();
        let path = write_log(dir.path(), "a.log", &["one", "two"]);

        let lines: Vec<String> = open_log(&path).unwrap().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["one", "two"]);
    }
}
