use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{Result, UptimeError};

pub mod stat;

use stat::{StatFields, STAT_LINE_LIMIT};

/// Default number of bytes read from `/proc/<pid>/comm`.
pub const NAME_CAPACITY: usize = 256;

/// Reads one line of at most `limit` bytes. The file is closed on return.
pub(crate) fn read_line_bounded(path: &Path, limit: u64) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file.take(limit));
    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line)?;
    Ok(line)
}

/// A procfs mount. Normally `/proc`, but any directory with the same layout works.
#[derive(Debug, Clone)]
pub struct ProcRoot {
    root: PathBuf,
}

impl ProcRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcRoot { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    fn pid_file(&self, pid: u32, file: &str) -> PathBuf {
        self.root.join(pid.to_string()).join(file)
    }

    /// Start time of `pid` in clock ticks since boot, from field 22 of its stat record.
    pub fn read_start_ticks(&self, pid: u32) -> Result<u64> {
        let path = self.pid_file(pid, "stat");
        let raw = read_line_bounded(&path, STAT_LINE_LIMIT)
            .map_err(|source| UptimeError::ProcessNotFound { pid, source })?;
        let line = String::from_utf8_lossy(&raw);

        let fields = StatFields::parse(&line)
            .ok_or_else(|| UptimeError::malformed(&path, "no parenthesised name field"))?;
        fields
            .start_ticks()
            .map_err(|details| UptimeError::malformed(&path, details))
    }

    /// Raw bytes of the short executable name of `pid`, without the trailing
    /// newline. Names longer than `capacity` bytes are truncated, not rejected.
    pub fn read_name_bytes(&self, pid: u32, capacity: usize) -> Result<Vec<u8>> {
        let path = self.pid_file(pid, "comm");
        let mut raw = read_line_bounded(&path, capacity as u64)
            .map_err(|source| UptimeError::ProcessNotFound { pid, source })?;
        if raw.last() == Some(&b'\n') {
            raw.pop();
        }
        Ok(raw)
    }

    /// Short name of `pid` for display. Bytes that are not UTF-8 are replaced.
    pub fn read_name(&self, pid: u32, capacity: usize) -> Result<String> {
        let raw = self.read_name_bytes(pid, capacity)?;
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }
}

/// What one query learns about a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: u32,
    pub name: String,
    pub start_ticks: u64,
}


#[cfg(test)]
mod tests {
    use super::fixture::write_process;
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_name_and_start_ticks() {
        let temp = TempDir::new().unwrap();
        write_process(temp.path(), 42, "sleep", 50000);
        let proc_root = ProcRoot::new(temp.path());

        assert_eq!(proc_root.read_name(42, NAME_CAPACITY).unwrap(), "sleep");
        assert_eq!(proc_root.read_start_ticks(42).unwrap(), 50000);
    }

    #[test]
    fn missing_process_is_not_found() {
        let temp = TempDir::new().unwrap();
        let proc_root = ProcRoot::new(temp.path());

        assert!(matches!(
            proc_root.read_name(5, NAME_CAPACITY),
            Err(UptimeError::ProcessNotFound { pid: 5, .. })
        ));
        assert!(matches!(
            proc_root.read_start_ticks(5),
            Err(UptimeError::ProcessNotFound { pid: 5, .. })
        ));
    }

    #[test]
    fn long_name_is_truncated() {
        let temp = TempDir::new().unwrap();
        let long = "a".repeat(300);
        write_process(temp.path(), 3, &long, 1);
        let proc_root = ProcRoot::new(temp.path());

        let name = proc_root.read_name(3, NAME_CAPACITY).unwrap();
        assert_eq!(name.len(), NAME_CAPACITY);
        assert!(long.starts_with(&name));

        assert_eq!(proc_root.read_name(3, 4).unwrap(), "aaaa");
    }

    #[test]
    fn name_bytes_are_kept_raw() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("5");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("comm"), b"\xffbin\n").unwrap();
        let proc_root = ProcRoot::new(temp.path());

        assert_eq!(
            proc_root.read_name_bytes(5, NAME_CAPACITY).unwrap(),
            b"\xffbin".to_vec()
        );
        assert_eq!(proc_root.read_name(5, NAME_CAPACITY).unwrap(), "\u{FFFD}bin");
    }

    #[test]
    fn name_without_newline() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("8");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("comm"), "kworker").unwrap();
        let proc_root = ProcRoot::new(temp.path());

        assert_eq!(proc_root.read_name(8, NAME_CAPACITY).unwrap(), "kworker");
    }

    #[test]
    fn short_stat_record_is_malformed() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("11");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stat"), "11 (short) S 1 11 11 0\n").unwrap();
        let proc_root = ProcRoot::new(temp.path());

        assert!(matches!(
            proc_root.read_start_ticks(11),
            Err(UptimeError::MalformedData { .. })
        ));
    }

    #[test]
    fn stat_record_is_bounded() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("12");
        fs::create_dir_all(&dir).unwrap();
        // Name long enough to push field 22 past the read limit.
        let name = "x".repeat(stat::STAT_LINE_LIMIT as usize);
        fs::write(dir.join("stat"), stat::sample_line(12, &name, 99)).unwrap();
        let proc_root = ProcRoot::new(temp.path());

        assert!(matches!(
            proc_root.read_start_ticks(12),
            Err(UptimeError::MalformedData { .. })
        ));
    }
}
