//! Append-only trace file with numbered size-based rotation.
//!
//! When the active file grows past its limit it is renamed to `<name>.1`,
//! existing backups shift up by one, and the oldest beyond the retention
//! count is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const MAX_FILE_SIZE_BYTES: u64 = 4 * 1024 * 1024;
const MAX_BACKUP_FILES: usize = 3;

pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Mutex<Option<File>>,
}

impl RotatingFile {
    pub fn new(path: PathBuf) -> Self {
        Self::with_limits(path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    pub const fn with_limits(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: Mutex::new(None),
        }
    }

    /// Appends `line` plus a newline, rotating first if the file is full.
    pub fn append_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("trace file lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() >= self.max_bytes) {
            *file = None;
            self.rotate()?;
        }

        let handle = match file.take() {
            Some(handle) => handle,
            None => OpenOptions::new().create(true).append(true).open(&self.path)?,
        };
        let handle = file.insert(handle);

        writeln!(handle, "{line}")?;
        handle.flush()
    }

    fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    fn rotate(&self) -> io::Result<()> {
        if self.backups == 0 {
            return remove_if_exists(&self.path);
        }

        remove_if_exists(&self.backup_path(self.backups))?;
        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(&from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .field("backups", &self.backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let file = RotatingFile::new(path.clone());

        file.append_line("one").unwrap();
        file.append_line("two").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.jsonl");
        let file = RotatingFile::with_limits(path.clone(), 4, 2);

        for line in ["aaaa", "bbbb", "cccc", "dddd"] {
            file.append_line(line).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "dddd\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.jsonl.1")).unwrap(), "cccc\n");
        assert_eq!(fs::read_to_string(dir.path().join("trace.jsonl.2")).unwrap(), "bbbb\n");
        assert!(!dir.path().join("trace.jsonl.3").exists());
    }
}
