use super::error::StoreError;
use may::sync::RwLock;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decision taken for one stored line during [`RecordStore::modify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEdit {
    /// Keep the line verbatim
    Keep,
    /// Replace the line with the given text
    Replace(String),
    /// Remove the line
    Drop,
}

/// Line-oriented record store backed by a single text file.
///
/// One record per line. Creation appends; update and delete read the whole
/// file, compute the new line sequence and overwrite the file. Rewrites are
/// not atomic: a crash mid-write can leave a partially written file.
///
/// All access is serialized through one coroutine-aware `RwLock`. Readers
/// share the read side; `append` and every `modify` cycle hold the write
/// side from the initial read until the rewrite finishes, so concurrent
/// connections never lose each other's updates.
pub struct RecordStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record line, creating the file if absent.
    pub fn append(&self, line: &str) -> Result<(), StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::write(&self.path, e))?;
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        file.write_all(buf.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| StoreError::write(&self.path, e))?;
        debug!(path = %self.path.display(), bytes = buf.len(), "record appended");
        Ok(())
    }

    /// Read every stored line in file order.
    pub fn read_all(&self) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        self.read_lines_unlocked()
    }

    /// Read the whole store file as text, exactly as it sits on disk.
    pub fn read_raw(&self) -> Result<String, StoreError> {
        let _guard = self.lock.read().unwrap_or_else(|e| e.into_inner());
        self.read_raw_unlocked()
    }

    /// Truncate the store and write `lines` back, each terminated by `\n`.
    pub fn rewrite_all(&self, lines: &[String]) -> Result<(), StoreError> {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        self.rewrite_unlocked(lines)
    }

    /// Read-modify-write cycle under the write lock.
    ///
    /// `edit` is called once per stored line. Returns how many lines were
    /// replaced or dropped; when that count is zero the file is left
    /// untouched.
    pub fn modify<F>(&self, mut edit: F) -> Result<usize, StoreError>
    where
        F: FnMut(&str) -> LineEdit,
    {
        let _guard = self.lock.write().unwrap_or_else(|e| e.into_inner());
        let lines = self.read_lines_unlocked()?;

        let mut touched = 0;
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            match edit(&line) {
                LineEdit::Keep => out.push(line),
                LineEdit::Replace(new_line) => {
                    touched += 1;
                    out.push(new_line);
                }
                LineEdit::Drop => touched += 1,
            }
        }

        if touched > 0 {
            self.rewrite_unlocked(&out)?;
        }
        debug!(path = %self.path.display(), touched, "store modified");
        Ok(touched)
    }

    fn read_raw_unlocked(&self) -> Result<String, StoreError> {
        let bytes = fs::read(&self.path).map_err(|e| {
            let err = StoreError::read(&self.path, e);
            if !matches!(err, StoreError::NotFound { .. }) {
                warn!(error = %err, "store read failed");
            }
            err
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn read_lines_unlocked(&self) -> Result<Vec<String>, StoreError> {
        let raw = self.read_raw_unlocked()?;
        Ok(raw.lines().map(str::to_owned).collect())
    }

    fn rewrite_unlocked(&self, lines: &[String]) -> Result<(), StoreError> {
        let mut content = String::with_capacity(lines.iter().map(|l| l.len() + 1).sum());
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)
            .map_err(|e| StoreError::write(&self.path, e))?;
        file.write_all(content.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| {
                let err = StoreError::write(&self.path, e);
                warn!(error = %err, "store rewrite failed");
                err
            })
    }
}
