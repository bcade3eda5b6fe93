//! JSON-file-based storage backend.
//!
//! Stores each blob in a separate `<key>.json` file under a configurable
//! directory (default: `$XDG_DATA_HOME/fintrack/`).

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::error::{FinanceError, Result};

/// Application name used for the XDG data directory.
const APP_NAME: &str = "fintrack";

/// Extension of blob files.
const BLOB_EXTENSION: &str = "json";

/// Sentinel file used for cross-process file locking.
const LOCK_FILE: &str = "storage.lock";

/// File-backed storage that persists every blob as a JSON file.
///
/// # Concurrency
///
/// Thread safety within a single process is provided by an in-process
/// [`Mutex`]. Cross-process safety is achieved via an advisory file lock
/// on `storage.lock` (using [`std::fs::File::lock`] /
/// [`std::fs::File::lock_shared`]).
///
/// Read operations acquire a shared lock (allowing concurrent readers),
/// while write operations acquire an exclusive lock. Writes go to a
/// temporary file first and are renamed into place, so a crash never
/// leaves a half-written blob behind.
///
/// # File layout
///
/// ```text
/// <dir>/
///   storage.lock          (cross-process lock sentinel)
///   transactions.json
///   investments.json
///   goals.json
/// ```
#[derive(Debug)]
pub struct FileStorage {
    /// Root directory containing all JSON files.
    dir: PathBuf,
    /// Mutex serializing concurrent in-process access.
    lock: Mutex<()>,
    /// Sentinel file for cross-process advisory locking.
    lock_file: fs::File,
}

impl FileStorage {
    /// Creates a new file storage rooted at the given directory.
    ///
    /// Creates the directory (and parents) if it does not exist. Also
    /// opens (or creates) the `storage.lock` sentinel file used for
    /// cross-process advisory locking.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the lock
    /// file cannot be opened.
    #[inline]
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir).map_err(storage_io_error)?;
        let lock_file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(dir.join(LOCK_FILE))
            .map_err(storage_io_error)?;
        tracing::debug!(dir = %dir.display(), "opened file storage");
        Ok(Self {
            dir,
            lock: Mutex::new(()),
            lock_file,
        })
    }

    /// Returns the default XDG-compliant data directory for this application.
    ///
    /// On Linux: `$XDG_DATA_HOME/fintrack/` (typically
    /// `~/.local/share/fintrack/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the platform data directory cannot be determined.
    #[inline]
    pub fn default_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|data_path| data_path.join(APP_NAME))
            .ok_or_else(|| {
                FinanceError::Persistence("could not determine platform data directory".into())
            })
    }

    /// Returns the directory this storage writes to.
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    // ── Private helpers ─────────────────────────────────────────────

    /// Returns the blob file path for a key, rejecting keys that could
    /// escape the storage directory.
    fn blob_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
        if !valid {
            return Err(FinanceError::Persistence(
                format!("invalid storage key: {key:?}").into(),
            ));
        }
        Ok(self.dir.join(format!("{key}.{BLOB_EXTENSION}")))
    }

    /// Acquires an in-process mutex guard and a shared (read) file lock,
    /// executes `op`, then releases the file lock.
    fn with_shared_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock_shared().map_err(storage_io_error)?;
        let result = op();
        // An unlock failure is only reported if `op` succeeded.
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Acquires an in-process mutex guard and an exclusive (write) file
    /// lock, executes `op`, then releases the file lock.
    fn with_exclusive_lock<R, F: FnOnce() -> Result<R>>(&self, op: F) -> Result<R> {
        let _guard: MutexGuard<'_, ()> = self.lock.lock().map_err(|err| lock_poison_error(&err))?;
        self.lock_file.lock().map_err(storage_io_error)?;
        let result = op();
        if let Err(err) = self.lock_file.unlock()
            && result.is_ok()
        {
            return Err(storage_io_error(err));
        }
        result
    }

    /// Lists every blob file currently in the directory.
    fn blob_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(storage_io_error)? {
            let path = entry.map_err(storage_io_error)?.path();
            if path.extension().is_some_and(|ext| ext == BLOB_EXTENSION) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

// ── Free-standing helpers ───────────────────────────────────────────────

/// Wraps an I/O error into a [`FinanceError::Persistence`].
fn storage_io_error(err: std::io::Error) -> FinanceError {
    FinanceError::Persistence(Box::new(err))
}

/// Wraps a mutex poison error into a [`FinanceError::Persistence`].
fn lock_poison_error<T>(err: &std::sync::PoisonError<T>) -> FinanceError {
    FinanceError::Persistence(err.to_string().into())
}

/// Removes a file, treating "not found" as success.
fn remove_if_exists(path: &std::path::Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(storage_io_error(err)),
    }
}

impl super::BlobStore for FileStorage {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.blob_path(key)?;
        self.with_shared_lock(|| match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(storage_io_error(err)),
        })
    }

    #[inline]
    fn write(&self, key: &str, blob: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        let tmp_path = self.dir.join(format!("{key}.{BLOB_EXTENSION}.tmp"));
        self.with_exclusive_lock(|| {
            fs::write(&tmp_path, blob).map_err(storage_io_error)?;
            fs::rename(&tmp_path, &path).map_err(storage_io_error)?;
            tracing::trace!(key, bytes = blob.len(), "wrote blob");
            Ok(())
        })
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        let path = self.blob_path(key)?;
        self.with_exclusive_lock(|| remove_if_exists(&path))
    }

    /// Deletes every blob file.
    ///
    /// The `storage.lock` sentinel is kept.
    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_exclusive_lock(|| {
            for path in self.blob_files()? {
                remove_if_exists(&path)?;
            }
            Ok(())
        })
    }
}
