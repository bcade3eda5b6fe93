//! In-memory storage backend.
//!
//! Provides [`InMemoryStorage`], a thread-safe in-memory implementation of
//! [`super::BlobStore`]. Ideal for unit tests and for sessions that should
//! not touch the disk.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{FinanceError, Result};

/// Thread-safe in-memory blob storage.
///
/// Nothing survives the process; use [`super::FileStorage`] for data that
/// must outlive a session.
///
/// # Example
///
/// ```rust
/// use fintrack::storage::{BlobStore, InMemoryStorage};
///
/// let storage = InMemoryStorage::new();
/// storage.write("goals", "[]").unwrap();
/// assert_eq!(storage.read("goals").unwrap().as_deref(), Some("[]"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    /// Blobs by key, behind a single mutex.
    blobs: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-populated with the given blobs.
    #[inline]
    #[must_use]
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = blobs
            .into_iter()
            .map(|(key, blob)| (key.into(), blob.into()))
            .collect();
        Self {
            blobs: Mutex::new(map),
        }
    }

    /// Returns the number of stored blobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    #[inline]
    pub fn len(&self) -> Result<usize> {
        self.with_lock(|blobs| blobs.len())
    }

    /// Returns `true` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the internal lock is poisoned.
    #[inline]
    pub fn is_empty(&self) -> Result<bool> {
        self.with_lock(|blobs| blobs.is_empty())
    }

    /// Acquires the inner lock and applies a closure.
    fn with_lock<R, F: FnOnce(&mut HashMap<String, String>) -> R>(&self, op: F) -> Result<R> {
        let mut blobs = self.blobs.lock().map_err(|err| lock_error(&err))?;
        Ok(op(&mut blobs))
    }
}

/// Wraps a mutex poison error.
fn lock_error<T>(err: &std::sync::PoisonError<T>) -> FinanceError {
    FinanceError::Persistence(err.to_string().into())
}

impl super::BlobStore for InMemoryStorage {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>> {
        self.with_lock(|blobs| blobs.get(key).cloned())
    }

    #[inline]
    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.with_lock(|blobs| {
            let _previous = blobs.insert(key.to_owned(), blob.to_owned());
        })
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        self.with_lock(|blobs| {
            let _removed = blobs.remove(key);
        })
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        self.with_lock(HashMap::clear)
    }
}
