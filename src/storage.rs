//! Pluggable key-value blob stores backing the persistence adapter.
//!
//! A [`BlobStore`] maps short string keys to serialized blobs. It knows
//! nothing about entities; [`crate::persistence`] decides what is stored
//! under which key and how it is encoded.

#[cfg(feature = "storage-file")]
mod file;
mod memory;

#[cfg(feature = "storage-file")]
pub use file::FileStorage;
pub use memory::InMemoryStorage;

use crate::error::Result;

/// Durable key-value storage for serialized collections.
///
/// All methods take `&self`; implementations use interior mutability
/// (e.g. `Mutex`) for thread-safe mutation.
pub trait BlobStore: core::fmt::Debug + Send + Sync {
    /// Returns the blob stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing has been stored under that key.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Stores `blob` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn write(&self, key: &str, blob: &str) -> Result<()>;

    /// Removes the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn remove(&self, key: &str) -> Result<()>;

    /// Removes every stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend fails to write.
    fn clear(&self) -> Result<()>;
}

impl<S: BlobStore + ?Sized> BlobStore for &S {
    #[inline]
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    #[inline]
    fn write(&self, key: &str, blob: &str) -> Result<()> {
        (**self).write(key, blob)
    }

    #[inline]
    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    #[inline]
    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
