//! Persistence adapter: mirrors each entity collection to a [`BlobStore`].
//!
//! Every collection lives under one fixed key and is stored as a JSON
//! array. Loading never fails: a missing, unreadable or corrupt blob falls
//! back to the built-in baseline dataset.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::baseline;
use crate::error::Result;
use crate::models::{Goal, Investment, Transaction};
use crate::storage::BlobStore;

/// Storage key of an entity collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    /// The transaction collection.
    Transactions,
    /// The investment collection.
    Investments,
    /// The goal collection.
    Goals,
}

impl CollectionKey {
    /// Every collection key.
    pub const ALL: [Self; 3] = [Self::Transactions, Self::Investments, Self::Goals];

    /// Returns the storage key string.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Investments => "investments",
            Self::Goals => "goals",
        }
    }
}

impl core::fmt::Display for CollectionKey {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entity type that is persisted as one collection.
pub trait Collection: Serialize + DeserializeOwned + Sized {
    /// Key the collection is stored under.
    const KEY: CollectionKey;

    /// Entities used when nothing usable is stored.
    fn baseline() -> Vec<Self>;
}

impl Collection for Transaction {
    const KEY: CollectionKey = CollectionKey::Transactions;

    #[inline]
    fn baseline() -> Vec<Self> {
        baseline::transactions()
    }
}

impl Collection for Investment {
    const KEY: CollectionKey = CollectionKey::Investments;

    #[inline]
    fn baseline() -> Vec<Self> {
        baseline::investments()
    }
}

impl Collection for Goal {
    const KEY: CollectionKey = CollectionKey::Goals;

    #[inline]
    fn baseline() -> Vec<Self> {
        baseline::goals()
    }
}

/// Serializes a collection into its blob form.
///
/// # Errors
///
/// Returns [`crate::error::FinanceError::Serialization`] if encoding fails.
#[inline]
pub fn encode<T: Collection>(items: &[T]) -> Result<String> {
    Ok(serde_json::to_string(items)?)
}

/// Deserializes a blob back into a collection.
///
/// # Errors
///
/// Returns [`crate::error::FinanceError::Serialization`] if the blob is not
/// a valid JSON array of `T`.
#[inline]
pub fn decode<T: Collection>(blob: &str) -> Result<Vec<T>> {
    Ok(serde_json::from_str(blob)?)
}

/// Loads a collection from storage, falling back to the baseline dataset.
///
/// A stored empty array is honoured; only an absent, unreadable or corrupt
/// blob triggers the fallback.
#[inline]
pub fn load<T: Collection, S: BlobStore + ?Sized>(storage: &S) -> Vec<T> {
    let key = T::KEY;
    match storage.read(key.as_str()) {
        Ok(Some(blob)) => match decode(&blob) {
            Ok(items) => {
                tracing::debug!(%key, count = items.len(), "hydrated collection");
                items
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "stored collection is corrupt, using baseline");
                T::baseline()
            }
        },
        Ok(None) => {
            tracing::debug!(%key, "nothing stored, using baseline");
            T::baseline()
        }
        Err(err) => {
            tracing::warn!(%key, error = %err, "failed to read collection, using baseline");
            T::baseline()
        }
    }
}

/// Writes a collection to storage under its key.
///
/// # Errors
///
/// Returns an error if encoding fails or the storage backend fails to write.
#[inline]
pub fn save<T: Collection, S: BlobStore + ?Sized>(storage: &S, items: &[T]) -> Result<()> {
    let blob = encode(items)?;
    storage.write(T::KEY.as_str(), &blob)?;
    tracing::debug!(key = %T::KEY, count = items.len(), "saved collection");
    Ok(())
}
