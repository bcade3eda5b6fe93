//! Identifier shared by every stored entity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a transaction, investment or goal.
///
/// Fresh ids are derived from the wall clock in Unix milliseconds; the
/// baseline dataset uses small sequential ids. On the wire an id is a bare
/// JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    /// Wraps a raw id.
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Borrows the raw id.
    #[inline]
    #[must_use]
    pub const fn as_inner(&self) -> &i64 {
        &self.0
    }

    /// Returns the raw id.
    #[inline]
    #[must_use]
    pub const fn into_inner(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for EntityId {
    #[inline]
    fn from(value: i64) -> Self {
        Self(value)
    }
}
