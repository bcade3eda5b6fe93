//! Error types for the fintrack library.

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FinanceError>;

/// All errors that can occur when using the record store.
#[derive(Debug, thiserror::Error)]
pub enum FinanceError {
    /// A draft was rejected before any entity was created.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Blob storage backend failed to read or write.
    #[error("persistence error: {0}")]
    Persistence(Box<dyn core::error::Error + Send + Sync>),
}

/// Reasons a draft can be rejected by the record store.
///
/// Every variant names the draft field that failed so the caller can point
/// the user at the offending input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field was empty or blank.
    #[error("`{field}` is required")]
    MissingField {
        /// Draft field name.
        field: &'static str,
    },

    /// A numeric field could not be parsed as a decimal number.
    #[error("`{field}` is not a number: {value:?}")]
    InvalidNumber {
        /// Draft field name.
        field: &'static str,
        /// Raw input as submitted.
        value: String,
    },

    /// A field that must be zero or greater was negative.
    #[error("`{field}` must not be negative")]
    Negative {
        /// Draft field name.
        field: &'static str,
    },

    /// A field that must be strictly positive was zero or negative.
    #[error("`{field}` must be greater than zero")]
    NotPositive {
        /// Draft field name.
        field: &'static str,
    },

    /// A numeric field exceeds the supported magnitude.
    #[error("`{field}` is out of the supported range")]
    OutOfRange {
        /// Draft field name.
        field: &'static str,
    },

    /// The category does not belong to the category set of the transaction kind.
    #[error("unknown {kind} category: {value:?}")]
    UnknownCategory {
        /// Transaction kind the category was checked against.
        kind: &'static str,
        /// Raw input as submitted.
        value: String,
    },

    /// The investment type is not one of the supported types.
    #[error("unknown investment type: {value:?}")]
    UnknownInvestmentType {
        /// Raw input as submitted.
        value: String,
    },

    /// A date field is not a valid `YYYY-MM-DD` calendar date.
    #[error("`{field}` is not a valid date (expected YYYY-MM-DD): {value:?}")]
    InvalidDate {
        /// Draft field name.
        field: &'static str,
        /// Raw input as submitted.
        value: String,
    },
}
