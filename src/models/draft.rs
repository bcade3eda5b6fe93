//! Raw, unvalidated input for creating entities.
//!
//! Drafts mirror what a form submits: every free-form field is the raw
//! string the user typed. The parse helpers here are the single
//! parse-and-validate boundary between raw input and typed entities.

use core::str::FromStr as _;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::TransactionKind;
use crate::error::ValidationError;

/// Largest amount accepted from a draft (one quadrillion).
///
/// Keeps every aggregate sum far below the `Decimal` overflow limit.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000_000);

/// Date format accepted for drafts and used on the wire.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input for a new income or expense transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Free-text description (required).
    pub description: String,
    /// Category label; must belong to the category set of `kind`.
    pub category: String,
    /// Amount as typed, e.g. `"55.90"`.
    pub amount: String,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

/// Input for a new investment holding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentDraft {
    /// Holding name (required).
    pub name: String,
    /// Investment type label, e.g. `"Renda Fixa"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Amount invested; must be greater than zero.
    pub amount: String,
    /// Current market value; must not be negative.
    pub current_value: String,
}

/// Input for a new savings goal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    /// Goal name (required).
    pub name: String,
    /// Target amount; must be greater than zero.
    pub target: String,
    /// Amount saved so far; absent or blank means zero.
    pub current: Option<String>,
    /// Deadline, `YYYY-MM-DD`.
    pub deadline: String,
}

/// Trims a required text field, rejecting blank input.
pub(super) fn required_text(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Parses a decimal amount, rejecting non-numbers and out-of-range magnitudes.
///
/// Sign checks are left to the caller since the rules differ per field.
fn parse_amount(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    let invalid = || ValidationError::InvalidNumber {
        field,
        value: raw.to_owned(),
    };
    // `Decimal` allows `_` separators; a typed "1_000" is rejected instead.
    if trimmed.contains('_') {
        return Err(invalid());
    }
    let value = Decimal::from_str(trimmed).map_err(|_err| invalid())?;
    if value.abs() > MAX_AMOUNT {
        return Err(ValidationError::OutOfRange { field });
    }
    Ok(value)
}

/// Parses an amount that must be zero or greater.
pub(super) fn parse_non_negative(
    field: &'static str,
    raw: &str,
) -> Result<Decimal, ValidationError> {
    let value = parse_amount(field, raw)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::Negative { field });
    }
    Ok(value)
}

/// Parses an amount that must be strictly greater than zero.
pub(super) fn parse_positive(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let value = parse_amount(field, raw)?;
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}

/// Parses a `YYYY-MM-DD` calendar date.
pub(super) fn parse_date(field: &'static str, raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|_err| {
        ValidationError::InvalidDate {
            field,
            value: raw.to_owned(),
        }
    })
}
