//! Data models for tracked entities.
//!
//! This module contains the three entity types (transactions, investments
//! and goals), the raw drafts they are created from, the newtype
//! [`EntityId`], and enumeration types for constrained values.

mod draft;
mod enums;
mod goal;
mod ids;
mod investment;
mod transaction;

pub use chrono::NaiveDate;
pub use draft::{GoalDraft, InvestmentDraft, MAX_AMOUNT, TransactionDraft};
pub use enums::{
    ExpenseCategory, IncomeCategory, InvestmentType, TransactionCategory, TransactionKind,
};
pub use goal::Goal;
pub use ids::EntityId;
pub use investment::{Investment, return_rate};
pub use rust_decimal::Decimal;
pub use transaction::Transaction;
