//! Transaction model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::draft::{self, TransactionDraft};
use super::{EntityId, TransactionCategory, TransactionKind};
use crate::error::ValidationError;

/// An income or expense record.
///
/// Never mutated after creation. On the wire a transaction is the flat
/// object `{id, type, description, category, amount, date}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    /// Unique identifier.
    pub id: EntityId,
    /// Free-text description.
    pub description: String,
    /// Category; also determines whether this is income or expense.
    pub category: TransactionCategory,
    /// Amount (>= 0).
    pub amount: Decimal,
    /// Calendar date of the transaction.
    pub date: NaiveDate,
}

impl Transaction {
    /// Validates a draft and builds the transaction it describes.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the description is blank, the
    /// category is not in the kind's category set, the amount is not a
    /// non-negative number, or the date is not `YYYY-MM-DD`.
    #[inline]
    pub fn from_draft(id: EntityId, draft: &TransactionDraft) -> Result<Self, ValidationError> {
        let description = draft::required_text("description", &draft.description)?;
        let category = TransactionCategory::parse(draft.kind, draft.category.trim())?;
        let amount = draft::parse_non_negative("amount", &draft.amount)?;
        let date = draft::parse_date("date", &draft.date)?;
        Ok(Self {
            id,
            description,
            category,
            amount,
            date,
        })
    }

    /// Returns whether this is income or expense.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        self.category.kind()
    }

    /// Returns `true` for income transactions.
    #[inline]
    #[must_use]
    pub const fn is_income(&self) -> bool {
        matches!(self.category, TransactionCategory::Income(_))
    }
}

/// Flat wire representation of a [`Transaction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransactionRecord {
    /// Unique identifier.
    id: EntityId,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    kind: TransactionKind,
    /// Free-text description.
    description: String,
    /// Category label, checked against `kind` on decode.
    category: String,
    /// Amount.
    amount: Decimal,
    /// Calendar date (`YYYY-MM-DD`).
    date: NaiveDate,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        let category = TransactionCategory::parse(record.kind, &record.category)?;
        if record.amount.is_sign_negative() && !record.amount.is_zero() {
            return Err(ValidationError::Negative { field: "amount" });
        }
        Ok(Self {
            id: record.id,
            description: record.description,
            category,
            amount: record.amount,
            date: record.date,
        })
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            kind: tx.kind(),
            description: tx.description,
            category: tx.category.label().to_owned(),
            amount: tx.amount,
            date: tx.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, IncomeCategory};
    use rust_decimal_macros::dec;

    /// Creates a draft with the given kind, category and amount.
    fn draft(kind: TransactionKind, category: &str, amount: &str) -> TransactionDraft {
        TransactionDraft {
            kind,
            description: "Mercado".to_owned(),
            category: category.to_owned(),
            amount: amount.to_owned(),
            date: "2026-01-08".to_owned(),
        }
    }

    #[test]
    fn deserialize_web_app_blob_entry() {
        let json = r#"{
            "id": 6,
            "type": "expense",
            "description": "Netflix",
            "category": "Lazer",
            "amount": 55.90,
            "date": "2026-01-12"
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.id, EntityId::new(6));
        assert_eq!(tx.kind(), TransactionKind::Expense);
        assert_eq!(
            tx.category,
            TransactionCategory::Expense(ExpenseCategory::Leisure)
        );
        assert_eq!(tx.amount, dec!(55.9));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    }

    #[test]
    fn serialize_uses_flat_shape() {
        let tx = Transaction {
            id: EntityId::new(1),
            description: "Salário".to_owned(),
            category: TransactionCategory::Income(IncomeCategory::Salary),
            amount: dec!(8500.00),
            date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["type"], "income");
        assert_eq!(value["category"], "Salário");
        assert_eq!(value["amount"], "8500.00");
        assert_eq!(value["date"], "2026-01-05");
    }

    #[test]
    fn serialize_roundtrip() {
        let tx = Transaction {
            id: EntityId::new(1_767_225_600_123),
            description: "Farmácia".to_owned(),
            category: TransactionCategory::Expense(ExpenseCategory::Health),
            amount: dec!(180.05),
            date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        };
        let json = serde_json::to_string(&tx).unwrap();
        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, tx);
        assert_eq!(deserialized.amount.to_string(), "180.05");
    }

    #[test]
    fn deserialize_rejects_category_of_other_kind() {
        let json = r#"{"id":1,"type":"income","description":"x","category":"Moradia","amount":1,"date":"2026-01-01"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn deserialize_rejects_negative_amount() {
        let json = r#"{"id":1,"type":"expense","description":"x","category":"Moradia","amount":-1,"date":"2026-01-01"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn from_draft_preserves_fields() {
        let tx = Transaction::from_draft(
            EntityId::new(10),
            &draft(TransactionKind::Expense, "Alimentação", "890.50"),
        )
        .unwrap();
        assert_eq!(tx.id, EntityId::new(10));
        assert_eq!(tx.description, "Mercado");
        assert_eq!(tx.category, TransactionCategory::Expense(ExpenseCategory::Food));
        assert_eq!(tx.amount, dec!(890.50));
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2026, 1, 8).unwrap());
        assert!(!tx.is_income());
    }

    #[test]
    fn from_draft_accepts_zero_amount() {
        let tx = Transaction::from_draft(
            EntityId::new(1),
            &draft(TransactionKind::Income, "Bônus", "0"),
        )
        .unwrap();
        assert!(tx.amount.is_zero());
        assert!(tx.is_income());
    }

    #[test]
    fn from_draft_rejects_invalid_input() {
        let id = EntityId::new(1);
        assert_eq!(
            Transaction::from_draft(id, &draft(TransactionKind::Expense, "Moradia", "-10"))
                .unwrap_err(),
            ValidationError::Negative { field: "amount" }
        );
        assert!(matches!(
            Transaction::from_draft(id, &draft(TransactionKind::Expense, "Moradia", "dez")),
            Err(ValidationError::InvalidNumber { .. })
        ));
        assert!(matches!(
            Transaction::from_draft(id, &draft(TransactionKind::Expense, "Salário", "10")),
            Err(ValidationError::UnknownCategory { .. })
        ));

        let mut blank = draft(TransactionKind::Expense, "Moradia", "10");
        blank.description = "  ".to_owned();
        assert_eq!(
            Transaction::from_draft(id, &blank).unwrap_err(),
            ValidationError::MissingField {
                field: "description"
            }
        );

        let mut bad_date = draft(TransactionKind::Expense, "Moradia", "10");
        bad_date.date = "ontem".to_owned();
        assert!(matches!(
            Transaction::from_draft(id, &bad_date),
            Err(ValidationError::InvalidDate { field: "date", .. })
        ));
    }
}
