//! Savings goal model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EntityId;
use super::draft::{self, GoalDraft};
use crate::error::ValidationError;

/// A savings goal with a target amount and a deadline.
///
/// `current` may exceed `target`; overshoot is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier.
    pub id: EntityId,
    /// Goal name.
    pub name: String,
    /// Amount to reach (> 0).
    pub target: Decimal,
    /// Amount saved so far (>= 0).
    #[serde(default)]
    pub current: Decimal,
    /// Date by which the target should be reached.
    pub deadline: NaiveDate,
}

impl Goal {
    /// Validates a draft and builds the goal it describes.
    ///
    /// A missing or blank `current` amount is treated as zero.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is blank, the target is not
    /// greater than zero, the current amount is negative or not a number, or
    /// the deadline is not `YYYY-MM-DD`.
    #[inline]
    pub fn from_draft(id: EntityId, draft: &GoalDraft) -> Result<Self, ValidationError> {
        let name = draft::required_text("name", &draft.name)?;
        let target = draft::parse_positive("target", &draft.target)?;
        let current = match draft.current.as_deref().map(str::trim) {
            None | Some("") => Decimal::ZERO,
            Some(raw) => draft::parse_non_negative("current", raw)?,
        };
        let deadline = draft::parse_date("deadline", &draft.deadline)?;
        Ok(Self {
            id,
            name,
            target,
            current,
            deadline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Creates a draft with the given target and current amount.
    fn draft(target: &str, current: Option<&str>) -> GoalDraft {
        GoalDraft {
            name: "Reserva de Emergência".to_owned(),
            target: target.to_owned(),
            current: current.map(str::to_owned),
            deadline: "2026-06-30".to_owned(),
        }
    }

    #[test]
    fn from_draft_defaults_current_to_zero() {
        let goal = Goal::from_draft(EntityId::new(1), &draft("30000", None)).unwrap();
        assert_eq!(goal.current, Decimal::ZERO);
        let goal = Goal::from_draft(EntityId::new(1), &draft("30000", Some("  "))).unwrap();
        assert_eq!(goal.current, Decimal::ZERO);
    }

    #[test]
    fn from_draft_keeps_overshoot() {
        let goal = Goal::from_draft(EntityId::new(1), &draft("30000", Some("35000"))).unwrap();
        assert_eq!(goal.target, dec!(30000));
        assert_eq!(goal.current, dec!(35000));
        assert_eq!(goal.deadline, NaiveDate::from_ymd_opt(2026, 6, 30).unwrap());
    }

    #[test]
    fn from_draft_rejects_invalid_amounts() {
        let id = EntityId::new(1);
        assert_eq!(
            Goal::from_draft(id, &draft("0", None)).unwrap_err(),
            ValidationError::NotPositive { field: "target" }
        );
        assert_eq!(
            Goal::from_draft(id, &draft("-100", None)).unwrap_err(),
            ValidationError::NotPositive { field: "target" }
        );
        assert!(matches!(
            Goal::from_draft(id, &draft("trinta mil", None)),
            Err(ValidationError::InvalidNumber { field: "target", .. })
        ));
        assert_eq!(
            Goal::from_draft(id, &draft("1000", Some("-1"))).unwrap_err(),
            ValidationError::Negative { field: "current" }
        );
    }

    #[test]
    fn deserialize_without_current_defaults_to_zero() {
        let json =
            r#"{"id":3,"name":"Entrada Apartamento","target":100000,"deadline":"2028-12-31"}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.current, Decimal::ZERO);
        assert_eq!(goal.target, dec!(100000));
    }

    #[test]
    fn serialize_roundtrip() {
        let goal = Goal {
            id: EntityId::new(2),
            name: "Viagem Europa".to_owned(),
            target: dec!(25000.00),
            current: dec!(8500.50),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        };
        let json = serde_json::to_string(&goal).unwrap();
        assert!(json.contains(r#""deadline":"2026-12-31""#));
        let deserialized: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, goal);
    }
}
