//! Investment holding model.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::draft::{self, InvestmentDraft};
use super::{EntityId, InvestmentType};
use crate::error::ValidationError;

/// An investment holding.
///
/// The return rate is computed once, when the holding is created, and
/// stored alongside it; it is never re-derived from the amounts on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    /// Unique identifier.
    pub id: EntityId,
    /// Holding name, e.g. a ticker or bond title.
    pub name: String,
    /// Kind of investment.
    #[serde(rename = "type")]
    pub kind: InvestmentType,
    /// Amount originally invested (> 0).
    pub amount: Decimal,
    /// Current market value (>= 0).
    pub current_value: Decimal,
    /// Return in percent, rounded to one decimal place.
    #[serde(rename = "return")]
    pub return_rate: Decimal,
}

impl Investment {
    /// Validates a draft and builds the holding it describes, freezing its
    /// return rate.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the name is blank, the type is
    /// unknown, the invested amount is not greater than zero, or the
    /// current value is negative or not a number.
    #[inline]
    pub fn from_draft(id: EntityId, draft: &InvestmentDraft) -> Result<Self, ValidationError> {
        let name = draft::required_text("name", &draft.name)?;
        let kind = InvestmentType::from_label(draft.kind.trim()).ok_or_else(|| {
            ValidationError::UnknownInvestmentType {
                value: draft.kind.clone(),
            }
        })?;
        let amount = draft::parse_positive("amount", &draft.amount)?;
        let current_value = draft::parse_non_negative("currentValue", &draft.current_value)?;
        let rate = return_rate(amount, current_value)
            .ok_or(ValidationError::OutOfRange { field: "amount" })?;
        Ok(Self {
            id,
            name,
            kind,
            amount,
            current_value,
            return_rate: rate,
        })
    }

    /// Absolute gain or loss of this holding.
    #[inline]
    #[must_use]
    pub fn gain(&self) -> Decimal {
        self.current_value.saturating_sub(self.amount)
    }
}

/// Computes `(current_value - amount) / amount * 100`, rounded half away
/// from zero to one decimal place.
///
/// Returns `None` when `amount` is not positive or the ratio overflows.
#[inline]
#[must_use]
pub fn return_rate(amount: Decimal, current_value: Decimal) -> Option<Decimal> {
    if amount <= Decimal::ZERO {
        return None;
    }
    let rate = current_value
        .checked_sub(amount)?
        .checked_div(amount)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(rate.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
}
