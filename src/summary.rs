//! Derived figures computed from the current entity collections.
//!
//! Everything here is a pure function of its inputs: nothing is cached and
//! nothing is stored. Every ratio guards its denominator and falls back to
//! zero instead of failing, and every sum saturates instead of overflowing,
//! so no derivation can error or panic.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::models::{EntityId, ExpenseCategory, Goal, Investment, Transaction, TransactionKind};

/// Savings rate at or above which savings are considered healthy.
const HEALTHY_SAVINGS_RATE: Decimal = dec!(20);

/// Savings rate at or above which savings are considered moderate.
const MODERATE_SAVINGS_RATE: Decimal = dec!(10);

/// Goal progress at or above which a goal is close to completion.
const CLOSE_GOAL_PROGRESS: Decimal = dec!(70);

/// Sums decimals, saturating at the representable bounds.
fn sum<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    values
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Computes `numerator / denominator * 100`, or zero when the denominator is
/// zero or the result is not representable.
fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator
        .checked_div(denominator)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Sums the amounts of all transactions of one kind.
fn total_of_kind(transactions: &[Transaction], kind: TransactionKind) -> Decimal {
    sum(transactions
        .iter()
        .filter(|tx| tx.kind() == kind)
        .map(|tx| tx.amount))
}

/// Sum of all income amounts.
#[inline]
#[must_use]
pub fn total_income(transactions: &[Transaction]) -> Decimal {
    total_of_kind(transactions, TransactionKind::Income)
}

/// Sum of all expense amounts.
#[inline]
#[must_use]
pub fn total_expense(transactions: &[Transaction]) -> Decimal {
    total_of_kind(transactions, TransactionKind::Expense)
}

/// Total income minus total expense.
#[inline]
#[must_use]
pub fn balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions).saturating_sub(total_expense(transactions))
}

/// Sum of the current value of every holding.
#[inline]
#[must_use]
pub fn total_investment_value(investments: &[Investment]) -> Decimal {
    sum(investments.iter().map(|inv| inv.current_value))
}

/// Sum over all holdings of `current_value - amount`.
#[inline]
#[must_use]
pub fn investment_total_return(investments: &[Investment]) -> Decimal {
    sum(investments.iter().map(Investment::gain))
}

/// Sum of the amount already saved across all goals.
#[inline]
#[must_use]
pub fn total_goal_savings(goals: &[Goal]) -> Decimal {
    sum(goals.iter().map(|goal| goal.current))
}

/// Share of income not spent, in percent: `(1 - expense / income) * 100`.
///
/// Returns exactly zero when there is no income, whatever the expenses.
/// The result is not rounded and may be negative.
#[inline]
#[must_use]
pub fn savings_rate(total_income: Decimal, total_expense: Decimal) -> Decimal {
    if total_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    total_expense
        .checked_div(total_income)
        .and_then(|spent| Decimal::ONE.checked_sub(spent))
        .and_then(|kept| kept.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ZERO)
}

/// Progress of a goal in percent, `current / target * 100`.
///
/// Not clamped: an overshooting goal reports more than 100. A goal with a
/// zero target reports zero.
#[inline]
#[must_use]
pub fn goal_progress(goal: &Goal) -> Decimal {
    percent_of(goal.current, goal.target)
}

/// Amount still missing to reach a goal; negative once it is overshot.
#[inline]
#[must_use]
pub fn goal_remaining(goal: &Goal) -> Decimal {
    goal.target.saturating_sub(goal.current)
}

/// Clamps a percentage into `[0, 100]` for use as a progress-bar width.
///
/// Only for rendering; reported percentages are never clamped.
#[inline]
#[must_use]
pub fn progress_width(percent: Decimal) -> Decimal {
    percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

/// Rounds a percentage for display, half away from zero.
#[inline]
#[must_use]
pub fn round_percent(percent: Decimal, decimal_places: u32) -> Decimal {
    percent.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-category expense totals, with labels and values kept index-aligned.
///
/// Categories without any spending are left out of both sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// Categories with spending, in category-set order.
    labels: Vec<ExpenseCategory>,
    /// Total spent per category; `values[i]` belongs to `labels[i]`.
    values: Vec<Decimal>,
}

impl CategoryBreakdown {
    /// Category labels, in category-set order.
    #[inline]
    #[must_use]
    pub fn labels(&self) -> &[ExpenseCategory] {
        &self.labels
    }

    /// Totals, aligned with [`Self::labels`].
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    /// Iterates over `(category, total)` pairs.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, Decimal)> + '_ {
        self.labels.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of categories with spending.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns `true` if nothing was spent in any category.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum of all category totals.
    #[inline]
    #[must_use]
    pub fn total(&self) -> Decimal {
        sum(self.values.iter().copied())
    }

    /// Share of the breakdown total spent in `category`, in percent.
    #[inline]
    #[must_use]
    pub fn share_of(&self, category: ExpenseCategory) -> Decimal {
        self.iter()
            .find(|&(label, _)| label == category)
            .map_or(Decimal::ZERO, |(_, value)| percent_of(value, self.total()))
    }
}

/// Totals expenses per category of `categories`, in that order.
///
/// A category appears in the result only if its total is greater than zero.
#[inline]
#[must_use]
pub fn expense_by_category(
    transactions: &[Transaction],
    categories: &[ExpenseCategory],
) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    for &category in categories {
        let total = sum(transactions
            .iter()
            .filter(|tx| tx.category.as_expense() == Some(category))
            .map(|tx| tx.amount));
        if total > Decimal::ZERO {
            breakdown.labels.push(category);
            breakdown.values.push(total);
        }
    }
    breakdown
}

/// Display tone derived from the sign of an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Zero or positive.
    Success,
    /// Negative.
    Danger,
}

impl Tone {
    /// Tone for an amount: non-negative is success, negative is danger.
    #[inline]
    #[must_use]
    pub fn for_amount(amount: Decimal) -> Self {
        if amount >= Decimal::ZERO {
            Self::Success
        } else {
            Self::Danger
        }
    }
}

/// How far along a goal is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalStatus {
    /// Progress of 100% or more.
    Reached,
    /// Progress of at least 70%.
    Close,
    /// Anything below.
    InProgress,
}

impl GoalStatus {
    /// Classifies an unclamped progress percentage.
    #[inline]
    #[must_use]
    pub fn for_progress(percent: Decimal) -> Self {
        if percent >= Decimal::ONE_HUNDRED {
            Self::Reached
        } else if percent >= CLOSE_GOAL_PROGRESS {
            Self::Close
        } else {
            Self::InProgress
        }
    }
}

/// Qualitative band of a savings rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SavingsTier {
    /// Saving 20% of income or more.
    Healthy,
    /// Saving at least 10% of income.
    Moderate,
    /// Saving less than 10% of income.
    Low,
}

impl SavingsTier {
    /// Classifies a savings rate as displayed, i.e. rounded to one decimal.
    #[inline]
    #[must_use]
    pub fn for_rate(rate: Decimal) -> Self {
        let shown = round_percent(rate, 1);
        if shown >= HEALTHY_SAVINGS_RATE {
            Self::Healthy
        } else if shown >= MODERATE_SAVINGS_RATE {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Derived progress figures of one goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalProgress {
    /// Goal the figures belong to.
    pub id: EntityId,
    /// Unclamped progress in percent.
    pub percent: Decimal,
    /// Progress clamped into `[0, 100]` for rendering.
    pub width: Decimal,
    /// Status band of the progress.
    pub status: GoalStatus,
    /// Amount still missing (negative when overshot).
    pub remaining: Decimal,
}

impl GoalProgress {
    /// Derives the progress figures of a goal.
    #[inline]
    #[must_use]
    pub fn of(goal: &Goal) -> Self {
        let percent = goal_progress(goal);
        Self {
            id: goal.id,
            percent,
            width: progress_width(percent),
            status: GoalStatus::for_progress(percent),
            remaining: goal_remaining(goal),
        }
    }
}

/// One snapshot of every derived figure, valid for a single render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overview {
    /// Sum of income.
    pub total_income: Decimal,
    /// Sum of expenses.
    pub total_expense: Decimal,
    /// Income minus expenses.
    pub balance: Decimal,
    /// Tone of the balance.
    pub balance_tone: Tone,
    /// Unrounded savings rate in percent.
    pub savings_rate: Decimal,
    /// Band of the savings rate.
    pub savings_tier: SavingsTier,
    /// Current value of all holdings.
    pub total_investment_value: Decimal,
    /// Gain or loss across all holdings.
    pub investment_total_return: Decimal,
    /// Amount saved across all goals.
    pub total_goal_savings: Decimal,
    /// Expenses per category, over the full expense category set.
    pub expense_by_category: CategoryBreakdown,
    /// Progress of each goal, in goal order.
    pub goals: Vec<GoalProgress>,
}

impl Overview {
    /// Computes every derived figure from the given collections.
    #[inline]
    #[must_use]
    pub fn compute(
        transactions: &[Transaction],
        investments: &[Investment],
        goals: &[Goal],
    ) -> Self {
        let income = total_income(transactions);
        let expense = total_expense(transactions);
        let net = income.saturating_sub(expense);
        let rate = savings_rate(income, expense);
        Self {
            total_income: income,
            total_expense: expense,
            balance: net,
            balance_tone: Tone::for_amount(net),
            savings_rate: rate,
            savings_tier: SavingsTier::for_rate(rate),
            total_investment_value: total_investment_value(investments),
            investment_total_return: investment_total_return(investments),
            total_goal_savings: total_goal_savings(goals),
            expense_by_category: expense_by_category(transactions, ExpenseCategory::ALL),
            goals: goals.iter().map(GoalProgress::of).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline;
    use crate::models::{IncomeCategory, InvestmentType, NaiveDate, TransactionCategory};

    /// Builds a transaction with the given category and amount.
    fn tx(category: TransactionCategory, amount: Decimal) -> Transaction {
        Transaction {
            id: EntityId::new(1),
            description: "test".to_owned(),
            category,
            amount,
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        }
    }

    /// Builds an income transaction.
    fn income(amount: Decimal) -> Transaction {
        tx(TransactionCategory::Income(IncomeCategory::Salary), amount)
    }

    /// Builds an expense transaction in the given category.
    fn expense(category: ExpenseCategory, amount: Decimal) -> Transaction {
        tx(TransactionCategory::Expense(category), amount)
    }

    /// Builds a goal.
    fn goal(target: Decimal, current: Decimal) -> Goal {
        Goal {
            id: EntityId::new(1),
            name: "goal".to_owned(),
            target,
            current,
            deadline: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
        }
    }

    /// Builds an investment.
    fn investment(amount: Decimal, current_value: Decimal) -> Investment {
        Investment {
            id: EntityId::new(1),
            name: "inv".to_owned(),
            kind: InvestmentType::Stocks,
            amount,
            current_value,
            return_rate: Decimal::ZERO,
        }
    }

    #[test]
    fn dashboard_scenario() {
        let txs = [
            income(dec!(8500)),
            expense(ExpenseCategory::Housing, dec!(2500)),
            expense(ExpenseCategory::Food, dec!(890)),
        ];
        assert_eq!(total_income(&txs), dec!(8500));
        assert_eq!(total_expense(&txs), dec!(3390));
        assert_eq!(balance(&txs), dec!(5110));
        let rate = savings_rate(total_income(&txs), total_expense(&txs));
        assert_eq!(round_percent(rate, 1), dec!(60.1));
        assert_eq!(round_percent(rate, 0), dec!(60));
    }

    #[test]
    fn balance_equals_income_minus_expense() {
        let cases: [&[Transaction]; 3] = [
            &[],
            &[expense(ExpenseCategory::Other, dec!(10.5))],
            &[income(dec!(0.1)), income(dec!(0.2)), expense(ExpenseCategory::Health, dec!(0.3))],
        ];
        for txs in cases {
            assert_eq!(balance(txs), total_income(txs) - total_expense(txs));
        }
        assert_eq!(balance(&[]), Decimal::ZERO);
        let cents = [
            income(dec!(0.1)),
            income(dec!(0.2)),
            expense(ExpenseCategory::Health, dec!(0.3)),
        ];
        assert_eq!(balance(&cents), Decimal::ZERO);
    }

    #[test]
    fn savings_rate_is_zero_without_income() {
        assert_eq!(savings_rate(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(savings_rate(Decimal::ZERO, dec!(5000)), Decimal::ZERO);
    }

    #[test]
    fn savings_rate_can_be_negative() {
        assert_eq!(savings_rate(dec!(1000), dec!(1500)), dec!(-50));
        assert_eq!(savings_rate(dec!(1000), Decimal::ZERO), dec!(100));
    }

    #[test]
    fn savings_rate_overflow_falls_back_to_zero() {
        assert_eq!(
            savings_rate(dec!(0.0000000000000000000000000001), Decimal::MAX),
            Decimal::ZERO
        );
    }

    #[test]
    fn expense_by_category_omits_empty_categories() {
        let txs = [
            expense(ExpenseCategory::Leisure, dec!(55.90)),
            expense(ExpenseCategory::Housing, dec!(2500)),
            expense(ExpenseCategory::Leisure, dec!(44.10)),
            expense(ExpenseCategory::Education, Decimal::ZERO),
            income(dec!(8500)),
        ];
        let breakdown = expense_by_category(&txs, ExpenseCategory::ALL);
        assert_eq!(
            breakdown.labels(),
            [ExpenseCategory::Housing, ExpenseCategory::Leisure]
        );
        assert_eq!(breakdown.values(), [dec!(2500), dec!(100.00)]);
        assert_eq!(breakdown.labels().len(), breakdown.values().len());
        assert_eq!(breakdown.total(), dec!(2600));
        assert_eq!(breakdown.len(), 2);
    }

    #[test]
    fn expense_by_category_follows_given_category_order() {
        let txs = [
            expense(ExpenseCategory::Housing, dec!(1)),
            expense(ExpenseCategory::Food, dec!(2)),
        ];
        let breakdown = expense_by_category(
            &txs,
            &[ExpenseCategory::Food, ExpenseCategory::Clothing, ExpenseCategory::Housing],
        );
        let pairs: Vec<_> = breakdown.iter().collect();
        assert_eq!(
            pairs,
            [
                (ExpenseCategory::Food, dec!(2)),
                (ExpenseCategory::Housing, dec!(1))
            ]
        );
    }

    #[test]
    fn expense_by_category_of_nothing_is_empty() {
        let breakdown = expense_by_category(&[income(dec!(10))], ExpenseCategory::ALL);
        assert!(breakdown.is_empty());
        assert!(breakdown.values().is_empty());
        assert_eq!(breakdown.total(), Decimal::ZERO);
        assert_eq!(breakdown.share_of(ExpenseCategory::Food), Decimal::ZERO);
    }

    #[test]
    fn category_share() {
        let txs = [
            expense(ExpenseCategory::Housing, dec!(75)),
            expense(ExpenseCategory::Food, dec!(25)),
        ];
        let breakdown = expense_by_category(&txs, ExpenseCategory::ALL);
        assert_eq!(breakdown.share_of(ExpenseCategory::Housing), dec!(75));
        assert_eq!(breakdown.share_of(ExpenseCategory::Transport), Decimal::ZERO);
    }

    #[test]
    fn goal_progress_is_unclamped() {
        assert_eq!(goal_progress(&goal(dec!(30000), dec!(15000))), dec!(50));
        let overshot = goal(dec!(30000), dec!(35000));
        let percent = goal_progress(&overshot);
        assert_eq!(round_percent(percent, 1), dec!(116.7));
        assert_eq!(progress_width(percent), dec!(100));
        assert_eq!(goal_remaining(&overshot), dec!(-5000));
    }

    #[test]
    fn goal_progress_with_zero_target_is_zero() {
        assert_eq!(goal_progress(&goal(Decimal::ZERO, dec!(10))), Decimal::ZERO);
    }

    #[test]
    fn progress_width_clamps_both_ends() {
        assert_eq!(progress_width(dec!(-5)), Decimal::ZERO);
        assert_eq!(progress_width(dec!(42.5)), dec!(42.5));
        assert_eq!(progress_width(dec!(250)), dec!(100));
    }

    #[test]
    fn investment_totals() {
        let invs = [
            investment(dec!(10000), dec!(10450)),
            investment(dec!(3250), dec!(3000)),
        ];
        assert_eq!(total_investment_value(&invs), dec!(13450));
        assert_eq!(investment_total_return(&invs), dec!(200));
        assert_eq!(total_investment_value(&[]), Decimal::ZERO);
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let invs = [
            investment(Decimal::ZERO, Decimal::MAX),
            investment(Decimal::ZERO, Decimal::MAX),
        ];
        assert_eq!(total_investment_value(&invs), Decimal::MAX);
    }

    #[test]
    fn tones_and_tiers() {
        assert_eq!(Tone::for_amount(Decimal::ZERO), Tone::Success);
        assert_eq!(Tone::for_amount(dec!(-0.01)), Tone::Danger);

        assert_eq!(GoalStatus::for_progress(dec!(116.7)), GoalStatus::Reached);
        assert_eq!(GoalStatus::for_progress(dec!(100)), GoalStatus::Reached);
        assert_eq!(GoalStatus::for_progress(dec!(70)), GoalStatus::Close);
        assert_eq!(GoalStatus::for_progress(dec!(69.99)), GoalStatus::InProgress);

        assert_eq!(SavingsTier::for_rate(dec!(60.1)), SavingsTier::Healthy);
        assert_eq!(SavingsTier::for_rate(dec!(19.96)), SavingsTier::Healthy);
        assert_eq!(SavingsTier::for_rate(dec!(19.94)), SavingsTier::Moderate);
        assert_eq!(SavingsTier::for_rate(dec!(10)), SavingsTier::Moderate);
        assert_eq!(SavingsTier::for_rate(dec!(9.94)), SavingsTier::Low);
        assert_eq!(SavingsTier::for_rate(dec!(-3)), SavingsTier::Low);
    }

    #[test]
    fn overview_of_baseline() {
        let overview = Overview::compute(
            &baseline::transactions(),
            &baseline::investments(),
            &baseline::goals(),
        );
        assert_eq!(overview.total_income, dec!(11000));
        assert_eq!(overview.total_expense, dec!(3975.9));
        assert_eq!(overview.balance, dec!(7024.1));
        assert_eq!(overview.balance_tone, Tone::Success);
        assert_eq!(round_percent(overview.savings_rate, 1), dec!(63.9));
        assert_eq!(overview.savings_tier, SavingsTier::Healthy);
        assert_eq!(overview.total_investment_value, dec!(37120));
        assert_eq!(overview.investment_total_return, dec!(3120));
        assert_eq!(overview.total_goal_savings, dec!(48500));
        assert_eq!(overview.expense_by_category.len(), 5);
        assert_eq!(overview.goals.len(), 3);
        assert_eq!(overview.goals[0].percent, dec!(50));
        assert_eq!(overview.goals[0].status, GoalStatus::InProgress);
        assert_eq!(overview.goals[2].remaining, dec!(75000));
    }
}
