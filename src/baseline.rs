//! Fixed seed dataset used when durable storage is empty or unreadable.
//!
//! The figures reproduce the tracker's historical sample data exactly,
//! ids included, so a fresh install looks the same as before.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{
    EntityId, ExpenseCategory, Goal, IncomeCategory, Investment, InvestmentType, Transaction,
    TransactionCategory,
};

/// Builds a date from literal parts; only valid dates are passed in.
fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Builds a decimal from an integer mantissa and a scale.
fn amount(mantissa: i64, scale: u32) -> Decimal {
    Decimal::new(mantissa, scale)
}

/// Builds one seed transaction.
fn transaction(
    id: i64,
    description: &str,
    category: TransactionCategory,
    value: Decimal,
    on: NaiveDate,
) -> Transaction {
    Transaction {
        id: EntityId::new(id),
        description: description.to_owned(),
        category,
        amount: value,
        date: on,
    }
}

/// Seed transactions, in stored order.
#[must_use]
pub fn transactions() -> Vec<Transaction> {
    use ExpenseCategory as E;
    use IncomeCategory as I;
    use TransactionCategory::{Expense, Income};

    vec![
        transaction(1, "Salário", Income(I::Salary), amount(8500, 0), date(2026, 1, 5)),
        transaction(2, "Freelance", Income(I::Freelance), amount(2500, 0), date(2026, 1, 10)),
        transaction(3, "Aluguel", Expense(E::Housing), amount(2500, 0), date(2026, 1, 5)),
        transaction(4, "Supermercado", Expense(E::Food), amount(890, 0), date(2026, 1, 8)),
        transaction(5, "Combustível", Expense(E::Transport), amount(350, 0), date(2026, 1, 10)),
        transaction(6, "Netflix", Expense(E::Leisure), amount(559, 1), date(2026, 1, 12)),
        transaction(7, "Farmácia", Expense(E::Health), amount(180, 0), date(2026, 1, 15)),
    ]
}

/// Seed investment holdings.
#[must_use]
pub fn investments() -> Vec<Investment> {
    use InvestmentType as T;

    let holdings: [(i64, &str, InvestmentType, i64, i64, Decimal); 5] = [
        (1, "CDB 120% CDI", T::FixedIncome, 10_000, 10_450, amount(45, 1)),
        (2, "PETR4", T::Stocks, 3_250, 3_875, amount(192, 1)),
        (3, "HGLG11", T::RealEstateFunds, 8_250, 8_615, amount(44, 1)),
        (4, "Tesouro IPCA+ 2029", T::Treasury, 3_500, 3_680, amount(51, 1)),
        (5, "Bitcoin", T::Crypto, 9_000, 10_500, amount(167, 1)),
    ];
    holdings
        .into_iter()
        .map(|(id, name, kind, invested, current, rate)| Investment {
            id: EntityId::new(id),
            name: name.to_owned(),
            kind,
            amount: amount(invested, 0),
            current_value: amount(current, 0),
            return_rate: rate,
        })
        .collect()
}

/// Seed savings goals.
#[must_use]
pub fn goals() -> Vec<Goal> {
    let goal = |id: i64, name: &str, target: i64, current: i64, deadline: NaiveDate| Goal {
        id: EntityId::new(id),
        name: name.to_owned(),
        target: amount(target, 0),
        current: amount(current, 0),
        deadline,
    };

    vec![
        goal(1, "Reserva de Emergência", 30_000, 15_000, date(2026, 6, 30)),
        goal(2, "Viagem Europa", 25_000, 8_500, date(2026, 12, 31)),
        goal(3, "Entrada Apartamento", 100_000, 25_000, date(2028, 12, 31)),
    ]
}
