//! Enumeration types for constrained values.
//!
//! Every enumeration is stored by its label, verbatim, so blobs written by
//! earlier versions of the tracker keep loading.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Defines a `Copy` enum whose variants serialize as fixed labels.
///
/// Generates `ALL` (declaration order), `label()`, `from_label()` and a
/// `Display` impl printing the label.
macro_rules! define_labeled_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident => $label:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Returns the label this variant is stored and displayed as.
            #[inline]
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Looks up a variant by its exact label.
            #[inline]
            #[must_use]
            pub fn from_label(label: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|variant| variant.label() == label)
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

define_labeled_enum! {
    /// Direction of a transaction.
    TransactionKind {
        /// Money received.
        Income => "income",
        /// Money spent.
        Expense => "expense",
    }
}

define_labeled_enum! {
    /// Categories available to income transactions.
    IncomeCategory {
        /// Salary.
        Salary => "Salário",
        /// Freelance work.
        Freelance => "Freelance",
        /// Investment income.
        Investments => "Investimentos",
        /// Rent received.
        Rent => "Aluguel",
        /// Bonus.
        Bonus => "Bônus",
        /// Anything else.
        Other => "Outros",
    }
}

define_labeled_enum! {
    /// Categories available to expense transactions.
    ///
    /// Declaration order is the order of the per-category breakdown.
    ExpenseCategory {
        /// Housing.
        Housing => "Moradia",
        /// Food and groceries.
        Food => "Alimentação",
        /// Transport.
        Transport => "Transporte",
        /// Health.
        Health => "Saúde",
        /// Education.
        Education => "Educação",
        /// Leisure and entertainment.
        Leisure => "Lazer",
        /// Clothing.
        Clothing => "Vestuário",
        /// Anything else.
        Other => "Outros",
    }
}

define_labeled_enum! {
    /// Kind of investment holding.
    InvestmentType {
        /// Fixed income (CDB, LCI, ...).
        FixedIncome => "Renda Fixa",
        /// Stocks.
        Stocks => "Ações",
        /// Real-estate investment funds.
        RealEstateFunds => "FIIs",
        /// Government treasury bonds.
        Treasury => "Tesouro",
        /// Crypto assets.
        Crypto => "Cripto",
        /// Exchange-traded funds.
        Etf => "ETF",
    }
}

/// A transaction category, tied to the kind of transaction it belongs to.
///
/// Holding the category set inside the variant makes a kind/category
/// mismatch unrepresentable: the transaction kind is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionCategory {
    /// Category of an income transaction.
    Income(IncomeCategory),
    /// Category of an expense transaction.
    Expense(ExpenseCategory),
}

impl TransactionCategory {
    /// Parses a category label against the category set of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownCategory`] if the label is not a
    /// member of that kind's category set.
    #[inline]
    pub fn parse(kind: TransactionKind, label: &str) -> Result<Self, ValidationError> {
        let found = match kind {
            TransactionKind::Income => IncomeCategory::from_label(label).map(Self::Income),
            TransactionKind::Expense => ExpenseCategory::from_label(label).map(Self::Expense),
        };
        found.ok_or_else(|| ValidationError::UnknownCategory {
            kind: kind.label(),
            value: label.to_owned(),
        })
    }

    /// Returns the transaction kind this category belongs to.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> TransactionKind {
        match self {
            Self::Income(_) => TransactionKind::Income,
            Self::Expense(_) => TransactionKind::Expense,
        }
    }

    /// Returns the stored label of the category.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Income(category) => category.label(),
            Self::Expense(category) => category.label(),
        }
    }

    /// Returns the expense category, if this is one.
    #[inline]
    #[must_use]
    pub const fn as_expense(self) -> Option<ExpenseCategory> {
        match self {
            Self::Expense(category) => Some(category),
            Self::Income(_) => None,
        }
    }
}

impl core::fmt::Display for TransactionCategory {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_kind_serde_roundtrip() {
        let variants = [
            (TransactionKind::Income, r#""income""#),
            (TransactionKind::Expense, r#""expense""#),
        ];
        for (variant, expected_json) in variants {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, expected_json);
            let deserialized: TransactionKind = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn expense_category_serializes_verbatim_label() {
        let json = serde_json::to_string(&ExpenseCategory::Food).unwrap();
        assert_eq!(json, r#""Alimentação""#);
        let deserialized: ExpenseCategory = serde_json::from_str(r#""Saúde""#).unwrap();
        assert_eq!(deserialized, ExpenseCategory::Health);
    }

    #[test]
    fn investment_type_all_variants_roundtrip() {
        for &variant in InvestmentType::ALL {
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.label()));
            let deserialized: InvestmentType = serde_json::from_str(&json).unwrap();
            assert_eq!(deserialized, variant);
        }
    }

    #[test]
    fn expense_categories_keep_declaration_order() {
        let labels: Vec<&str> = ExpenseCategory::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            [
                "Moradia",
                "Alimentação",
                "Transporte",
                "Saúde",
                "Educação",
                "Lazer",
                "Vestuário",
                "Outros"
            ]
        );
        assert_eq!(IncomeCategory::ALL.len(), 6);
        assert_eq!(InvestmentType::ALL.len(), 6);
    }

    #[test]
    fn from_label_is_exact() {
        assert_eq!(
            InvestmentType::from_label("Renda Fixa"),
            Some(InvestmentType::FixedIncome)
        );
        assert_eq!(InvestmentType::from_label("renda fixa"), None);
        assert_eq!(IncomeCategory::from_label("Bônus"), Some(IncomeCategory::Bonus));
    }

    #[test]
    fn category_parse_respects_kind() {
        let category = TransactionCategory::parse(TransactionKind::Expense, "Moradia").unwrap();
        assert_eq!(category, TransactionCategory::Expense(ExpenseCategory::Housing));
        assert_eq!(category.kind(), TransactionKind::Expense);
        assert_eq!(category.as_expense(), Some(ExpenseCategory::Housing));

        let err = TransactionCategory::parse(TransactionKind::Income, "Moradia").unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownCategory {
                kind: "income",
                value: "Moradia".to_owned(),
            }
        );
    }

    #[test]
    fn shared_label_resolves_per_kind() {
        let income = TransactionCategory::parse(TransactionKind::Income, "Outros").unwrap();
        let expense = TransactionCategory::parse(TransactionKind::Expense, "Outros").unwrap();
        assert_ne!(income, expense);
        assert_eq!(income.label(), expense.label());
        assert_eq!(income.as_expense(), None);
    }

    #[test]
    fn invalid_investment_type_fails() {
        let result = serde_json::from_str::<InvestmentType>(r#""Poupança""#);
        assert!(result.is_err());
    }
}
