//! Personal finance tracking core.
//!
//! Records income and expense transactions, investment holdings and savings
//! goals, mirrors them to a key-value blob store, and derives the figures a
//! dashboard shows from them.
//!
//! - [`store::RecordStore`] owns the collections of one session and
//!   validates every new entity.
//! - [`persistence`] maps each collection to one blob and falls back to the
//!   [`baseline`] dataset when nothing usable is stored.
//! - [`summary`] holds the pure derivations: totals, savings rate,
//!   per-category spending and goal progress.
//!
//! # Example
//!
//! ```
//! use fintrack::models::InvestmentDraft;
//! use fintrack::storage::InMemoryStorage;
//! use fintrack::store::RecordStore;
//!
//! let mut store = RecordStore::open(InMemoryStorage::new());
//! let investment = store
//!     .add_investment(&InvestmentDraft {
//!         name: "CDB".to_owned(),
//!         kind: "Renda Fixa".to_owned(),
//!         amount: "10000".to_owned(),
//!         current_value: "10450".to_owned(),
//!     })
//!     .unwrap();
//! assert_eq!(investment.return_rate.to_string(), "4.5");
//!
//! let overview = store.overview();
//! assert_eq!(overview.investment_total_return.to_string(), "3570");
//! ```

pub mod baseline;
pub mod error;
pub mod models;
pub mod persistence;
pub mod storage;
pub mod store;
pub mod summary;
