//! Record store: the session object owning every entity collection.
//!
//! A [`RecordStore`] is hydrated once from a [`BlobStore`], validates and
//! appends new entities, and mirrors every successful mutation back to the
//! storage as a write-behind copy. The in-memory collections are always the
//! authoritative read source.

use std::collections::HashSet;

use chrono::Utc;

use crate::error::{Result, ValidationError};
use crate::models::{
    EntityId, Goal, GoalDraft, Investment, InvestmentDraft, Transaction, TransactionDraft,
    TransactionKind,
};
use crate::persistence::{self, Collection};
use crate::storage::BlobStore;
use crate::summary::Overview;

/// Number of transactions shown in a "recent activity" list.
pub const RECENT_TRANSACTIONS: usize = 5;

/// Which transactions a listing includes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum KindFilter {
    /// Every transaction.
    #[default]
    All,
    /// Income only.
    Income,
    /// Expenses only.
    Expense,
}

impl KindFilter {
    /// Returns `true` if the transaction passes the filter.
    #[inline]
    #[must_use]
    pub fn matches(self, tx: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => tx.kind() == TransactionKind::Income,
            Self::Expense => tx.kind() == TransactionKind::Expense,
        }
    }
}

impl From<TransactionKind> for KindFilter {
    #[inline]
    fn from(kind: TransactionKind) -> Self {
        match kind {
            TransactionKind::Income => Self::Income,
            TransactionKind::Expense => Self::Expense,
        }
    }
}

/// Source of fresh identifiers.
///
/// Ids follow the wall clock in Unix milliseconds but never repeat: each
/// one is strictly greater than every id issued or loaded before it. Once
/// `i64::MAX` has been seen, the lowest unused positive id is issued instead.
#[derive(Debug, Clone)]
struct IdSequence {
    /// Highest id seen so far.
    last: i64,
    /// Every id issued or loaded so far.
    used: HashSet<i64>,
    /// Wall clock in Unix milliseconds.
    clock: fn() -> i64,
}

impl IdSequence {
    /// Creates a sequence positioned after the highest of `seen`.
    fn after<I: IntoIterator<Item = EntityId>>(seen: I, clock: fn() -> i64) -> Self {
        let used: HashSet<i64> = seen.into_iter().map(EntityId::into_inner).collect();
        let last = used.iter().copied().max().unwrap_or(0);
        Self { last, used, clock }
    }

    /// Returns the id the next entity would get, without consuming it.
    fn peek(&self) -> EntityId {
        let next = match self.last.checked_add(1) {
            Some(after_last) => (self.clock)().max(after_last),
            None => self.lowest_free(),
        };
        EntityId::new(next)
    }

    /// Lowest positive id not yet issued or loaded.
    fn lowest_free(&self) -> i64 {
        (1..=i64::MAX)
            .find(|candidate| !self.used.contains(candidate))
            .unwrap_or_default()
    }

    /// Marks an id as issued.
    fn commit(&mut self, id: EntityId) {
        let raw = id.into_inner();
        self.last = self.last.max(raw);
        let _fresh = self.used.insert(raw);
    }
}

/// Current wall-clock time in Unix milliseconds.
fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// The in-memory collections of one session, mirrored to a [`BlobStore`].
///
/// # Examples
///
/// ```
/// use fintrack::models::{TransactionDraft, TransactionKind};
/// use fintrack::storage::InMemoryStorage;
/// use fintrack::store::RecordStore;
///
/// let mut store = RecordStore::open(InMemoryStorage::new());
/// let tx = store
///     .add_transaction(&TransactionDraft {
///         kind: TransactionKind::Expense,
///         description: "Padaria".to_owned(),
///         category: "Alimentação".to_owned(),
///         amount: "12.50".to_owned(),
///         date: "2026-02-03".to_owned(),
///     })
///     .unwrap();
/// assert_eq!(store.transactions()[0], tx);
/// ```
#[derive(Debug)]
pub struct RecordStore<S: BlobStore> {
    /// Durable mirror of the collections.
    storage: S,
    /// Transactions, newest first.
    transactions: Vec<Transaction>,
    /// Investments, in insertion order.
    investments: Vec<Investment>,
    /// Goals, in insertion order.
    goals: Vec<Goal>,
    /// Identifier source shared by all entity kinds.
    ids: IdSequence,
}

impl<S: BlobStore> RecordStore<S> {
    /// Starts a session by hydrating every collection from `storage`.
    ///
    /// Collections that are missing or unreadable are replaced by the
    /// baseline dataset; this never fails.
    #[tracing::instrument(skip_all)]
    pub fn open(storage: S) -> Self {
        let transactions = persistence::load(&storage);
        let investments = persistence::load(&storage);
        let goals = persistence::load(&storage);
        Self::from_parts(storage, transactions, investments, goals)
    }

    /// Builds a session from explicit collections.
    ///
    /// Nothing is written to `storage` until the first mutation or flush.
    #[inline]
    #[must_use]
    pub fn from_parts(
        storage: S,
        transactions: Vec<Transaction>,
        investments: Vec<Investment>,
        goals: Vec<Goal>,
    ) -> Self {
        let seen = transactions
            .iter()
            .map(|tx| tx.id)
            .chain(investments.iter().map(|inv| inv.id))
            .chain(goals.iter().map(|goal| goal.id));
        let ids = IdSequence::after(seen, now_millis);
        tracing::debug!(
            transactions = transactions.len(),
            investments = investments.len(),
            goals = goals.len(),
            "record store ready"
        );
        Self {
            storage,
            transactions,
            investments,
            goals,
            ids,
        }
    }

    /// Replaces the clock used to derive fresh ids.
    #[inline]
    #[must_use]
    pub const fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.ids.clock = clock;
        self
    }

    /// Validates a draft and prepends the resulting transaction.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if any field is missing or malformed,
    /// the amount is negative, or the category does not belong to the kind.
    /// The store is unchanged in that case.
    #[inline]
    pub fn add_transaction(
        &mut self,
        draft: &TransactionDraft,
    ) -> core::result::Result<Transaction, ValidationError> {
        let tx = Transaction::from_draft(self.ids.peek(), draft)?;
        self.ids.commit(tx.id);
        self.transactions.insert(0, tx.clone());
        tracing::debug!(id = %tx.id, kind = %tx.kind(), "added transaction");
        self.persist(&self.transactions);
        Ok(tx)
    }

    /// Validates a draft and appends the resulting investment, freezing its
    /// return rate.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the amount is not strictly positive,
    /// the current value is negative, a number fails to parse, or the type is
    /// unknown. The store is unchanged in that case.
    #[inline]
    pub fn add_investment(
        &mut self,
        draft: &InvestmentDraft,
    ) -> core::result::Result<Investment, ValidationError> {
        let investment = Investment::from_draft(self.ids.peek(), draft)?;
        self.ids.commit(investment.id);
        self.investments.push(investment.clone());
        tracing::debug!(
            id = %investment.id,
            return_rate = %investment.return_rate,
            "added investment"
        );
        self.persist(&self.investments);
        Ok(investment)
    }

    /// Validates a draft and appends the resulting goal.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the target is not strictly positive,
    /// the current amount is negative, or a field is missing or malformed.
    /// The store is unchanged in that case.
    #[inline]
    pub fn add_goal(&mut self, draft: &GoalDraft) -> core::result::Result<Goal, ValidationError> {
        let goal = Goal::from_draft(self.ids.peek(), draft)?;
        self.ids.commit(goal.id);
        self.goals.push(goal.clone());
        tracing::debug!(id = %goal.id, "added goal");
        self.persist(&self.goals);
        Ok(goal)
    }

    /// All transactions, newest first.
    #[inline]
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// All investments, in insertion order.
    #[inline]
    #[must_use]
    pub fn investments(&self) -> &[Investment] {
        &self.investments
    }

    /// All goals, in insertion order.
    #[inline]
    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// The `count` most recent transactions (fewer if there are not enough).
    #[inline]
    #[must_use]
    pub fn recent_transactions(&self, count: usize) -> &[Transaction] {
        self.transactions.get(..count).unwrap_or(&self.transactions)
    }

    /// Transactions passing `filter`, newest first.
    #[inline]
    pub fn transactions_of(&self, filter: KindFilter) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |tx| filter.matches(tx))
    }

    /// Computes every derived figure over the current collections.
    #[inline]
    #[must_use]
    pub fn overview(&self) -> Overview {
        Overview::compute(&self.transactions, &self.investments, &self.goals)
    }

    /// Returns the storage backend.
    #[inline]
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Writes every collection to storage.
    ///
    /// All three collections are attempted even if one fails.
    ///
    /// # Errors
    ///
    /// Returns the first persistence or serialization failure.
    #[tracing::instrument(skip_all)]
    pub fn flush(&self) -> Result<()> {
        let results = [
            persistence::save(&self.storage, &self.transactions),
            persistence::save(&self.storage, &self.investments),
            persistence::save(&self.storage, &self.goals),
        ];
        results.into_iter().collect()
    }

    /// Ends the session with a final flush and hands back the storage.
    ///
    /// # Errors
    ///
    /// Returns the first failure of the final flush.
    #[inline]
    pub fn close(self) -> Result<S> {
        self.flush()?;
        Ok(self.storage)
    }

    /// Mirrors one collection to storage; failures are logged, not raised.
    fn persist<T: Collection>(&self, items: &[T]) {
        if let Err(err) = persistence::save(&self.storage, items) {
            tracing::warn!(
                key = %T::KEY,
                error = %err,
                "failed to save collection, keeping in-memory state"
            );
        }
    }
}
