//! The ordered collection of transactions and its write-through persistence.

use crate::error::{Error, Result};
use crate::ids::{system_clock, Clock, IdGenerator};
use crate::models::{parse_amount, Filter, Transaction};
use crate::store::{self, PersistentStore, TRANSACTIONS_KEY};

pub(crate) struct TransactionLedger<S> {
    store: S,
    transactions: Vec<Transaction>,
    ids: IdGenerator,
    clock: Clock,
}

impl<S: PersistentStore> TransactionLedger<S> {
    /// Read the stored collection, or start empty when nothing is stored yet.
    pub(crate) fn load(store: S) -> Result<Self> {
        Self::load_with_clock(store, system_clock)
    }

    pub(crate) fn load_with_clock(store: S, clock: Clock) -> Result<Self> {
        let transactions: Vec<Transaction> =
            store::load_json(&store, TRANSACTIONS_KEY)?.unwrap_or_default();
        let ids = IdGenerator::after(transactions.iter().map(|t| t.id));
        tracing::debug!(count = transactions.len(), "loaded ledger");
        Ok(Self {
            store,
            transactions,
            ids,
            clock,
        })
    }

    /// Validate and append a new entry, then persist the whole collection.
    ///
    /// On `Error::ValidationFailed` nothing changes and nothing is written. On
    /// `Error::Storage` the entry is already in memory.
    pub(crate) fn add(
        &mut self,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> Result<Transaction> {
        let description = description.trim();
        let category = category.trim();
        if description.is_empty() {
            return Err(Error::ValidationFailed("description is required".into()));
        }
        let amount = parse_amount(amount_text).ok_or_else(|| {
            Error::ValidationFailed(format!("'{}' is not a valid amount", amount_text.trim()))
        })?;
        if category.is_empty() {
            return Err(Error::ValidationFailed("category is required".into()));
        }

        let now = (self.clock)();
        let txn = Transaction {
            id: self.ids.next_id(now),
            description: description.to_string(),
            amount,
            category: category.to_string(),
            created_at: Some(now),
        };
        self.transactions.push(txn.clone());
        tracing::debug!(
            id = txn.id,
            amount = %txn.amount,
            category = %txn.category,
            "added transaction"
        );

        self.persist()?;
        Ok(txn)
    }

    /// Drop the entry with `id`. Unknown ids are ignored, but the collection is
    /// still written back.
    pub(crate) fn remove(&mut self, id: i64) -> Result<()> {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        if self.transactions.len() < before {
            tracing::debug!(id, "removed transaction");
        } else {
            tracing::debug!(id, "remove ignored, no such transaction");
        }
        self.persist()
    }

    pub(crate) fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn filtered(&self, filter: Filter) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| filter.matches(t))
            .collect()
    }

    pub(crate) fn get(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub(crate) fn len(&self) -> usize {
        self.transactions.len()
    }

    fn persist(&self) -> Result<()> {
        store::save_json(&self.store, TRANSACTIONS_KEY, &self.transactions).map_err(|e| {
            tracing::warn!(error = %e, "failed to persist transactions");
            Error::from(e)
        })
    }
}
