//! The boundary between the presentation layer and the core.
//!
//! The CLI and TUI turn user input into an [`Intent`], hand it to
//! [`Session::apply`], and re-render from [`Session::overview`] and
//! [`Session::visible_transactions`]. Aggregates are recomputed from the
//! current snapshot on every call.

use rust_decimal::Decimal;

use crate::aggregate::{self, Overview};
use crate::error::{Error, Result};
use crate::goals::GoalTracker;
use crate::ledger::TransactionLedger;
use crate::models::{Budget, Filter, SavingsGoal, Transaction};
use crate::store::PersistentStore;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Intent {
    AddTransaction {
        description: String,
        amount: String,
        category: String,
    },
    DeleteTransaction(i64),
    SetFilter(Filter),
    SetBudget(String),
    AddGoal {
        name: String,
        target: String,
    },
    AdjustGoal {
        id: i64,
        delta: Decimal,
    },
    DeleteGoal(i64),
}

/// What an applied intent produced, for status lines.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    TransactionAdded(Transaction),
    TransactionDeleted(Option<Transaction>),
    FilterChanged(Filter),
    BudgetChanged(Budget),
    GoalAdded(SavingsGoal),
    GoalAdjusted(Option<SavingsGoal>),
    GoalDeleted(Option<SavingsGoal>),
}

pub(crate) struct Session<S> {
    ledger: TransactionLedger<S>,
    goals: GoalTracker<S>,
    budget: Budget,
    filter: Filter,
}

impl<S: PersistentStore + Clone> Session<S> {
    pub(crate) fn load(store: S) -> Result<Self> {
        Ok(Self {
            ledger: TransactionLedger::load(store.clone())?,
            goals: GoalTracker::load(store)?,
            budget: Budget::default(),
            filter: Filter::default(),
        })
    }

    #[cfg(test)]
    pub(crate) fn load_with_clock(store: S, clock: crate::ids::Clock) -> Result<Self> {
        Ok(Self {
            ledger: TransactionLedger::load_with_clock(store.clone(), clock)?,
            goals: GoalTracker::load_with_clock(store, clock)?,
            budget: Budget::default(),
            filter: Filter::default(),
        })
    }
}

impl<S: PersistentStore> Session<S> {
    pub(crate) fn apply(&mut self, intent: Intent) -> Result<Outcome> {
        self.route(intent).inspect_err(|e| {
            if let Error::ValidationFailed(reason) = e {
                tracing::warn!(%reason, "rejected input");
            }
        })
    }

    fn route(&mut self, intent: Intent) -> Result<Outcome> {
        let outcome = match intent {
            Intent::AddTransaction {
                description,
                amount,
                category,
            } => Outcome::TransactionAdded(self.ledger.add(&description, &amount, &category)?),
            Intent::DeleteTransaction(id) => {
                let removed = self.ledger.get(id).cloned();
                self.ledger.remove(id)?;
                Outcome::TransactionDeleted(removed)
            }
            Intent::SetFilter(filter) => {
                self.filter = filter;
                Outcome::FilterChanged(filter)
            }
            Intent::SetBudget(text) => {
                self.budget = Budget::parse(&text)?;
                Outcome::BudgetChanged(self.budget)
            }
            Intent::AddGoal { name, target } => {
                Outcome::GoalAdded(self.goals.add_goal(&name, &target)?)
            }
            Intent::AdjustGoal { id, delta } => {
                self.goals.adjust_progress(id, delta)?;
                Outcome::GoalAdjusted(self.goals.get(id).cloned())
            }
            Intent::DeleteGoal(id) => {
                let removed = self.goals.get(id).cloned();
                self.goals.remove_goal(id)?;
                Outcome::GoalDeleted(removed)
            }
        };
        Ok(outcome)
    }

    pub(crate) fn overview(&self) -> Overview {
        aggregate::overview(self.ledger.all(), self.budget)
    }

    pub(crate) fn visible_transactions(&self) -> Vec<&Transaction> {
        self.ledger.filtered(self.filter)
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        self.ledger.all()
    }

    pub(crate) fn goals(&self) -> &[SavingsGoal] {
        self.goals.goals()
    }

    pub(crate) fn filter(&self) -> Filter {
        self.filter
    }

    pub(crate) fn budget(&self) -> Budget {
        self.budget
    }

    pub(crate) fn transaction_count(&self) -> usize {
        self.ledger.len()
    }
}
