//! Savings goals. Independent of the ledger; progress is moved by hand.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::ids::{system_clock, Clock, IdGenerator};
use crate::models::{parse_amount, SavingsGoal};
use crate::store::{self, PersistentStore, GOALS_KEY};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

pub(crate) struct GoalTracker<S> {
    store: S,
    goals: Vec<SavingsGoal>,
    ids: IdGenerator,
    clock: Clock,
}

impl<S: PersistentStore> GoalTracker<S> {
    pub(crate) fn load(store: S) -> Result<Self> {
        Self::load_with_clock(store, system_clock)
    }

    pub(crate) fn load_with_clock(store: S, clock: Clock) -> Result<Self> {
        let goals: Vec<SavingsGoal> = store::load_json(&store, GOALS_KEY)?.unwrap_or_default();
        let ids = IdGenerator::after(goals.iter().map(|g| g.id));
        tracing::debug!(count = goals.len(), "loaded savings goals");
        Ok(Self {
            store,
            goals,
            ids,
            clock,
        })
    }

    /// Create a goal with nothing saved yet. The target must be a positive
    /// number.
    pub(crate) fn add_goal(&mut self, name: &str, target_text: &str) -> Result<SavingsGoal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::ValidationFailed("goal name is required".into()));
        }
        let target = parse_amount(target_text).ok_or_else(|| {
            Error::ValidationFailed(format!("'{}' is not a valid target", target_text.trim()))
        })?;
        if target <= Decimal::ZERO {
            return Err(Error::ValidationFailed(format!(
                "goal target must be positive, got {target}"
            )));
        }

        let goal = SavingsGoal::new(self.ids.next_id((self.clock)()), name.to_string(), target);
        self.goals.push(goal.clone());
        tracing::debug!(id = goal.id, target = %goal.target, "added savings goal");

        self.persist()?;
        Ok(goal)
    }

    pub(crate) fn remove_goal(&mut self, id: i64) -> Result<()> {
        self.goals.retain(|g| g.id != id);
        tracing::debug!(id, "removed savings goal");
        self.persist()
    }

    /// Move progress by `delta`, never letting it drop below zero or past
    /// `Decimal::MAX`. Unknown ids are ignored and nothing is written for them.
    pub(crate) fn adjust_progress(&mut self, id: i64, delta: Decimal) -> Result<()> {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            tracing::debug!(id, "progress ignored, no such goal");
            return Ok(());
        };
        goal.current = goal.current.saturating_add(delta).max(Decimal::ZERO);
        tracing::debug!(id, %delta, current = %goal.current, "adjusted goal progress");
        self.persist()
    }

    pub(crate) fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub(crate) fn get(&self, id: i64) -> Option<&SavingsGoal> {
        self.goals.iter().find(|g| g.id == id)
    }

    fn persist(&self) -> Result<()> {
        store::save_json(&self.store, GOALS_KEY, &self.goals).map_err(|e| {
            tracing::warn!(error = %e, "failed to persist savings goals");
            Error::from(e)
        })
    }
}

/// Share of the target reached, capped at 100. A zero target reads as 0 with
/// nothing saved and 100 otherwise.
pub(crate) fn progress_percentage(goal: &SavingsGoal) -> Decimal {
    if goal.target.is_zero() {
        return if goal.current > Decimal::ZERO {
            HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    goal.current
        .checked_div(goal.target)
        .and_then(|ratio| ratio.checked_mul(HUNDRED))
        .unwrap_or(HUNDRED)
        .clamp(Decimal::ZERO, HUNDRED)
}

#[cfg(test)]
mod tests;
