//! Derived figures over a ledger snapshot.
//!
//! Everything here is a pure function of its inputs and is recomputed from
//! scratch whenever the ledger changes. Zero amounts count toward neither
//! income nor expenses. Sums saturate at `Decimal::MAX`/`Decimal::MIN`
//! rather than overflow.

use chrono::Local;
use rust_decimal::Decimal;

use crate::models::{Budget, Transaction};

/// Income and expenses for one calendar month. `expenses` is non-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct MonthlySummary {
    pub income: Decimal,
    pub expenses: Decimal,
}

impl MonthlySummary {
    pub fn balance(&self) -> Decimal {
        monthly_balance(self)
    }
}

/// One x-position of the trend chart. Both series are plotted as magnitudes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrendPoint {
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
}

/// Every aggregate the dashboard shows, computed in one pass over a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Overview {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
    pub budget: Budget,
    pub remaining_budget: Decimal,
    pub category_totals: Vec<(String, Decimal)>,
    pub monthly: Vec<(String, MonthlySummary)>,
    pub trend: Vec<TrendPoint>,
}

impl Overview {
    pub fn is_over_budget(&self) -> bool {
        self.remaining_budget < Decimal::ZERO
    }
}

pub(crate) fn total_income(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

pub(crate) fn total_expenses(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
}

pub(crate) fn balance(transactions: &[Transaction]) -> Decimal {
    total_income(transactions).saturating_add(total_expenses(transactions))
}

/// `budget` minus what has been spent. Negative means over budget.
pub(crate) fn remaining_budget(budget: Budget, transactions: &[Transaction]) -> Decimal {
    budget.as_decimal().saturating_add(total_expenses(transactions))
}

/// Net amount per category, in the order categories first appear.
/// Entries without a category are left out.
pub(crate) fn category_totals(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut totals: Vec<(String, Decimal)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.has_category()) {
        match totals.iter_mut().find(|(name, _)| *name == txn.category) {
            Some((_, total)) => *total = total.saturating_add(txn.amount),
            None => totals.push((txn.category.clone(), txn.amount)),
        }
    }
    totals
}

/// Label for the month a transaction was recorded in, e.g. "January 2024".
pub(crate) fn month_label(txn: &Transaction) -> String {
    txn.created_at()
        .with_timezone(&Local)
        .format("%B %Y")
        .to_string()
}

/// Income/expenses per month, in the order months first appear.
pub(crate) fn monthly_summaries(transactions: &[Transaction]) -> Vec<(String, MonthlySummary)> {
    let mut months: Vec<(String, MonthlySummary)> = Vec::new();
    for txn in transactions {
        let label = month_label(txn);
        let idx = match months.iter().position(|(m, _)| *m == label) {
            Some(idx) => idx,
            None => {
                months.push((label, MonthlySummary::default()));
                months.len() - 1
            }
        };
        let entry = &mut months[idx].1;
        if txn.is_income() {
            entry.income = entry.income.saturating_add(txn.amount);
        } else {
            entry.expenses = entry.expenses.saturating_add(txn.amount);
        }
    }
    months
}

pub(crate) fn monthly_balance(entry: &MonthlySummary) -> Decimal {
    entry.income.saturating_add(entry.expenses)
}

pub(crate) fn trend_series(monthly: &[(String, MonthlySummary)]) -> Vec<TrendPoint> {
    monthly
        .iter()
        .map(|(label, entry)| TrendPoint {
            label: label.clone(),
            income: entry.income,
            expenses: entry.expenses.abs(),
        })
        .collect()
}

pub(crate) fn overview(transactions: &[Transaction], budget: Budget) -> Overview {
    let income = total_income(transactions);
    let expenses = total_expenses(transactions);
    let monthly = monthly_summaries(transactions);
    let trend = trend_series(&monthly);
    Overview {
        income,
        expenses,
        balance: balance(transactions),
        budget,
        remaining_budget: remaining_budget(budget, transactions),
        category_totals: category_totals(transactions),
        monthly,
        trend,
    }
}
