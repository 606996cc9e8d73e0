mod amount;
mod budget;
mod filter;
mod goal;
mod transaction;

pub(crate) use amount::parse_amount;
pub(crate) use budget::Budget;
pub(crate) use filter::Filter;
pub(crate) use goal::{SavingsGoal, PROGRESS_STEPS};
pub(crate) use transaction::Transaction;
