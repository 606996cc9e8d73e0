use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Denominations offered by the "add progress" controls.
pub(crate) const PROGRESS_STEPS: [i64; 5] = [20, 50, 100, 500, 1000];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct SavingsGoal {
    pub id: i64,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub target: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub current: Decimal,
}

impl SavingsGoal {
    pub fn new(id: i64, name: String, target: Decimal) -> Self {
        Self {
            id,
            name,
            target,
            current: Decimal::ZERO,
        }
    }

    pub fn remaining(&self) -> Decimal {
        (self.target - self.current).max(Decimal::ZERO)
    }

    pub fn is_reached(&self) -> bool {
        self.current >= self.target
    }
}
