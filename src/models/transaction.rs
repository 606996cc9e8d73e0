use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One income or expense entry. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Transaction {
    pub id: i64,
    pub description: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    /// Older records only carry `id`; their creation instant is the id read
    /// as epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    pub fn has_category(&self) -> bool {
        !self.category.is_empty()
    }

    /// When the entry was recorded, used for month bucketing.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
            .or_else(|| DateTime::from_timestamp_millis(self.id))
            .unwrap_or(DateTime::UNIX_EPOCH)
    }
}
