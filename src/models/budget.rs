use rust_decimal::Decimal;

use crate::error::Error;

/// Monthly spending ceiling. Lives in memory only; a fresh session starts at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Budget(u64);

impl Budget {
    pub fn new(limit: u64) -> Self {
        Self(limit)
    }

    /// Accepts digits only. Empty input clears the budget back to 0.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self(0));
        }
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::ValidationFailed(format!(
                "budget must be a whole non-negative number, got '{text}'"
            )));
        }
        text.parse::<u64>()
            .map(Self::new)
            .map_err(|e| Error::ValidationFailed(format!("budget '{text}' is out of range: {e}")))
    }

    pub fn limit(&self) -> u64 {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
