use super::Transaction;

/// Which slice of the history is on screen. Never persisted and never
/// changes any totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Filter {
    #[default]
    All,
    Income,
    Expenses,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expenses => "expenses",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "a" => Some(Self::All),
            "income" | "in" | "i" => Some(Self::Income),
            "expenses" | "expense" | "out" | "e" => Some(Self::Expenses),
            _ => None,
        }
    }

    pub fn all() -> &'static [Filter] {
        &[Self::All, Self::Income, Self::Expenses]
    }

    /// Cycle order used by the TUI filter key.
    pub fn next(&self) -> Self {
        match self {
            Self::All => Self::Income,
            Self::Income => Self::Expenses,
            Self::Expenses => Self::All,
        }
    }

    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.is_income(),
            Self::Expenses => txn.is_expense(),
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
