use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the ledger, goal tracker and session.
///
/// A missing id is not an error anywhere in the core: removing or adjusting
/// something that does not exist is a no-op.
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// Required input was missing or a number could not be parsed. Nothing was
    /// changed and nothing was written.
    #[error("validation failed: {0}")]
    ValidationFailed(String),

    /// The store could not be read or written. When this comes back from a
    /// mutation the in-memory change has already been applied.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
