use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Please enter a description.")]
    MissingDescription,
    #[error("Description may not contain {0:?}")]
    ReservedCharacter(char),
    #[error("Unknown transaction type `{0}` (expected `in` or `out`)")]
    InvalidKind(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LedgerError {
    /// True for errors raised by input validation, which never mutate the ledger.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            LedgerError::InvalidAmount(_)
                | LedgerError::MissingDescription
                | LedgerError::ReservedCharacter(_)
                | LedgerError::InvalidKind(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
