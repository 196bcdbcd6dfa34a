use super::domain::{Debt, DebtId};

/// Storage abstraction so the service module can be exercised in isolation.
/// The score engine needs the full collection, not a pre-filtered view, so
/// spam detection keeps pair-level context.
pub trait LedgerStore: Send + Sync {
    fn insert(&self, debt: Debt) -> Result<Debt, StoreError>;
    fn update(&self, debt: Debt) -> Result<(), StoreError>;
    fn fetch(&self, id: &DebtId) -> Result<Option<Debt>, StoreError>;
    fn all(&self) -> Result<Vec<Debt>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("debt already exists")]
    Conflict,
    #[error("debt not found")]
    NotFound,
    #[error("ledger store unavailable: {0}")]
    Unavailable(String),
}
