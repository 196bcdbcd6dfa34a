//! Debt ledger: domain records, the storage abstraction, and the service
//! facade that owns every mutation of a debt's lifecycle. The score engine
//! only ever reads what this module produces.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;

pub use domain::{Debt, DebtId, DebtStatus, MemberId, NewDebt, PaymentOverride};
pub use router::ledger_router;
pub use service::{LedgerService, LedgerServiceError, PartialSettlement};
pub use store::{LedgerStore, StoreError};
