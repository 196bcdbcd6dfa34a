use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::domain::{Debt, DebtId, DebtStatus, MemberId, NewDebt, PaymentOverride};
use super::store::{LedgerStore, StoreError};
use crate::score::{ScoreDetails, ScoreEngine, ScoreRules};

/// Service composing the ledger store and the score engine. It is the single
/// authority over debt mutations and the only place that invokes scoring, so
/// reporting tools and HTTP handlers never duplicate the algorithm.
pub struct LedgerService<S> {
    store: Arc<S>,
    engine: ScoreEngine,
}

static DEBT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_debt_id() -> DebtId {
    let id = DEBT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    DebtId(format!("debt-{id:06}"))
}

fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<S> LedgerService<S>
where
    S: LedgerStore + 'static,
{
    pub fn new(store: Arc<S>, rules: ScoreRules) -> Self {
        Self {
            store,
            engine: ScoreEngine::new(rules),
        }
    }

    pub fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Register a debt between two distinct members. The engine itself does
    /// not enforce party distinctness, so the service must.
    pub fn record_debt(&self, new_debt: NewDebt) -> Result<Debt, LedgerServiceError> {
        if new_debt.creditor_id == new_debt.debtor_id {
            return Err(LedgerServiceError::SameParty);
        }
        if new_debt.amount <= 0.0 {
            return Err(LedgerServiceError::NonPositiveAmount);
        }

        let debt = Debt {
            id: next_debt_id(),
            creditor_id: new_debt.creditor_id,
            debtor_id: new_debt.debtor_id,
            amount: new_debt.amount,
            original_amount: None,
            status: DebtStatus::Open,
            due_date: new_debt.due_date,
            created_at: new_debt.created_at.unwrap_or_else(now_local),
            updated_at: None,
            was_partial_payment: false,
            payment_override: None,
        };

        Ok(self.store.insert(debt)?)
    }

    /// Mark a debt as paid in full. The transition is one-way.
    pub fn settle(
        &self,
        id: &DebtId,
        paid_at: Option<NaiveDateTime>,
    ) -> Result<Debt, LedgerServiceError> {
        let mut debt = self.fetch_existing(id)?;
        if debt.is_paid() {
            return Err(LedgerServiceError::AlreadySettled);
        }

        debt.status = DebtStatus::Paid;
        debt.updated_at = Some(paid_at.unwrap_or_else(now_local));
        self.store.update(debt.clone())?;
        Ok(debt)
    }

    /// Settle the paid portion of a debt and spawn an excluded remainder
    /// record for the outstanding balance. The settled record keeps the
    /// pre-payment value in `original_amount` so weighting is unaffected.
    pub fn record_partial_payment(
        &self,
        id: &DebtId,
        paid_amount: f64,
        paid_at: Option<NaiveDateTime>,
    ) -> Result<PartialSettlement, LedgerServiceError> {
        let mut debt = self.fetch_existing(id)?;
        if debt.is_paid() {
            return Err(LedgerServiceError::AlreadySettled);
        }
        if paid_amount <= 0.0 || paid_amount >= debt.amount {
            return Err(LedgerServiceError::InvalidPartialAmount);
        }

        let paid_at = paid_at.unwrap_or_else(now_local);
        let outstanding = debt.amount - paid_amount;

        debt.original_amount = Some(debt.nominal_amount());
        debt.amount = paid_amount;
        debt.status = DebtStatus::Paid;
        debt.updated_at = Some(paid_at);
        self.store.update(debt.clone())?;

        let remainder = Debt {
            id: next_debt_id(),
            creditor_id: debt.creditor_id.clone(),
            debtor_id: debt.debtor_id.clone(),
            amount: outstanding,
            original_amount: None,
            status: DebtStatus::Open,
            due_date: debt.due_date,
            created_at: paid_at,
            updated_at: None,
            was_partial_payment: true,
            payment_override: None,
        };
        let remainder = self.store.insert(remainder)?;

        Ok(PartialSettlement {
            settled: debt,
            remainder,
        })
    }

    /// Administrative correction of payment timing. Only settled debts can be
    /// corrected; the score must be recomputed afterwards to reflect it.
    pub fn override_payment(
        &self,
        id: &DebtId,
        correction: PaymentOverride,
    ) -> Result<Debt, LedgerServiceError> {
        let mut debt = self.fetch_existing(id)?;
        if !debt.is_paid() {
            return Err(LedgerServiceError::NotSettled);
        }

        debt.payment_override = Some(correction);
        self.store.update(debt.clone())?;
        Ok(debt)
    }

    /// Remove a correction. Like `override_payment` this refuses debts that
    /// were never settled; on settled debts clearing is idempotent whether or
    /// not an override is present.
    pub fn clear_override(&self, id: &DebtId) -> Result<Debt, LedgerServiceError> {
        let mut debt = self.fetch_existing(id)?;
        if !debt.is_paid() {
            return Err(LedgerServiceError::NotSettled);
        }
        debt.payment_override = None;
        self.store.update(debt.clone())?;
        Ok(debt)
    }

    /// Batch maintenance operation: drop every override in the ledger.
    /// Returns how many debts were touched.
    pub fn clear_all_overrides(&self) -> Result<usize, LedgerServiceError> {
        let mut cleared = 0;
        for mut debt in self.store.all()? {
            if debt.payment_override.is_some() {
                debt.payment_override = None;
                self.store.update(debt)?;
                cleared += 1;
            }
        }
        Ok(cleared)
    }

    /// Score a member against the current wall clock.
    pub fn score(&self, member: &MemberId) -> Result<ScoreDetails, LedgerServiceError> {
        let debts = self.store.all()?;
        Ok(self.engine.score(member, &debts))
    }

    /// Deterministic scoring for reports and tests: the evaluation instant is
    /// supplied by the caller.
    pub fn score_at(
        &self,
        member: &MemberId,
        now: NaiveDateTime,
    ) -> Result<ScoreDetails, LedgerServiceError> {
        let debts = self.store.all()?;
        Ok(self.engine.score_at(member, &debts, now))
    }

    fn fetch_existing(&self, id: &DebtId) -> Result<Debt, LedgerServiceError> {
        Ok(self.store.fetch(id)?.ok_or(StoreError::NotFound)?)
    }
}

/// Result of a partial payment: the settled original plus the spawned
/// remainder record that scoring ignores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialSettlement {
    pub settled: Debt,
    pub remainder: Debt,
}

/// Error raised by the ledger service.
#[derive(Debug, thiserror::Error)]
pub enum LedgerServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("creditor and debtor must be different members")]
    SameParty,
    #[error("debt amount must be positive")]
    NonPositiveAmount,
    #[error("debt is already settled")]
    AlreadySettled,
    #[error("debt is not settled")]
    NotSettled,
    #[error("partial payment must be positive and below the outstanding amount")]
    InvalidPartialAmount,
}
