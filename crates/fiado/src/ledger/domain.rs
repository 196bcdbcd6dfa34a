use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for group members.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(pub String);

/// Identifier wrapper for ledger debts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DebtId(pub String);

/// Debt lifecycle. The transition is one-way (Open -> Paid) and owned by the
/// ledger service; the score engine treats it as read-only input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Open,
    Paid,
}

/// Administrative correction of whether a payment is deemed on time. When
/// present it replaces date arithmetic entirely during scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOverride {
    pub was_on_time: bool,
    pub overridden_by: MemberId,
    pub overridden_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A two-party obligation between members of the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: DebtId,
    pub creditor_id: MemberId,
    pub debtor_id: MemberId,
    /// Current nominal amount; reduced to the paid portion after a partial
    /// settlement.
    pub amount: f64,
    /// Value before partial payments, preferred for score weighting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_amount: Option<f64>,
    pub status: DebtStatus,
    pub due_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    /// Payment timestamp once the debt is paid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<NaiveDateTime>,
    /// Remainder records spawned by a partial payment. Excluded entirely from
    /// scoring: they are derived bookkeeping, not original obligations.
    #[serde(default)]
    pub was_partial_payment: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_override: Option<PaymentOverride>,
}

impl Debt {
    /// Economic size used for value weighting: the pre-payment amount when
    /// known, the current amount otherwise.
    pub fn nominal_amount(&self) -> f64 {
        self.original_amount.unwrap_or(self.amount)
    }

    pub fn involves(&self, member: &MemberId) -> bool {
        &self.creditor_id == member || &self.debtor_id == member
    }

    pub fn is_paid(&self) -> bool {
        self.status == DebtStatus::Paid
    }
}

/// Payload for registering a debt; id, status, and timestamps are assigned by
/// the ledger service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDebt {
    pub creditor_id: MemberId,
    pub debtor_id: MemberId,
    pub amount: f64,
    pub due_date: NaiveDateTime,
    /// Backdated entry support for imports; defaults to the current time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}
