use chrono::{NaiveDate, NaiveDateTime};

use crate::ledger::domain::{Debt, DebtId, DebtStatus, MemberId, PaymentOverride};
use crate::score::{ScoreEngine, ScoreRules};

pub(super) fn member(id: &str) -> MemberId {
    MemberId(id.to_string())
}

pub(super) fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(12, 0, 0)
        .expect("valid time")
}

pub(super) fn engine() -> ScoreEngine {
    ScoreEngine::new(ScoreRules::default())
}

pub(super) fn open_debt(
    n: u32,
    creditor: &str,
    debtor: &str,
    amount: f64,
    created: NaiveDateTime,
    due: NaiveDateTime,
) -> Debt {
    Debt {
        id: DebtId(format!("debt-{n}")),
        creditor_id: member(creditor),
        debtor_id: member(debtor),
        amount,
        original_amount: None,
        status: DebtStatus::Open,
        due_date: due,
        created_at: created,
        updated_at: None,
        was_partial_payment: false,
        payment_override: None,
    }
}

pub(super) fn paid_debt(
    n: u32,
    creditor: &str,
    debtor: &str,
    amount: f64,
    created: NaiveDateTime,
    due: NaiveDateTime,
    paid_at: NaiveDateTime,
) -> Debt {
    let mut debt = open_debt(n, creditor, debtor, amount, created, due);
    debt.status = DebtStatus::Paid;
    debt.updated_at = Some(paid_at);
    debt
}

pub(super) fn with_override(mut debt: Debt, was_on_time: bool) -> Debt {
    let overridden_at = debt.updated_at.unwrap_or(debt.created_at);
    debt.payment_override = Some(PaymentOverride {
        was_on_time,
        overridden_by: member("admin"),
        overridden_at,
        reason: Some("manual correction".to_string()),
    });
    debt
}
