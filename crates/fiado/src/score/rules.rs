//! Per-debt rule evaluation: the creditor-side and debtor-side branches that
//! turn one debt into point events, plus the single-debt bonus cap.

use chrono::NaiveDateTime;

use crate::ledger::domain::{Debt, DebtStatus, MemberId, PaymentOverride};

use super::config::ScoreRules;
use super::spam::SpamTracker;
use super::weight::weighted;
use super::ScoreEvent;

const DEBT_POINT_CAP: f64 = 20.0;
const DEFAULT_AFTER_DAYS: i64 = 60;
const DAYS_PER_WEEK: i64 = 7;

/// Net contribution of a single debt plus its audit events.
#[derive(Debug, Default)]
pub(crate) struct DebtContribution {
    pub(crate) points: f64,
    pub(crate) events: Vec<ScoreEvent>,
}

impl DebtContribution {
    fn push(&mut self, date: NaiveDateTime, points: f64, reason: String, debt: &Debt) {
        if points == 0.0 {
            return;
        }
        self.points += points;
        self.events
            .push(ScoreEvent::new(date, points, reason, Some(debt.id.clone())));
    }
}

/// Creditor-side override outcome: a `true` correction restores the on-time
/// bonus; a `false` one yields nothing for the creditor.
enum CreditorOverrideOutcome {
    Bonus(f64),
    Nothing,
}

/// Debtor-side override outcome always resolves: the on-time bonus when
/// corrected in the debtor's favor, one fixed severe penalty otherwise.
enum DebtorOverrideOutcome {
    Bonus(f64),
    FixedPenalty(f64),
}

fn creditor_override_outcome(
    correction: &PaymentOverride,
    rules: &ScoreRules,
) -> CreditorOverrideOutcome {
    if correction.was_on_time {
        CreditorOverrideOutcome::Bonus(rules.payment_bonus.on_time)
    } else {
        CreditorOverrideOutcome::Nothing
    }
}

fn debtor_override_outcome(
    correction: &PaymentOverride,
    rules: &ScoreRules,
) -> DebtorOverrideOutcome {
    if correction.was_on_time {
        DebtorOverrideOutcome::Bonus(rules.debtor_bonus.on_time)
    } else {
        DebtorOverrideOutcome::FixedPenalty(rules.penalties.late_30_plus)
    }
}

/// Whole days between two instants, both truncated to midnight first.
fn day_diff(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
    later.date().signed_duration_since(earlier.date()).num_days()
}

/// Evaluates one debt for the subject. `dampened` is the spam verdict for
/// this debt's position in the chronological pass; `now` is the evaluation
/// instant for the open-overdue branch.
pub(crate) fn evaluate_debt(
    subject: &MemberId,
    debt: &Debt,
    rules: &ScoreRules,
    dampened: bool,
    now: NaiveDateTime,
) -> DebtContribution {
    let mut contribution = DebtContribution::default();

    if &debt.creditor_id == subject {
        creditor_side(&mut contribution, debt, rules, dampened);
    }
    if &debt.debtor_id == subject {
        debtor_side(&mut contribution, debt, rules, dampened, now);
    }

    apply_cap(&mut contribution, debt);
    contribution
}

fn creditor_side(contribution: &mut DebtContribution, debt: &Debt, rules: &ScoreRules, dampened: bool) {
    let creation = weighted(
        SpamTracker::dampen_if_positive(rules.creditor_creation, dampened),
        debt.nominal_amount(),
    );
    contribution.push(
        debt.created_at,
        creation,
        format!("registered debt owed by {}", debt.debtor_id.0),
        debt,
    );

    if debt.status != DebtStatus::Paid {
        return;
    }
    let Some(paid_at) = debt.updated_at else {
        tracing::warn!(
            debt_id = %debt.id.0,
            "paid debt has no payment timestamp; skipping payment bonus"
        );
        return;
    };

    let (raw, reason) = if let Some(correction) = &debt.payment_override {
        match creditor_override_outcome(correction, rules) {
            CreditorOverrideOutcome::Bonus(points) => {
                (points, "payment marked on time by override")
            }
            CreditorOverrideOutcome::Nothing => return,
        }
    } else {
        let diff = day_diff(paid_at, debt.due_date);
        if diff < 0 {
            (rules.payment_bonus.early, "received payment early")
        } else if diff == 0 {
            (rules.payment_bonus.on_time, "received payment on the due date")
        } else if diff <= 2 {
            (
                rules.payment_bonus.late_tolerance,
                "received payment within tolerance",
            )
        } else {
            return;
        }
    };

    let points = weighted(
        SpamTracker::dampen_if_positive(raw, dampened),
        debt.nominal_amount(),
    );
    contribution.push(paid_at, points, reason.to_string(), debt);
}

fn debtor_side(
    contribution: &mut DebtContribution,
    debt: &Debt,
    rules: &ScoreRules,
    dampened: bool,
    now: NaiveDateTime,
) {
    match debt.status {
        DebtStatus::Paid => {
            if let Some(correction) = &debt.payment_override {
                let date = debt.updated_at.unwrap_or(correction.overridden_at);
                let (raw, reason) = match debtor_override_outcome(correction, rules) {
                    DebtorOverrideOutcome::Bonus(points) => {
                        (points, "payment marked on time by override")
                    }
                    DebtorOverrideOutcome::FixedPenalty(points) => {
                        (points, "payment marked late by override")
                    }
                };
                let points = weighted(
                    SpamTracker::dampen_if_positive(raw, dampened),
                    debt.nominal_amount(),
                );
                contribution.push(date, points, reason.to_string(), debt);
                return;
            }

            let Some(paid_at) = debt.updated_at else {
                tracing::warn!(
                    debt_id = %debt.id.0,
                    "paid debt has no payment timestamp; skipping payment scoring"
                );
                return;
            };

            let diff = day_diff(paid_at, debt.due_date);
            let (raw, reason) = if diff < 0 {
                (rules.debtor_bonus.early, "paid before the due date")
            } else if diff == 0 {
                (rules.debtor_bonus.on_time, "paid on the due date")
            } else if diff <= 2 {
                (rules.penalties.late_1_to_2, "paid 1-2 days late")
            } else if diff <= 7 {
                (rules.penalties.late_3_to_7, "paid 3-7 days late")
            } else if diff <= 30 {
                (rules.penalties.late_8_to_30, "paid 8-30 days late")
            } else {
                (rules.penalties.late_30_plus, "paid more than 30 days late")
            };

            let points = weighted(
                SpamTracker::dampen_if_positive(raw, dampened),
                debt.nominal_amount(),
            );
            contribution.push(paid_at, points, reason.to_string(), debt);
        }
        DebtStatus::Open => {
            let days_over = day_diff(now, debt.due_date);
            if days_over <= 0 {
                return;
            }

            let (raw, reason) = if days_over > DEFAULT_AFTER_DAYS {
                (
                    rules.penalties.default_after_60,
                    format!("open debt {days_over} days past due; treated as default"),
                )
            } else {
                let weeks = days_over / DAYS_PER_WEEK;
                if weeks == 0 {
                    return;
                }
                // overdue_max is the floor: the weekly penalty never gets more
                // negative than it.
                let penalty =
                    (weeks as f64 * rules.penalties.overdue_weekly).max(rules.penalties.overdue_max);
                (penalty, format!("open debt {days_over} days past due"))
            };

            let points = weighted(raw, debt.nominal_amount());
            contribution.push(now, points, reason, debt);
        }
    }
}

fn apply_cap(contribution: &mut DebtContribution, debt: &Debt) {
    if contribution.points <= DEBT_POINT_CAP {
        return;
    }
    let correction = DEBT_POINT_CAP - contribution.points;
    let date = contribution
        .events
        .last()
        .map(|event| event.date)
        .unwrap_or(debt.created_at);
    contribution.events.push(ScoreEvent::new(
        date,
        correction,
        "single-debt bonus capped".to_string(),
        Some(debt.id.clone()),
    ));
    contribution.points = DEBT_POINT_CAP;
}
