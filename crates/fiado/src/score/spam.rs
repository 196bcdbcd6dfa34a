//! Spam dampening: the 4th and every later debt between the same two members
//! within one calendar month has its positive points halved, to discourage
//! gaming the score via trivial repeated debts. Penalties are never dampened.

use std::collections::HashMap;

use chrono::Datelike;

use crate::ledger::domain::Debt;

const DAMPEN_FROM_OCCURRENCE: u32 = 4;
const DAMPEN_FACTOR: f64 = 0.5;

/// Unordered participant pair plus the creation year/month.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PairMonthKey {
    low: String,
    high: String,
    year: i32,
    month: u32,
}

impl PairMonthKey {
    fn for_debt(debt: &Debt) -> Self {
        let a = debt.creditor_id.0.clone();
        let b = debt.debtor_id.0.clone();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low,
            high,
            year: debt.created_at.year(),
            month: debt.created_at.month(),
        }
    }
}

/// Running per-group counter for a single computation. Each engine invocation
/// builds a fresh tracker; nothing is shared between calls.
#[derive(Debug, Default)]
pub(crate) struct SpamTracker {
    seen: HashMap<PairMonthKey, u32>,
}

impl SpamTracker {
    /// Records one debt in chronological order and reports whether its
    /// positive contributions must be dampened.
    pub(crate) fn observe(&mut self, debt: &Debt) -> bool {
        let count = self.seen.entry(PairMonthKey::for_debt(debt)).or_insert(0);
        *count += 1;
        *count >= DAMPEN_FROM_OCCURRENCE
    }

    pub(crate) fn dampen_if_positive(points: f64, dampened: bool) -> f64 {
        if dampened && points > 0.0 {
            points * DAMPEN_FACTOR
        } else {
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::domain::{Debt, DebtId, DebtStatus, MemberId};
    use chrono::NaiveDate;

    fn debt(n: u32, creditor: &str, debtor: &str, year: i32, month: u32, day: u32) -> Debt {
        let created = NaiveDate::from_ymd_opt(year, month, day)
            .expect("valid date")
            .and_hms_opt(12, 0, 0)
            .expect("valid time");
        Debt {
            id: DebtId(format!("debt-{n}")),
            creditor_id: MemberId(creditor.to_string()),
            debtor_id: MemberId(debtor.to_string()),
            amount: 100.0,
            original_amount: None,
            status: DebtStatus::Open,
            due_date: created,
            created_at: created,
            updated_at: None,
            was_partial_payment: false,
            payment_override: None,
        }
    }

    #[test]
    fn fourth_debt_in_a_month_is_dampened() {
        let mut tracker = SpamTracker::default();
        assert!(!tracker.observe(&debt(1, "ana", "bia", 2025, 3, 1)));
        assert!(!tracker.observe(&debt(2, "ana", "bia", 2025, 3, 5)));
        assert!(!tracker.observe(&debt(3, "ana", "bia", 2025, 3, 12)));
        assert!(tracker.observe(&debt(4, "ana", "bia", 2025, 3, 20)));
        assert!(tracker.observe(&debt(5, "ana", "bia", 2025, 3, 25)));
    }

    #[test]
    fn pair_is_unordered() {
        let mut tracker = SpamTracker::default();
        tracker.observe(&debt(1, "ana", "bia", 2025, 3, 1));
        tracker.observe(&debt(2, "bia", "ana", 2025, 3, 2));
        tracker.observe(&debt(3, "ana", "bia", 2025, 3, 3));
        assert!(tracker.observe(&debt(4, "bia", "ana", 2025, 3, 4)));
    }

    #[test]
    fn a_new_month_resets_the_count() {
        let mut tracker = SpamTracker::default();
        for day in 1..=3 {
            tracker.observe(&debt(day, "ana", "bia", 2025, 3, day));
        }
        assert!(!tracker.observe(&debt(4, "ana", "bia", 2025, 4, 1)));
    }

    #[test]
    fn dampening_only_touches_positive_points() {
        assert_eq!(SpamTracker::dampen_if_positive(2.0, true), 1.0);
        assert_eq!(SpamTracker::dampen_if_positive(2.0, false), 2.0);
        assert_eq!(SpamTracker::dampen_if_positive(-25.0, true), -25.0);
    }
}
