//! Trust score engine: replays a member's debt history chronologically and
//! produces a point-accumulated score, a classification tier, and the full
//! audit trail behind it.
//!
//! The engine is a pure function of (subject, debt collection, rules) with one
//! documented exception: open overdue debts are penalized relative to the
//! evaluation instant, so re-running the computation later can change the
//! result for the same stored debts. Production callers use
//! [`ScoreEngine::score`] with the current wall clock; anything that must be
//! reproducible injects the instant through [`ScoreEngine::score_at`].

pub mod classify;
pub mod config;
mod rules;
mod spam;
mod weight;

#[cfg(test)]
mod tests;

pub use classify::Classification;
pub use config::{DebtorBonus, PaymentBonus, Penalties, ScoreRules};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::ledger::domain::{Debt, DebtId, MemberId};

use rules::evaluate_debt;
use spam::SpamTracker;

/// Sign-derived audit classification of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreEventKind {
    Earned,
    Lost,
}

/// One line of the audit trail behind a computed score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEvent {
    pub date: NaiveDateTime,
    pub points: f64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_id: Option<DebtId>,
    pub kind: ScoreEventKind,
}

impl ScoreEvent {
    pub(crate) fn new(
        date: NaiveDateTime,
        points: f64,
        reason: String,
        debt_id: Option<DebtId>,
    ) -> Self {
        let kind = if points < 0.0 {
            ScoreEventKind::Lost
        } else {
            ScoreEventKind::Earned
        };
        Self {
            date,
            points,
            reason,
            debt_id,
            kind,
        }
    }
}

/// Rounded earned/lost buckets on top of the configured base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base: i32,
    pub earned: i32,
    pub lost: i32,
}

/// Engine output: the clamped integer score, its tier, the rounded breakdown,
/// and the event history sorted newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub score: i32,
    pub classification: Classification,
    pub breakdown: ScoreBreakdown,
    pub history: Vec<ScoreEvent>,
}

/// Stateless engine applying one fixed rule set per computation. It never
/// mutates its inputs, so it may be invoked concurrently for different
/// subjects without synchronization.
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    rules: ScoreRules,
}

impl ScoreEngine {
    pub fn new(rules: ScoreRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    /// Scores against the current wall clock. Open overdue debts make this
    /// non-idempotent across calls; see [`Self::score_at`].
    pub fn score(&self, subject: &MemberId, debts: &[Debt]) -> ScoreDetails {
        self.score_at(subject, debts, Local::now().naive_local())
    }

    /// Deterministic core: replays the subject's debts as of `now`.
    ///
    /// The caller supplies the entire collection; the engine filters to debts
    /// naming the subject (dropping the rest silently) and excludes partial
    /// payment remainders before the chronological pass.
    pub fn score_at(
        &self,
        subject: &MemberId,
        debts: &[Debt],
        now: NaiveDateTime,
    ) -> ScoreDetails {
        let mut relevant: Vec<&Debt> = debts
            .iter()
            .filter(|debt| debt.involves(subject) && !debt.was_partial_payment)
            .collect();
        relevant.sort_by_key(|debt| debt.created_at);

        let mut spam = SpamTracker::default();
        let mut earned = 0.0;
        let mut lost = 0.0;
        let mut history = Vec::new();

        for debt in relevant {
            let dampened = spam.observe(debt);
            let contribution = evaluate_debt(subject, debt, &self.rules, dampened, now);
            if contribution.points >= 0.0 {
                earned += contribution.points;
            } else {
                lost += contribution.points;
            }
            history.extend(contribution.events);
        }

        let raw = self.rules.initial_score + earned + lost;
        let score = raw.clamp(self.rules.min_score, self.rules.max_score).round() as i32;
        // Tier and displayed score always agree: classify after clamping.
        let classification = classify::classify(score);

        history.sort_by(|a, b| b.date.cmp(&a.date));

        tracing::debug!(
            subject = %subject.0,
            score,
            earned,
            lost,
            events = history.len(),
            "score replay complete"
        );

        ScoreDetails {
            score,
            classification,
            breakdown: ScoreBreakdown {
                base: self.rules.initial_score.round() as i32,
                earned: earned.round() as i32,
                lost: lost.round() as i32,
            },
            history,
        }
    }
}
