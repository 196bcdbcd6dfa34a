use serde::{Deserialize, Serialize};

/// Every bonus and penalty magnitude used by the score engine, plus the score
/// bounds. Penalty values are negative, bonus values positive; the engine
/// relies on the signs rather than validating them.
///
/// Partial-configuration policy: every field carries `#[serde(default)]`, so a
/// partial rules object deep-merges field-by-field onto the canonical defaults
/// at deserialization. `Default` is the one authority for the canonical
/// values; there is no mutable module-level rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreRules {
    pub initial_score: f64,
    pub max_score: f64,
    pub min_score: f64,
    /// Awarded to the creditor for registering a debt.
    pub creditor_creation: f64,
    /// Creditor-side bonuses for receiving a payment.
    pub payment_bonus: PaymentBonus,
    /// Debtor-side bonuses for paying.
    pub debtor_bonus: DebtorBonus,
    pub penalties: Penalties,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            initial_score: 500.0,
            max_score: 1000.0,
            min_score: 0.0,
            creditor_creation: 2.0,
            payment_bonus: PaymentBonus::default(),
            debtor_bonus: DebtorBonus::default(),
            penalties: Penalties::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentBonus {
    pub early: f64,
    pub on_time: f64,
    pub late_tolerance: f64,
}

impl Default for PaymentBonus {
    fn default() -> Self {
        Self {
            early: 4.0,
            on_time: 3.0,
            late_tolerance: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebtorBonus {
    pub early: f64,
    pub on_time: f64,
    pub late_tolerance: f64,
}

impl Default for DebtorBonus {
    fn default() -> Self {
        Self {
            early: 10.0,
            on_time: 7.0,
            late_tolerance: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Penalties {
    pub late_1_to_2: f64,
    pub late_3_to_7: f64,
    pub late_8_to_30: f64,
    pub late_30_plus: f64,
    /// Applied per whole week an open debt stays past due.
    pub overdue_weekly: f64,
    /// Floor for the accumulated weekly penalty (most negative it can get).
    pub overdue_max: f64,
    /// Flat penalty once an open debt is more than 60 days past due.
    pub default_after_60: f64,
}

impl Default for Penalties {
    fn default() -> Self {
        Self {
            late_1_to_2: -10.0,
            late_3_to_7: -25.0,
            late_8_to_30: -70.0,
            late_30_plus: -140.0,
            overdue_weekly: -10.0,
            overdue_max: -80.0,
            default_after_60: -300.0,
        }
    }
}
