//! Value weighting: points are scaled by the economic size of the debt so
//! very small debts barely move the score. The scaling applies to both signs;
//! low-stakes debts matter less in both directions.

const SMALL_CUTOFF: f64 = 10.0;
const MEDIUM_CUTOFF: f64 = 50.0;

pub(crate) fn weight_for(amount: f64) -> f64 {
    if amount < SMALL_CUTOFF {
        0.20
    } else if amount < MEDIUM_CUTOFF {
        0.60
    } else {
        1.0
    }
}

pub(crate) fn weighted(points: f64, amount: f64) -> f64 {
    points * weight_for(amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_follow_amount_cutoffs() {
        assert_eq!(weight_for(5.0), 0.20);
        assert_eq!(weight_for(9.99), 0.20);
        assert_eq!(weight_for(10.0), 0.60);
        assert_eq!(weight_for(49.99), 0.60);
        assert_eq!(weight_for(50.0), 1.0);
        assert_eq!(weight_for(1000.0), 1.0);
    }

    #[test]
    fn penalties_are_weighted_too() {
        assert_eq!(weighted(-25.0, 5.0), -5.0);
        assert_eq!(weighted(-25.0, 100.0), -25.0);
    }

    #[test]
    fn tiny_amount_yields_one_fifth_of_large_amount() {
        let small = weighted(7.0, 5.0);
        let large = weighted(7.0, 100.0);
        assert_eq!(small, large * 0.20);
    }
}
