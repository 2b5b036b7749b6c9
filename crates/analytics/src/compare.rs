//! Side-by-side comparison of one metric across variant A and variant B.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    A,
    B,
    #[serde(rename = "tie")]
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricComparison {
    pub winner: Winner,
    /// Gap relative to A's value, in percent.
    pub delta_pct: f64,
    /// Whether a larger value is the desirable direction for this metric.
    /// Only used for presentation; `winner` is always the larger raw value.
    pub favours_higher: bool,
}

impl MetricComparison {
    /// True when the raw winner is also the better side for this metric.
    pub fn winner_is_better(&self) -> bool {
        match self.winner {
            Winner::Tie => false,
            _ => self.favours_higher,
        }
    }
}

/// Compare `a` and `b`, using A as the baseline for the percentage gap.
pub fn compare_metric(a: f64, b: f64, higher_is_better: bool) -> MetricComparison {
    let delta_pct = if a == 0.0 && b == 0.0 {
        0.0
    } else if a == 0.0 || b == 0.0 {
        100.0
    } else {
        (b - a).abs() / a * 100.0
    };

    let winner = if a > b {
        Winner::A
    } else if b > a {
        Winner::B
    } else {
        Winner::Tie
    };

    MetricComparison {
        winner,
        delta_pct,
        favours_higher: higher_is_better,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_zero_is_tie() {
        let c = compare_metric(0.0, 0.0, true);
        assert_eq!(c.winner, Winner::Tie);
        assert_eq!(c.delta_pct, 0.0);
    }

    #[test]
    fn one_zero_side_loses_by_100() {
        let c = compare_metric(10.0, 0.0, true);
        assert_eq!(c.winner, Winner::A);
        assert_eq!(c.delta_pct, 100.0);

        let c = compare_metric(0.0, 10.0, true);
        assert_eq!(c.winner, Winner::B);
        assert_eq!(c.delta_pct, 100.0);
    }

    #[test]
    fn delta_uses_a_as_baseline() {
        let c = compare_metric(100.0, 150.0, true);
        assert_eq!(c.winner, Winner::B);
        assert!((c.delta_pct - 50.0).abs() < f64::EPSILON);

        // Gap is measured against A even when A is the larger side.
        let c = compare_metric(150.0, 100.0, true);
        assert_eq!(c.winner, Winner::A);
        assert!((c.delta_pct - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn winner_ignores_direction_flag() {
        let c = compare_metric(0.4, 0.8, false);
        assert_eq!(c.winner, Winner::B);
        assert!(!c.winner_is_better());
    }

    #[test]
    fn equal_nonzero_values_tie() {
        let c = compare_metric(42.0, 42.0, true);
        assert_eq!(c.winner, Winner::Tie);
        assert_eq!(c.delta_pct, 0.0);
        assert!(!c.winner_is_better());
    }

    #[test]
    fn winner_serializes_like_store_rows() {
        assert_eq!(serde_json::to_value(Winner::A).unwrap(), "A");
        assert_eq!(serde_json::to_value(Winner::Tie).unwrap(), "tie");
    }
}
