//! Metric normalization: raw counters into percentage rates and unit costs.

use pilot_core::MetricSample;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedRates {
    /// `(likes + comments + shares + saves) / views * 100`
    pub engagement_rate: f64,
    /// `follows / views * 100`
    pub follow_rate: f64,
}

/// Engagement and follow rate of a sample, in percent. Zero views yields zero rates.
pub fn derive_rates(sample: &MetricSample) -> DerivedRates {
    if sample.views == 0 {
        return DerivedRates::default();
    }
    let views = sample.views as f64;
    DerivedRates {
        engagement_rate: sample.interactions() as f64 / views * 100.0,
        follow_rate: sample.follows as f64 / views * 100.0,
    }
}

/// `spend / followers_gained`, or 0.0 when no followers were gained.
pub fn derive_cost_per_follower(spend: f64, followers_gained: u64) -> f64 {
    if followers_gained == 0 {
        0.0
    } else {
        spend / followers_gained as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_views_gives_zero_rates() {
        let sample = MetricSample {
            views: 0,
            likes: 50,
            follows: 3,
            ..Default::default()
        };
        let rates = derive_rates(&sample);
        assert_eq!(rates.engagement_rate, 0.0);
        assert_eq!(rates.follow_rate, 0.0);
    }

    #[test]
    fn rates_in_percent() {
        let sample = MetricSample {
            views: 1000,
            likes: 40,
            comments: 5,
            shares: 3,
            saves: 2,
            follows: 10,
            ..Default::default()
        };
        let rates = derive_rates(&sample);
        assert!((rates.engagement_rate - 5.0).abs() < f64::EPSILON);
        assert!((rates.follow_rate - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rates_are_uncapped() {
        let sample = MetricSample {
            views: 10,
            likes: 30,
            ..Default::default()
        };
        assert!((derive_rates(&sample).engagement_rate - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_followers_gives_zero_cost() {
        assert_eq!(derive_cost_per_follower(25.0, 0), 0.0);
        assert!((derive_cost_per_follower(10.0, 20) - 0.5).abs() < f64::EPSILON);
    }
}
