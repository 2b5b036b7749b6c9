//! A/B comparison table built from the two logged variant results.

use crate::compare::{compare_metric, MetricComparison, Winner};
use crate::rates::derive_rates;
use pilot_core::{AbTest, MetricSample, Side};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AbMetric {
    Views,
    Likes,
    Comments,
    Shares,
    Saves,
    ProfileVisits,
    WatchTime,
    Follows,
    EngagementRate,
    FollowRate,
}

impl AbMetric {
    pub const ALL: [AbMetric; 10] = [
        AbMetric::Views,
        AbMetric::Likes,
        AbMetric::Comments,
        AbMetric::Shares,
        AbMetric::Saves,
        AbMetric::ProfileVisits,
        AbMetric::WatchTime,
        AbMetric::Follows,
        AbMetric::EngagementRate,
        AbMetric::FollowRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AbMetric::Views => "Views",
            AbMetric::Likes => "Likes",
            AbMetric::Comments => "Comments",
            AbMetric::Shares => "Shares",
            AbMetric::Saves => "Saves",
            AbMetric::ProfileVisits => "Profile visits",
            AbMetric::WatchTime => "Watch time",
            AbMetric::Follows => "Follows",
            AbMetric::EngagementRate => "Engagement rate",
            AbMetric::FollowRate => "Follow rate",
        }
    }

    /// Every tracked metric is better when larger.
    pub fn higher_is_better(self) -> bool {
        true
    }

    pub fn value(self, sample: &MetricSample) -> f64 {
        match self {
            AbMetric::Views => sample.views as f64,
            AbMetric::Likes => sample.likes as f64,
            AbMetric::Comments => sample.comments as f64,
            AbMetric::Shares => sample.shares as f64,
            AbMetric::Saves => sample.saves as f64,
            AbMetric::ProfileVisits => sample.profile_visits as f64,
            AbMetric::WatchTime => sample.watch_time_seconds as f64,
            AbMetric::Follows => sample.follows as f64,
            AbMetric::EngagementRate => derive_rates(sample).engagement_rate,
            AbMetric::FollowRate => derive_rates(sample).follow_rate,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRow {
    pub metric: AbMetric,
    pub value_a: f64,
    pub value_b: f64,
    pub comparison: MetricComparison,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbComparison {
    pub test_id: String,
    pub rows: Vec<MetricRow>,
    pub wins_a: usize,
    pub wins_b: usize,
    /// Side that won more rows; `None` when the tally is level.
    pub suggested_winner: Option<Side>,
}

/// Compare both variants metric by metric. `None` until both results are logged.
pub fn build_comparison(test: &AbTest) -> Option<AbComparison> {
    let (a, b) = test.results()?;

    let rows: Vec<MetricRow> = AbMetric::ALL
        .iter()
        .map(|&metric| {
            let value_a = metric.value(a);
            let value_b = metric.value(b);
            MetricRow {
                metric,
                value_a,
                value_b,
                comparison: compare_metric(value_a, value_b, metric.higher_is_better()),
            }
        })
        .collect();

    let wins_a = rows
        .iter()
        .filter(|r| r.comparison.winner == Winner::A)
        .count();
    let wins_b = rows
        .iter()
        .filter(|r| r.comparison.winner == Winner::B)
        .count();
    let suggested_winner = match wins_a.cmp(&wins_b) {
        std::cmp::Ordering::Greater => Some(Side::A),
        std::cmp::Ordering::Less => Some(Side::B),
        std::cmp::Ordering::Equal => None,
    };

    debug!(test_id = %test.id, wins_a, wins_b, "Built A/B comparison");

    Some(AbComparison {
        test_id: test.id.clone(),
        rows,
        wins_a,
        wins_b,
        suggested_winner,
    })
}
