//! Day/week/month bucketing of ROI entries for charting.

use crate::rates::derive_cost_per_follower;
use crate::round2;
use chrono::{Datelike, Duration, NaiveDate};
use pilot_core::{PilotError, RoiEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
    Month,
}

impl FromStr for Granularity {
    type Err = PilotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Granularity::Day),
            "week" => Ok(Granularity::Week),
            "month" => Ok(Granularity::Month),
            other => Err(PilotError::Validation(format!(
                "unknown granularity: {other}"
            ))),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        };
        f.pad(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketSummary {
    pub label: String,
    /// Summed spend, rounded to cents.
    pub spend: f64,
    pub followers: u64,
    /// Recomputed from the bucket totals, rounded to cents.
    pub cost_per_follower: f64,
}

/// Key an entry date into its bucket label.
pub fn bucket_key(date: &str, granularity: Granularity) -> String {
    match granularity {
        Granularity::Day => date.to_string(),
        Granularity::Week => week_key(date),
        Granularity::Month => date.chars().take(7).collect(),
    }
}

/// `W` + `MM-DD` of the Monday on or before `date`. Sunday belongs to the
/// week that started six days earlier.
fn week_key(date: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(day) => {
            let back = day.weekday().num_days_from_monday() as i64;
            let monday = day - Duration::days(back);
            format!("W{}", monday.format("%m-%d"))
        }
        Err(e) => {
            debug!(date = date, error = %e, "Unparseable entry date, bucketing verbatim");
            date.to_string()
        }
    }
}

/// Group entries into buckets, in the order each bucket is first seen.
pub fn aggregate(entries: &[RoiEntry], granularity: Granularity) -> Vec<BucketSummary> {
    let mut order: Vec<(String, f64, u64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for entry in entries {
        let key = bucket_key(&entry.date, granularity);
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push((key, 0.0, 0));
            order.len() - 1
        });
        let bucket = &mut order[slot];
        bucket.1 += entry.spend;
        bucket.2 += entry.followers_gained;
    }

    debug!(
        entries = entries.len(),
        buckets = order.len(),
        granularity = %granularity,
        "Aggregated ROI entries"
    );

    order
        .into_iter()
        .map(|(label, spend, followers)| BucketSummary {
            label,
            spend: round2(spend),
            followers,
            cost_per_follower: round2(derive_cost_per_follower(spend, followers)),
        })
        .collect()
}
