//! Performance analytics for Content Pilot: derived rates, target signals,
//! A/B metric comparison, time-bucketed ROI series, and display formatting.
//!
//! Everything here is a pure function over its inputs.

pub mod ab;
pub mod buckets;
pub mod compare;
pub mod format;
pub mod rates;
pub mod roi;
pub mod signal;

pub use ab::{build_comparison, AbComparison, AbMetric, MetricRow};
pub use buckets::{aggregate, BucketSummary, Granularity};
pub use compare::{compare_metric, MetricComparison, Winner};
pub use format::{format_compact, format_currency, format_duration, format_percent};
pub use rates::{derive_cost_per_follower, derive_rates, DerivedRates};
pub use roi::{build_roi_report, build_roi_report_with, RoiReport};
pub use signal::{classify, classify_with, Signal, MARGINAL_MULTIPLIER};

/// Round to two decimal places, the precision every currency figure is shown at.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
