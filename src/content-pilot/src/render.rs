//! Plain-text tables for terminal output.

use pilot_analytics::{
    format_compact, format_currency, format_duration, format_percent, AbComparison, AbMetric,
    RoiReport, Winner,
};
use pilot_core::AbTest;
use std::fmt::Write;

pub fn roi_table(report: &RoiReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}]  target {}  spend {}  followers {}  cpf {} ({}, latest {})",
        report.campaign_name,
        report.status,
        format_currency(report.target_cpf),
        format_currency(report.total_spend),
        format_compact(report.total_followers as f64),
        format_currency(report.cost_per_follower),
        report.signal,
        report.latest_signal,
    );
    let _ = writeln!(
        out,
        "{:<12} {:>10} {:>10} {:>10}",
        report.granularity, "spend", "followers", "cpf"
    );
    for bucket in &report.buckets {
        let _ = writeln!(
            out,
            "{:<12} {:>10} {:>10} {:>10}",
            bucket.label,
            format_currency(bucket.spend),
            format_compact(bucket.followers as f64),
            format_currency(bucket.cost_per_follower),
        );
    }
    out
}

fn display_value(metric: AbMetric, value: f64) -> String {
    match metric {
        AbMetric::EngagementRate | AbMetric::FollowRate => format_percent(value),
        AbMetric::WatchTime => format_duration(value as u64),
        _ => format_compact(value),
    }
}

pub fn ab_table(test: &AbTest, comparison: &AbComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} [{}]  A: {}  B: {}",
        test.name, test.status, test.variant_a.label, test.variant_b.label
    );
    let _ = writeln!(out, "{:<16} {:>10} {:>10} {:>6} {:>9}", "metric", "A", "B", "win", "delta");
    for row in &comparison.rows {
        let winner = match row.comparison.winner {
            Winner::A => "A",
            Winner::B => "B",
            Winner::Tie => "-",
        };
        let _ = writeln!(
            out,
            "{:<16} {:>10} {:>10} {:>6} {:>9}",
            row.metric.label(),
            display_value(row.metric, row.value_a),
            display_value(row.metric, row.value_b),
            winner,
            format_percent(row.comparison.delta_pct),
        );
    }
    let suggestion = comparison
        .suggested_winner
        .map(|s| s.to_string())
        .unwrap_or_else(|| "none".to_string());
    let _ = writeln!(
        out,
        "wins A {}  B {}  suggested {}",
        comparison.wins_a, comparison.wins_b, suggestion
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilot_analytics::{build_comparison, build_roi_report, Granularity};
    use pilot_core::{Campaign, MetricSample, RoiEntry, Side, TestVariable, Variant};

    #[test]
    fn roi_table_lists_each_bucket() {
        let mut c = Campaign::new("Spark Ads", "tiktok", 0.5);
        c.log_entry(RoiEntry::new("2024-01-01", 10.0, 20)).unwrap();
        c.log_entry(RoiEntry::new("2024-02-01", 5.0, 0)).unwrap();
        let out = roi_table(&build_roi_report(&c, Granularity::Month));
        assert!(out.contains("2024-01"));
        assert!(out.contains("2024-02"));
        assert!(out.contains("$0.75"));
        assert!(out.contains("marginal"));
    }

    #[test]
    fn ab_table_formats_rates_and_durations() {
        let mut t = AbTest::new(
            "Hook",
            TestVariable::Hook,
            Variant::new("Question", ""),
            Variant::new("Stat", ""),
        );
        let a = MetricSample {
            views: 2000,
            likes: 100,
            watch_time_seconds: 95,
            ..Default::default()
        };
        t.record_result(Side::A, a.clone()).unwrap();
        t.record_result(Side::B, a).unwrap();
        let out = ab_table(&t, &build_comparison(&t).unwrap());
        assert!(out.contains("2.0K"));
        assert!(out.contains("5.00%"));
        assert!(out.contains("1m 35s"));
        assert!(out.contains("suggested none"));
    }
}
