//! Campaign ROI report: totals, overall cost per follower, and its signal.

use crate::buckets::{aggregate, BucketSummary, Granularity};
use crate::rates::derive_cost_per_follower;
use crate::round2;
use crate::signal::{classify_with, Signal, MARGINAL_MULTIPLIER};
use pilot_core::{Campaign, CampaignStatus};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiReport {
    pub campaign_id: String,
    pub campaign_name: String,
    pub status: CampaignStatus,
    pub target_cpf: f64,
    pub total_spend: f64,
    pub total_followers: u64,
    pub cost_per_follower: f64,
    pub signal: Signal,
    /// Signal of the most recently logged entry alone.
    pub latest_signal: Signal,
    pub granularity: Granularity,
    pub buckets: Vec<BucketSummary>,
}

pub fn build_roi_report(campaign: &Campaign, granularity: Granularity) -> RoiReport {
    build_roi_report_with(campaign, granularity, MARGINAL_MULTIPLIER)
}

pub fn build_roi_report_with(
    campaign: &Campaign,
    granularity: Granularity,
    marginal_multiplier: f64,
) -> RoiReport {
    let total_spend = campaign.total_spend();
    let total_followers = campaign.total_followers();
    let cpf = derive_cost_per_follower(total_spend, total_followers);

    let signal = classify_with(cpf, campaign.target_cpf, marginal_multiplier);
    let latest_signal = campaign
        .entries
        .last()
        .map(|e| {
            classify_with(
                derive_cost_per_follower(e.spend, e.followers_gained),
                campaign.target_cpf,
                marginal_multiplier,
            )
        })
        .unwrap_or(Signal::None);

    debug!(
        campaign_id = %campaign.id,
        entries = campaign.entries.len(),
        cpf = cpf,
        signal = %signal,
        "Built ROI report"
    );

    RoiReport {
        campaign_id: campaign.id.clone(),
        campaign_name: campaign.name.clone(),
        status: campaign.status,
        target_cpf: campaign.target_cpf,
        total_spend: round2(total_spend),
        total_followers,
        cost_per_follower: round2(cpf),
        signal,
        latest_signal,
        granularity,
        buckets: aggregate(&campaign.entries, granularity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pilot_core::RoiEntry;

    fn campaign_with(entries: &[(&str, f64, u64)]) -> Campaign {
        let mut c = Campaign::new("Spark Ads", "tiktok", 0.5);
        for (date, spend, followers) in entries {
            c.log_entry(RoiEntry::new(*date, *spend, *followers)).unwrap();
        }
        c
    }

    #[test]
    fn empty_campaign_has_no_signal() {
        let report = build_roi_report(&campaign_with(&[]), Granularity::Day);
        assert_eq!(report.signal, Signal::None);
        assert_eq!(report.latest_signal, Signal::None);
        assert!(report.buckets.is_empty());
        assert_eq!(report.cost_per_follower, 0.0);
    }

    #[test]
    fn overall_and_latest_signals_differ() {
        // Overall 15 / 40 = 0.375 (good); latest 5 / 2 = 2.5 (bad).
        let c = campaign_with(&[("2024-01-01", 10.0, 38), ("2024-01-02", 5.0, 2)]);
        let report = build_roi_report(&c, Granularity::Month);
        assert_eq!(report.signal, Signal::Good);
        assert_eq!(report.latest_signal, Signal::Bad);
        assert_eq!(report.total_followers, 40);
        assert!((report.cost_per_follower - 0.38).abs() < f64::EPSILON);
        assert_eq!(report.buckets.len(), 1);
    }

    #[test]
    fn marginal_band_follows_multiplier() {
        let c = campaign_with(&[("2024-01-01", 9.0, 10)]);
        assert_eq!(build_roi_report(&c, Granularity::Day).signal, Signal::Bad);
        assert_eq!(
            build_roi_report_with(&c, Granularity::Day, 2.0).signal,
            Signal::Marginal
        );
    }
}
