//! Paid-promotion campaigns tracked for cost-per-follower ROI.

use crate::error::{PilotError, PilotResult};
use crate::types::RoiEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    Active,
    Paused,
    Stopped,
}

impl CampaignStatus {
    /// `Active` and `Paused` move freely between each other; `Stopped` is terminal.
    pub fn can_transition_to(self, next: CampaignStatus) -> bool {
        matches!(
            (self, next),
            (CampaignStatus::Active, CampaignStatus::Paused)
                | (CampaignStatus::Paused, CampaignStatus::Active)
                | (CampaignStatus::Active, CampaignStatus::Stopped)
                | (CampaignStatus::Paused, CampaignStatus::Stopped)
        )
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignStatus::Active => "active",
            CampaignStatus::Paused => "paused",
            CampaignStatus::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub platform: String,
    /// Cost per follower at or below which the campaign counts as healthy.
    pub target_cpf: f64,
    pub status: CampaignStatus,
    #[serde(default)]
    pub entries: Vec<RoiEntry>,
    pub created_at: DateTime<Utc>,
}

impl Campaign {
    pub fn new(name: impl Into<String>, platform: impl Into<String>, target_cpf: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            platform: platform.into(),
            target_cpf,
            status: CampaignStatus::Active,
            entries: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn transition(&mut self, next: CampaignStatus) -> PilotResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(PilotError::transition(self.status, next));
        }
        info!(campaign_id = %self.id, from = %self.status, to = %next, "Campaign status changed");
        self.status = next;
        Ok(())
    }

    /// Append a spend entry. Entries keep insertion order.
    pub fn log_entry(&mut self, entry: RoiEntry) -> PilotResult<()> {
        if self.status == CampaignStatus::Stopped {
            return Err(PilotError::Validation(format!(
                "campaign {} is stopped",
                self.id
            )));
        }
        if !entry.spend.is_finite() || entry.spend < 0.0 {
            return Err(PilotError::Validation(format!(
                "spend must be a non-negative amount, got {}",
                entry.spend
            )));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn total_spend(&self) -> f64 {
        self.entries.iter().map(|e| e.spend).sum()
    }

    pub fn total_followers(&self) -> u64 {
        self.entries.iter().map(|e| e.followers_gained).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_resume_and_stop() {
        let mut c = Campaign::new("Spark Ads", "tiktok", 0.5);
        c.transition(CampaignStatus::Paused).unwrap();
        c.transition(CampaignStatus::Active).unwrap();
        c.transition(CampaignStatus::Stopped).unwrap();
        assert_eq!(c.status, CampaignStatus::Stopped);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut c = Campaign::new("Spark Ads", "tiktok", 0.5);
        c.transition(CampaignStatus::Stopped).unwrap();
        let err = c.transition(CampaignStatus::Active).unwrap_err();
        assert!(matches!(err, PilotError::InvalidTransition { .. }));
    }

    #[test]
    fn self_transition_rejected() {
        let mut c = Campaign::new("Spark Ads", "tiktok", 0.5);
        assert!(c.transition(CampaignStatus::Active).is_err());
    }

    #[test]
    fn entries_keep_order_and_sum() {
        let mut c = Campaign::new("Boost", "instagram", 0.5);
        c.log_entry(RoiEntry::new("2024-01-02", 5.0, 0)).unwrap();
        c.log_entry(RoiEntry::new("2024-01-01", 10.0, 20)).unwrap();
        assert_eq!(c.entries[0].date, "2024-01-02");
        assert!((c.total_spend() - 15.0).abs() < f64::EPSILON);
        assert_eq!(c.total_followers(), 20);
    }

    #[test]
    fn stopped_campaign_rejects_entries() {
        let mut c = Campaign::new("Boost", "instagram", 0.5);
        c.transition(CampaignStatus::Stopped).unwrap();
        assert!(c.log_entry(RoiEntry::new("2024-01-01", 1.0, 1)).is_err());
    }

    #[test]
    fn negative_spend_rejected() {
        let mut c = Campaign::new("Boost", "instagram", 0.5);
        assert!(c.log_entry(RoiEntry::new("2024-01-01", -1.0, 1)).is_err());
    }
}
