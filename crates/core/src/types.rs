use serde::{Deserialize, Serialize};

/// One measured outcome for a single content variant on a single day or post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSample {
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub saves: u64,
    #[serde(default)]
    pub profile_visits: u64,
    #[serde(default)]
    pub watch_time_seconds: u64,
    #[serde(default)]
    pub follows: u64,
    /// Ad spend; only meaningful in the ROI context.
    #[serde(default)]
    pub spend: f64,
    /// ISO calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl MetricSample {
    /// Sum of the interactions counted towards engagement rate.
    pub fn interactions(&self) -> u64 {
        self.likes + self.comments + self.shares + self.saves
    }
}

/// A dated spend/followers row logged against an ROI campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiEntry {
    pub date: String,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub followers_gained: u64,
}

impl RoiEntry {
    pub fn new(date: impl Into<String>, spend: f64, followers_gained: u64) -> Self {
        Self {
            date: date.into(),
            spend,
            followers_gained,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_deserializes_from_store_row() {
        let json = r#"{"views":1200,"likes":80,"comments":4,"shares":6,"saves":10,
            "profileVisits":30,"watchTimeSeconds":5400,"follows":12,"date":"2024-03-01"}"#;
        let sample: MetricSample = serde_json::from_str(json).unwrap();
        assert_eq!(sample.profile_visits, 30);
        assert_eq!(sample.watch_time_seconds, 5400);
        assert_eq!(sample.interactions(), 100);
        assert!(sample.notes.is_empty());
    }

    #[test]
    fn entry_uses_camel_case_followers() {
        let entry = RoiEntry::new("2024-01-01", 10.0, 20);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["followersGained"], 20);
    }
}
