//! A/B tests comparing two content variants.

use crate::error::{PilotError, PilotResult};
use crate::types::MetricSample;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Which side of a two-variant test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// The content dimension a test varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestVariable {
    Hook,
    Cta,
    Type,
    Theme,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbTestStatus {
    Planning,
    Live,
    Completed,
}

impl AbTestStatus {
    pub fn next(self) -> Option<AbTestStatus> {
        match self {
            AbTestStatus::Planning => Some(AbTestStatus::Live),
            AbTestStatus::Live => Some(AbTestStatus::Completed),
            AbTestStatus::Completed => None,
        }
    }
}

impl fmt::Display for AbTestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AbTestStatus::Planning => "planning",
            AbTestStatus::Live => "live",
            AbTestStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub result: Option<MetricSample>,
}

impl Variant {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            result: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbTest {
    pub id: String,
    pub name: String,
    pub variable: TestVariable,
    pub status: AbTestStatus,
    pub variant_a: Variant,
    pub variant_b: Variant,
    #[serde(default)]
    pub winner: Option<Side>,
    pub created_at: DateTime<Utc>,
}

impl AbTest {
    pub fn new(name: impl Into<String>, variable: TestVariable, a: Variant, b: Variant) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            variable,
            status: AbTestStatus::Planning,
            variant_a: a,
            variant_b: b,
            winner: None,
            created_at: Utc::now(),
        }
    }

    pub fn variant(&self, side: Side) -> &Variant {
        match side {
            Side::A => &self.variant_a,
            Side::B => &self.variant_b,
        }
    }

    fn variant_mut(&mut self, side: Side) -> &mut Variant {
        match side {
            Side::A => &mut self.variant_a,
            Side::B => &mut self.variant_b,
        }
    }

    /// Both variants as `(a, b)` results, if both have been logged.
    pub fn results(&self) -> Option<(&MetricSample, &MetricSample)> {
        Some((
            self.variant_a.result.as_ref()?,
            self.variant_b.result.as_ref()?,
        ))
    }

    /// Move one step forward through planning -> live -> completed.
    pub fn advance(&mut self) -> PilotResult<AbTestStatus> {
        let next = self
            .status
            .next()
            .ok_or_else(|| PilotError::transition(self.status, "none"))?;
        info!(test_id = %self.id, from = %self.status, to = %next, "A/B test advanced");
        self.status = next;
        Ok(next)
    }

    /// Store (or overwrite) the logged result of one variant.
    pub fn record_result(&mut self, side: Side, sample: MetricSample) -> PilotResult<()> {
        if self.status == AbTestStatus::Completed {
            return Err(PilotError::Validation(format!(
                "test {} is completed",
                self.id
            )));
        }
        self.variant_mut(side).result = Some(sample);
        Ok(())
    }

    /// Declare a winner and complete the test. Only a live test with a
    /// result for both variants can be decided.
    pub fn declare_winner(&mut self, side: Side) -> PilotResult<()> {
        if self.status != AbTestStatus::Live {
            return Err(PilotError::transition(self.status, AbTestStatus::Completed));
        }
        for s in [Side::A, Side::B] {
            if self.variant(s).result.is_none() {
                return Err(PilotError::MissingResult(s.to_string()));
            }
        }
        info!(test_id = %self.id, winner = %side, "A/B test winner declared");
        self.winner = Some(side);
        self.status = AbTestStatus::Completed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test() -> AbTest {
        AbTest::new(
            "Question hook vs stat hook",
            TestVariable::Hook,
            Variant::new("Question", "Did you know...?"),
            Variant::new("Stat", "90% of creators..."),
        )
    }

    fn sample(views: u64) -> MetricSample {
        MetricSample {
            views,
            ..Default::default()
        }
    }

    #[test]
    fn advances_forward_only() {
        let mut t = make_test();
        assert_eq!(t.advance().unwrap(), AbTestStatus::Live);
        assert_eq!(t.advance().unwrap(), AbTestStatus::Completed);
        assert!(t.advance().is_err());
    }

    #[test]
    fn winner_requires_both_results() {
        let mut t = make_test();
        t.advance().unwrap();
        t.record_result(Side::A, sample(100)).unwrap();
        let err = t.declare_winner(Side::A).unwrap_err();
        assert!(matches!(err, PilotError::MissingResult(ref s) if s == "B"));
        assert!(t.winner.is_none());

        t.record_result(Side::B, sample(200)).unwrap();
        t.declare_winner(Side::B).unwrap();
        assert_eq!(t.winner, Some(Side::B));
        assert_eq!(t.status, AbTestStatus::Completed);
    }

    #[test]
    fn completed_test_is_frozen() {
        let mut t = make_test();
        t.advance().unwrap();
        t.record_result(Side::A, sample(1)).unwrap();
        t.record_result(Side::B, sample(2)).unwrap();
        t.declare_winner(Side::A).unwrap();
        assert!(t.record_result(Side::A, sample(5)).is_err());
        assert!(t.declare_winner(Side::B).is_err());
    }

    #[test]
    fn planning_test_cannot_declare_winner() {
        let mut t = make_test();
        t.record_result(Side::A, sample(1)).unwrap();
        t.record_result(Side::B, sample(2)).unwrap();
        let err = t.declare_winner(Side::B).unwrap_err();
        assert!(matches!(err, PilotError::InvalidTransition { .. }));
        assert_eq!(t.status, AbTestStatus::Planning);
        assert!(t.winner.is_none());

        t.advance().unwrap();
        t.declare_winner(Side::B).unwrap();
        assert_eq!(t.status, AbTestStatus::Completed);
    }

    #[test]
    fn results_pairs_both_sides() {
        let mut t = make_test();
        assert!(t.results().is_none());
        t.record_result(Side::A, sample(10)).unwrap();
        t.record_result(Side::B, sample(20)).unwrap();
        let (a, b) = t.results().unwrap();
        assert_eq!((a.views, b.views), (10, 20));
    }

    #[test]
    fn status_serializes_lowercase() {
        let t = make_test();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["status"], "planning");
        assert_eq!(v["variable"], "hook");
        assert!(v["variantA"].is_object());
    }
}
