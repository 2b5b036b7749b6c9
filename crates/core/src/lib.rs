//! Shared domain model for Content Pilot: metric samples, ROI campaigns,
//! A/B tests, configuration, and the common error type.

pub mod campaign;
pub mod config;
pub mod error;
pub mod experimentation;
pub mod types;

pub use campaign::{Campaign, CampaignStatus};
pub use crate::config::AppConfig;
pub use error::{PilotError, PilotResult};
pub use experimentation::{AbTest, AbTestStatus, Side, TestVariable, Variant};
pub use types::{MetricSample, RoiEntry};
