//! Three-tier classification of an observed cost against its target.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound of the marginal band as a multiple of the target.
pub const MARGINAL_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Good,
    Marginal,
    Bad,
    /// No usable data yet.
    None,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::Good => "good",
            Signal::Marginal => "marginal",
            Signal::Bad => "bad",
            Signal::None => "none",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify `observed` against `target` using the default 1.5x marginal band.
pub fn classify(observed: f64, target: f64) -> Signal {
    classify_with(observed, target, MARGINAL_MULTIPLIER)
}

/// Like [`classify`] with an explicit marginal multiplier.
///
/// Both boundaries are inclusive towards the better class: `observed == target`
/// is good and `observed == target * multiplier` is marginal.
pub fn classify_with(observed: f64, target: f64, multiplier: f64) -> Signal {
    if !observed.is_finite() || observed <= 0.0 {
        Signal::None
    } else if observed <= target {
        Signal::Good
    } else if observed <= target * multiplier {
        Signal::Marginal
    } else {
        Signal::Bad
    }
}
