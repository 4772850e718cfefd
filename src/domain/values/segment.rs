use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Behavioral bucket assigned to a landing page (or an affinity pair joined
/// to one) from its funnel rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "Star")]
    Star,
    #[serde(rename = "High-Traffic Underperformer")]
    HighTrafficUnderperformer,
    #[serde(rename = "Hidden Gem")]
    HiddenGem,
    #[serde(rename = "Checkout Leaker")]
    CheckoutLeaker,
    #[serde(rename = "Cart Abandoner")]
    CartAbandoner,
    #[serde(rename = "Needs Attention")]
    NeedsAttention,
    #[serde(rename = "Average Performer")]
    AveragePerformer,
}

impl Segment {
    pub const ALL: [Segment; 7] = [
        Segment::Star,
        Segment::HighTrafficUnderperformer,
        Segment::HiddenGem,
        Segment::CheckoutLeaker,
        Segment::CartAbandoner,
        Segment::NeedsAttention,
        Segment::AveragePerformer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Segment::Star => "Star",
            Segment::HighTrafficUnderperformer => "High-Traffic Underperformer",
            Segment::HiddenGem => "Hidden Gem",
            Segment::CheckoutLeaker => "Checkout Leaker",
            Segment::CartAbandoner => "Cart Abandoner",
            Segment::NeedsAttention => "Needs Attention",
            Segment::AveragePerformer => "Average Performer",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Segment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        Segment::ALL
            .into_iter()
            .find(|seg| seg.label().to_lowercase().replace('-', " ") == wanted)
            .ok_or_else(|| format!("Unknown segment: {s}"))
    }
}
