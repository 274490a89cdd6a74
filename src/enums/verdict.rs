use std::fmt;
use serde::{Deserialize, Serialize};

/// Checker model verdict for a validated finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Confirmed,
    #[serde(rename = "Likely False Positive")]
    LikelyFalsePositive,
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Confirmed => "Confirmed",
            Self::LikelyFalsePositive => "Likely False Positive",
            Self::NeedsReview => "Needs Review",
        };
        write!(f, "{}", name)
    }
}
