use serde::{Deserialize, Serialize};
use crate::enums::confidence::Confidence;
use crate::enums::verdict::Verdict;

/// Result of the checker model reviewing a single finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub verdict: Verdict,
    pub confidence: Confidence,
    pub rationale: String,
}
