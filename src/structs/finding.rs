use serde::Serialize;
use uuid::Uuid;
use crate::enums::confidence::Confidence;
use crate::enums::severity::Severity;
use crate::enums::verdict::Verdict;
use crate::structs::evidence::Evidence;
use crate::structs::validation_outcome::ValidationOutcome;

/// A candidate vulnerability reported by the analysis model.
///
/// The `id` is assigned when the finding is parsed and is the only key used
/// to look up its originating batch code during validation. Validation
/// annotations are written at most once and never revert.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: Uuid,
    pub title: String,
    pub severity: Severity,
    pub description: String,
    pub evidence: Vec<Evidence>,
    pub remediation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attack_scenario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<String>>,

    pub validated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_rationale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validated_by_model: Option<String>,
}

impl Finding {
    pub fn new(title: String, severity: Severity, description: String, evidence: Vec<Evidence>, remediation: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            severity,
            description,
            evidence,
            remediation,
            cvss_score: None,
            impact: None,
            attack_scenario: None,
            references: None,
            validated: false,
            validation_verdict: None,
            validation_confidence: None,
            validation_rationale: None,
            validated_by_model: None,
        }
    }

    /// Record the checker verdict. A finding is annotated at most once.
    pub fn apply_validation(&mut self, outcome: ValidationOutcome, model: &str) {
        if self.validated {
            return;
        }
        self.validated = true;
        self.validation_verdict = Some(outcome.verdict);
        self.validation_confidence = Some(outcome.confidence);
        self.validation_rationale = Some(outcome.rationale);
        self.validated_by_model = Some(model.to_string());
    }

    /// Degrade the finding after a failed validation call. The finding is
    /// kept; it only picks up a Needs Review / Low annotation.
    pub fn mark_needs_review(&mut self, reason: &str, model: &str) {
        if self.validated {
            return;
        }
        self.validated = true;
        self.validation_verdict = Some(Verdict::NeedsReview);
        self.validation_confidence = Some(Confidence::Low);
        self.validation_rationale = Some(format!("Validation error: {}", reason));
        self.validated_by_model = Some(model.to_string());
    }

    /// Fallback code context built from the evidence snippets, used when the
    /// originating batch code is no longer available.
    pub fn evidence_context(&self) -> String {
        self.evidence
            .iter()
            .map(|ev| format!("# File: {}\n{}", ev.file_path, ev.code))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
