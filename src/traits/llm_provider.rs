use async_trait::async_trait;
use crate::errors::ScannerResult;
use crate::structs::analysis_context::AnalysisContext;
use crate::structs::finding::Finding;
use crate::structs::validation_outcome::ValidationOutcome;

/// Interface over the chat-completion backends. Implementations retry
/// transient failures internally and apply the post-call rate-limit delay;
/// callers see either a final result or a final error.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Analyze an annotated code blob and return the findings it contains.
    async fn analyze_code(&self, code_chunk: &str, context: &AnalysisContext) -> ScannerResult<Vec<Finding>>;

    /// Second-stage review of one finding against its original code context.
    async fn validate_finding(&self, finding: &Finding, original_code: &str) -> ScannerResult<ValidationOutcome>;

    fn model(&self) -> &str;
}
