use async_trait::async_trait;
use crate::config::constants;
use crate::errors::ScannerResult;
use crate::prompts::finding_validation::{build_validation_prompt, VALIDATION_SYSTEM_PROMPT};
use crate::prompts::security_analysis::{build_security_prompt, SECURITY_SYSTEM_PROMPT};
use crate::services::providers::chat_client::ChatClient;
use crate::services::response_parser;
use crate::structs::analysis_context::AnalysisContext;
use crate::structs::config::llm_config::LlmConfig;
use crate::structs::finding::Finding;
use crate::structs::validation_outcome::ValidationOutcome;
use crate::traits::llm_provider::LlmProvider;

pub struct OpenAiProvider {
    client: ChatClient,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, model: &str, config: &LlmConfig) -> ScannerResult<Self> {
        let client = ChatClient::new(api_key, model, constants::OPENAI_BASE_URL, Vec::new(), config)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn analyze_code(&self, code_chunk: &str, context: &AnalysisContext) -> ScannerResult<Vec<Finding>> {
        let prompt = build_security_prompt(code_chunk, context);
        self.client
            .complete(
                SECURITY_SYSTEM_PROMPT,
                &prompt,
                constants::ANALYSIS_TEMPERATURE,
                constants::ANALYSIS_MAX_TOKENS,
                response_parser::parse_findings,
            )
            .await
    }

    async fn validate_finding(&self, finding: &Finding, original_code: &str) -> ScannerResult<ValidationOutcome> {
        let prompt = build_validation_prompt(finding, original_code);
        self.client
            .complete(
                VALIDATION_SYSTEM_PROMPT,
                &prompt,
                constants::VALIDATION_TEMPERATURE,
                constants::VALIDATION_MAX_TOKENS,
                response_parser::parse_validation,
            )
            .await
    }

    fn model(&self) -> &str {
        self.client.model()
    }
}
