pub mod chat_client;
pub mod open_ai;
pub mod open_router;

use crate::errors::{ScannerError, ScannerResult};
use crate::enums::provider_kind::ProviderKind;
use crate::structs::config::checker_config::CheckerConfig;
use crate::structs::config::llm_config::LlmConfig;
use crate::traits::llm_provider::LlmProvider;
use self::open_ai::OpenAiProvider;
use self::open_router::OpenRouterProvider;

pub fn create_provider(config: &LlmConfig) -> ScannerResult<Box<dyn LlmProvider>> {
    build(
        &config.provider,
        &config.api_key,
        &config.model,
        config,
    )
}

/// The checker shares the primary provider's timeout, delay and retry policy
/// but runs against its own credentials and model.
pub fn create_checker_provider(
    checker: &CheckerConfig,
    config: &LlmConfig,
) -> ScannerResult<Box<dyn LlmProvider>> {
    build(&checker.provider, &checker.api_key, &checker.model, config)
}

fn build(
    kind: &ProviderKind,
    api_key: &str,
    model: &str,
    config: &LlmConfig,
) -> ScannerResult<Box<dyn LlmProvider>> {
    if api_key.is_empty() {
        return Err(ScannerError::config_error(
            &format!("no API key configured for provider '{}'", kind),
            Some("Set the provider's API key environment variable"),
        ));
    }

    let provider: Box<dyn LlmProvider> = match kind {
        ProviderKind::OpenRouter => Box::new(OpenRouterProvider::new(api_key, model, config)?),
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(api_key, model, config)?),
        ProviderKind::Custom { base_url } => {
            Box::new(OpenRouterProvider::with_base_url(api_key, model, base_url, config)?)
        }
    };
    Ok(provider)
}
