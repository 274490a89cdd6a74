use std::time::Duration;
use crate::enums::provider_kind::ProviderKind;
use crate::services::retry_policy::RetryPolicy;
use crate::structs::config::checker_config::CheckerConfig;

/// Provider configuration, built once at process start and threaded through
/// every component. No ambient global state.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub rate_limit_delay: Duration,
    pub retry: RetryPolicy,
    /// Independently configured second model for the maker-checker pass.
    pub checker: Option<CheckerConfig>,
}
