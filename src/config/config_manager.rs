use std::env;
use std::time::Duration;
use crate::config::constants;
use crate::enums::provider_kind::ProviderKind;
use crate::errors::{ScannerError, ScannerResult};
use crate::services::retry_policy::RetryPolicy;
use crate::structs::config::checker_config::CheckerConfig;
use crate::structs::config::llm_config::LlmConfig;
use crate::structs::config::scan_config::ScanConfig;

pub struct ConfigManager;

impl ConfigManager {
    /// Build the provider configuration from environment variables. All
    /// configuration errors surface here, before any network activity.
    pub fn llm_config_from_env() -> ScannerResult<LlmConfig> {
        let provider_name = env::var(constants::LLM_PROVIDER_ENV)
            .unwrap_or_else(|_| "openrouter".to_string())
            .to_lowercase();

        let (provider, api_key, model) = Self::provider_settings(&provider_name)?;

        let timeout = Duration::from_secs(Self::env_u64(
            constants::REQUEST_TIMEOUT_ENV,
            constants::DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);
        let rate_limit_delay = Duration::from_secs_f64(Self::env_f64(
            constants::RATE_LIMIT_DELAY_ENV,
            constants::DEFAULT_RATE_LIMIT_DELAY_SECS,
        )?);

        let checker = Self::checker_from_env()?;

        Ok(LlmConfig {
            provider,
            api_key,
            model,
            timeout,
            rate_limit_delay,
            retry: RetryPolicy::default(),
            checker,
        })
    }

    fn provider_settings(provider_name: &str) -> ScannerResult<(ProviderKind, String, String)> {
        match provider_name {
            "openrouter" => Ok((
                ProviderKind::OpenRouter,
                Self::required(constants::OPENROUTER_API_KEY_ENV)?,
                Self::env_or(constants::OPENROUTER_MODEL_ENV, constants::DEFAULT_OPENROUTER_MODEL),
            )),
            "openai" => Ok((
                ProviderKind::OpenAi,
                Self::required(constants::OPENAI_API_KEY_ENV)?,
                Self::env_or(constants::OPENAI_MODEL_ENV, constants::DEFAULT_OPENAI_MODEL),
            )),
            "custom" => {
                let base_url = env::var(constants::CUSTOM_PROVIDER_URL_ENV).map_err(|_| {
                    ScannerError::config_error(
                        "CUSTOM_PROVIDER_URL is required for the custom provider",
                        Some("export CUSTOM_PROVIDER_URL=https://your-endpoint/v1"),
                    )
                })?;
                Ok((
                    ProviderKind::Custom { base_url },
                    Self::required(constants::CUSTOM_API_KEY_ENV)?,
                    Self::env_or(constants::CUSTOM_MODEL_ENV, "default-model"),
                ))
            }
            other => Err(ScannerError::config_error(
                &format!("unknown provider: {}", other),
                Some("set LLM_PROVIDER to openrouter, openai, or custom"),
            )),
        }
    }

    fn checker_from_env() -> ScannerResult<Option<CheckerConfig>> {
        let enabled = env::var(constants::ENABLE_CHECKER_ENV)
            .map(|value| value.to_lowercase() == "true")
            .unwrap_or(false);
        if !enabled {
            return Ok(None);
        }

        let provider_name = env::var(constants::CHECKER_PROVIDER_ENV)
            .unwrap_or_else(|_| "openrouter".to_string())
            .to_lowercase();

        let provider = match provider_name.as_str() {
            "openrouter" => ProviderKind::OpenRouter,
            "openai" => ProviderKind::OpenAi,
            "custom" => {
                let base_url = env::var(constants::CHECKER_PROVIDER_URL_ENV).map_err(|_| {
                    ScannerError::config_error(
                        "CHECKER_PROVIDER_URL is required for a custom checker provider",
                        Some("export CHECKER_PROVIDER_URL=https://your-endpoint/v1"),
                    )
                })?;
                ProviderKind::Custom { base_url }
            }
            other => {
                return Err(ScannerError::config_error(
                    &format!("unknown checker provider: {}", other),
                    Some("set CHECKER_PROVIDER to openrouter, openai, or custom"),
                ))
            }
        };

        Ok(Some(CheckerConfig {
            provider,
            api_key: Self::required(constants::CHECKER_API_KEY_ENV)?,
            model: Self::required(constants::CHECKER_MODEL_ENV)?,
        }))
    }

    /// Pre-flight validation of the combined configuration.
    pub fn validate(scan_config: &ScanConfig, llm_config: &LlmConfig) -> ScannerResult<()> {
        if llm_config.api_key.trim().is_empty() {
            return Err(ScannerError::config_error(
                "API key is empty",
                Some("check the provider API key environment variable"),
            ));
        }

        if scan_config.max_workers == 0 || scan_config.max_workers > constants::MAX_WORKERS_LIMIT {
            return Err(ScannerError::config_error(
                &format!(
                    "max_workers must be between 1 and {}, got {}",
                    constants::MAX_WORKERS_LIMIT,
                    scan_config.max_workers
                ),
                Some("pass a smaller --max-workers value"),
            ));
        }

        if scan_config.chunk_size < 1024 || scan_config.batch_size < 1024 {
            return Err(ScannerError::config_error(
                "chunk_size and batch_size must be at least 1024 bytes",
                None,
            ));
        }

        if let ProviderKind::Custom { base_url } = &llm_config.provider {
            if base_url.trim().is_empty() {
                return Err(ScannerError::config_error(
                    "custom provider base URL is empty",
                    Some("export CUSTOM_PROVIDER_URL=https://your-endpoint/v1"),
                ));
            }
        }

        Ok(())
    }

    fn required(name: &str) -> ScannerResult<String> {
        env::var(name).map_err(|_| {
            ScannerError::config_error(
                &format!("{} is not set", name),
                Some(&format!("export {}=<value> before running a scan", name)),
            )
        })
    }

    fn env_or(name: &str, default: &str) -> String {
        env::var(name).unwrap_or_else(|_| default.to_string())
    }

    fn env_u64(name: &str, default: u64) -> ScannerResult<u64> {
        match env::var(name) {
            Ok(value) => value.parse::<u64>().map_err(|_| {
                ScannerError::config_error(
                    &format!("{} must be an integer, got '{}'", name, value),
                    None,
                )
            }),
            Err(_) => Ok(default),
        }
    }

    fn env_f64(name: &str, default: f64) -> ScannerResult<f64> {
        match env::var(name) {
            Ok(value) => value.parse::<f64>().map_err(|_| {
                ScannerError::config_error(
                    &format!("{} must be a number, got '{}'", name, value),
                    None,
                )
            }),
            Err(_) => Ok(default),
        }
    }
}
