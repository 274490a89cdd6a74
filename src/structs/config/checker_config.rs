use crate::enums::provider_kind::ProviderKind;

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    pub model: String,
}
