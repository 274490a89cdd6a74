use std::fmt;

/// Provider variant, fixed at construction time. The custom variant carries
/// its endpoint explicitly instead of patching a shared default afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    OpenRouter,
    OpenAi,
    Custom { base_url: String },
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenRouter => write!(f, "openrouter"),
            Self::OpenAi => write!(f, "openai"),
            Self::Custom { base_url } => write!(f, "custom ({})", base_url),
        }
    }
}
