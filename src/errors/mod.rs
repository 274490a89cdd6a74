use thiserror::Error;

/// Crate-wide error taxonomy. Only configuration and authentication errors
/// abort a run; transport and parse errors are retried and then demoted to
/// batch-level warnings, file access errors skip the file.
#[derive(Debug, Clone, Error)]
pub enum ScannerError {
    #[error("configuration error: {message}")]
    Configuration {
        message: String,
        suggestion: Option<String>,
    },

    #[error("cannot access {path}: {reason}")]
    FileAccess { path: String, reason: String },

    #[error("transport error during {operation} (status {status_code:?}): {reason}")]
    Transport {
        operation: String,
        status_code: Option<u16>,
        reason: String,
        retryable: bool,
    },

    #[error("authentication rejected by provider: {reason}")]
    Authentication { reason: String },

    #[error("failed to parse {content_type}: {reason}")]
    Parse { content_type: String, reason: String },

    #[error("analysis error during {stage}: {reason}")]
    Analysis { stage: String, reason: String },
}

impl ScannerError {
    pub fn config_error(message: &str, suggestion: Option<&str>) -> Self {
        Self::Configuration {
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    pub fn file_error(path: &str, reason: &str) -> Self {
        Self::FileAccess {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn transport_error(operation: &str, status_code: Option<u16>, reason: &str, retryable: bool) -> Self {
        Self::Transport {
            operation: operation.to_string(),
            status_code,
            reason: reason.to_string(),
            retryable,
        }
    }

    pub fn parse_error(content_type: &str, reason: &str) -> Self {
        Self::Parse {
            content_type: content_type.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn analysis_error(stage: &str, reason: &str) -> Self {
        Self::Analysis {
            stage: stage.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Errors sharing the retry envelope: transient transport failures and
    /// malformed model responses. Everything else is surfaced immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { retryable, .. } => *retryable,
            Self::Parse { .. } => true,
            _ => false,
        }
    }

    pub fn user_message(&self) -> String {
        let mut msg = self.to_string();
        if let Self::Configuration { suggestion: Some(suggestion), .. } = self {
            msg.push_str(&format!("\n💡 Suggestion: {}", suggestion));
        }
        msg
    }
}

/// Result type alias for scanner operations
pub type ScannerResult<T> = Result<T, ScannerError>;

impl From<std::io::Error> for ScannerError {
    fn from(error: std::io::Error) -> Self {
        ScannerError::FileAccess {
            path: "<unspecified>".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for ScannerError {
    fn from(error: serde_json::Error) -> Self {
        ScannerError::Parse {
            content_type: "JSON".to_string(),
            reason: error.to_string(),
        }
    }
}

impl From<reqwest::Error> for ScannerError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let retryable = error.is_timeout()
            || error.is_connect()
            || matches!(status_code, Some(429) | Some(500..=599));
        ScannerError::Transport {
            operation: "HTTP request".to_string(),
            status_code,
            reason: error.to_string(),
            retryable,
        }
    }
}
