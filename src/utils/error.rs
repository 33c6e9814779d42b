use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Upstream request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Upstream returned status {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },

    #[error("Malformed upstream payload from {url}: {message}")]
    MalformedPayload { url: String, message: String },

    #[error("Upstream call to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Upstream,
    Timeout,
    InvalidInput,
    Configuration,
    Io,
}

impl ProxyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::ApiError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ProxyError::ApiError(_)
            | ProxyError::UpstreamStatus { .. }
            | ProxyError::MalformedPayload { .. } => ErrorCategory::Upstream,
            ProxyError::Timeout { .. } => ErrorCategory::Timeout,
            ProxyError::InvalidInput { .. } => ErrorCategory::InvalidInput,
            ProxyError::ConfigError { .. }
            | ProxyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProxyError::IoError(_) => ErrorCategory::Io,
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.category() == ErrorCategory::Timeout
    }

    /// Status code reported by the upstream, when the failure came from one.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            ProxyError::UpstreamStatus { status, .. } => Some(*status),
            ProxyError::ApiError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub(crate) fn malformed(url: &str, message: impl Into<String>) -> Self {
        ProxyError::MalformedPayload {
            url: url.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_upstream_and_keeps_code() {
        let err = ProxyError::UpstreamStatus {
            url: "https://pokeapi.co/api/v2/type/nope".to_string(),
            status: 404,
        };
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.upstream_status(), Some(404));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_timeout_category() {
        let err = ProxyError::Timeout {
            url: "http://localhost/slow".to_string(),
            timeout_ms: 50,
        };
        assert!(err.is_timeout());
        assert_eq!(err.upstream_status(), None);
        assert_eq!(
            err.to_string(),
            "Upstream call to http://localhost/slow timed out after 50ms"
        );
    }

    #[test]
    fn test_config_errors_are_configuration() {
        let err = ProxyError::InvalidConfigValueError {
            field: "max_concurrency".to_string(),
            value: "0".to_string(),
            reason: "must be at least 1".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }
}
