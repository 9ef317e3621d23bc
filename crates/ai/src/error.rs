//! Recommendation client error types.

use thiserror::Error;

/// Failures of a plan generation attempt. Nothing is persisted after any of them.
#[derive(Debug, Error)]
pub enum AiError {
    /// The caller did not supply an API key.
    #[error("请提供 OpenAI API Key")]
    MissingApiKey,

    /// The endpoint answered with a non-success status. `message` is the
    /// upstream's own `error.message` when it sent one.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// The endpoint did not answer within the configured timeout.
    #[error("生成推荐超时，请稍后重试")]
    Timeout,

    /// The request could not be sent or the reply could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("API返回内容为空")]
    EmptyResponse,

    /// The model text is not a well-formed allocation plan.
    #[error("模型返回格式无效: {0}")]
    InvalidResponse(String),

    #[error("未生成有效的项目配置")]
    NoAllocations,

    /// The plan failed the post-generation audit while strict mode is on.
    #[error("推荐方案未通过校验: {0}")]
    PlanRejected(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the caller can fix the failure by changing the request
    /// (credentials, endpoint, catalog) rather than by retrying.
    pub fn is_caller_correctable(&self) -> bool {
        match self {
            AiError::MissingApiKey | AiError::PlanRejected(_) => true,
            AiError::Upstream { status, .. } => (400..500).contains(status),
            _ => false,
        }
    }

    /// Stable code for logs and programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            AiError::MissingApiKey => "MISSING_API_KEY",
            AiError::Upstream { .. } => "UPSTREAM_ERROR",
            AiError::Timeout => "TIMEOUT",
            AiError::Transport(_) => "TRANSPORT_ERROR",
            AiError::EmptyResponse => "EMPTY_RESPONSE",
            AiError::InvalidResponse(_) => "INVALID_RESPONSE",
            AiError::NoAllocations => "NO_ALLOCATIONS",
            AiError::PlanRejected(_) => "PLAN_REJECTED",
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<reqwest::Error> for AiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AiError::Timeout
        } else {
            AiError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_client_errors_are_correctable() {
        let unauthorized = AiError::Upstream {
            status: 401,
            message: "Incorrect API key provided".into(),
        };
        let overloaded = AiError::Upstream {
            status: 503,
            message: "API调用失败: 503".into(),
        };
        assert!(unauthorized.is_caller_correctable());
        assert!(!overloaded.is_caller_correctable());
        assert!(!AiError::Timeout.is_caller_correctable());
        assert_eq!(unauthorized.to_string(), "Incorrect API key provided");
    }
}
