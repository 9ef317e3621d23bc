use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folioadvisor_ai::AiError;
use folioadvisor_core::errors::{DatabaseError, Error as CoreError};
use serde::Serialize;
use thiserror::Error;

pub const INTERNAL_ERROR: &str = "服务器内部错误";
pub const GENERATION_FAILED: &str = "生成推荐失败";
pub const MALFORMED_BODY: &str = "请求数据格式错误";
pub const REQUEST_TIMED_OUT: &str = "请求超时";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Ai(#[from] AiError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
    #[error("request timed out")]
    Timeout,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
                CoreError::ConstraintViolation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                CoreError::Database(DatabaseError::UniqueViolation(_)) => {
                    (StatusCode::BAD_REQUEST, folioadvisor_core::users::USERNAME_TAKEN.into())
                }
                // A token whose subject no longer has a user row.
                CoreError::Database(DatabaseError::ForeignKeyViolation(_)) => {
                    (StatusCode::UNAUTHORIZED, crate::auth::UNAUTHORIZED.to_string())
                }
                _ => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
            },
            ApiError::Ai(e) => {
                if e.is_caller_correctable() {
                    return (StatusCode::BAD_REQUEST, e.to_string());
                }
                match e {
                    AiError::Transport(_) | AiError::Internal(_) => {
                        (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED.to_string())
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
                }
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string()),
            ApiError::Timeout => (StatusCode::REQUEST_TIMEOUT, REQUEST_TIMED_OUT.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            match &self {
                ApiError::Ai(e) => tracing::error!(code = e.code(), "Recommendation failed: {}", e),
                other => tracing::error!("Request failed: {:?}", other),
            }
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(MALFORMED_BODY.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> (StatusCode, String) {
        err.status_and_message()
    }

    #[test]
    fn test_validation_message_is_passed_through() {
        let (status, msg) = status_of(CoreError::invalid("用户名至少3个字符").into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(msg, "用户名至少3个字符");
    }

    #[test]
    fn test_storage_failures_are_generic() {
        let err: ApiError =
            CoreError::Database(DatabaseError::ConnectionFailed("redis://10.0.0.3 refused".into()))
                .into();
        let (status, msg) = status_of(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!msg.contains("redis"));
    }

    #[test]
    fn test_missing_owner_is_unauthorized() {
        let err: ApiError =
            CoreError::Database(DatabaseError::ForeignKeyViolation("user 42".into())).into();
        assert_eq!(
            status_of(err),
            (StatusCode::UNAUTHORIZED, crate::auth::UNAUTHORIZED.to_string())
        );
    }

    #[test]
    fn test_upstream_status_decides_class() {
        let client_side = AiError::Upstream {
            status: 401,
            message: "Incorrect API key provided".into(),
        };
        assert_eq!(
            status_of(client_side.into()),
            (StatusCode::BAD_REQUEST, "Incorrect API key provided".to_string())
        );

        let server_side = AiError::Upstream {
            status: 503,
            message: "API调用失败: 503".into(),
        };
        assert_eq!(status_of(server_side.into()).0, StatusCode::INTERNAL_SERVER_ERROR);

        let (_, msg) = status_of(AiError::Transport("dns error: api.internal".into()).into());
        assert_eq!(msg, GENERATION_FAILED);
    }
}
