// Callable entry point error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// Typed error returned to a manual reset caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallableError {
    // 401 Unauthorized
    Unauthenticated(String),

    // 403 Forbidden
    PermissionDenied(String),

    // 412 Precondition Failed
    FailedPrecondition(String),

    // 400 Bad Request
    InvalidArgument(String),

    // 500 Internal Server Error
    Internal(String),
}

impl CallableError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            CallableError::Unauthenticated(_) => 401,
            CallableError::PermissionDenied(_) => 403,
            CallableError::FailedPrecondition(_) => 412,
            CallableError::InvalidArgument(_) => 400,
            CallableError::Internal(_) => 500,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CallableError::Unauthenticated(msg) => msg,
            CallableError::PermissionDenied(msg) => msg,
            CallableError::FailedPrecondition(msg) => msg,
            CallableError::InvalidArgument(msg) => msg,
            CallableError::Internal(msg) => msg,
        }
    }

    /// Error category as seen by callers
    pub fn error_code(&self) -> &'static str {
        match self {
            CallableError::Unauthenticated(_) => "unauthenticated",
            CallableError::PermissionDenied(_) => "permission-denied",
            CallableError::FailedPrecondition(_) => "failed-precondition",
            CallableError::InvalidArgument(_) => "invalid-argument",
            CallableError::Internal(_) => "internal",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code()
        })
    }
}

impl CallableError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        CallableError::Unauthenticated(message.into())
    }

    pub fn permission_denied(message: impl Into<String>) -> Self {
        CallableError::PermissionDenied(message.into())
    }

    pub fn failed_precondition(message: impl Into<String>) -> Self {
        CallableError::FailedPrecondition(message.into())
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        CallableError::InvalidArgument(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CallableError::Internal(message.into())
    }
}

impl std::fmt::Display for CallableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for CallableError {}

impl IntoResponse for CallableError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_and_statuses_line_up() {
        let cases = [
            (CallableError::unauthenticated("x"), 401, "unauthenticated"),
            (CallableError::permission_denied("x"), 403, "permission-denied"),
            (CallableError::failed_precondition("x"), 412, "failed-precondition"),
            (CallableError::invalid_argument("x"), 400, "invalid-argument"),
            (CallableError::internal("x"), 500, "internal"),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status);
            assert_eq!(err.error_code(), code);
        }
    }

    #[test]
    fn json_body_carries_code_and_message() {
        let body = CallableError::permission_denied("Only admins").to_json();
        assert_eq!(body["code"], "permission-denied");
        assert_eq!(body["message"], "Only admins");
        assert_eq!(body["error"], true);
    }
}
