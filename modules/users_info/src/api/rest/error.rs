use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::time::Duration;
use thiserror::Error;

use crate::contract::UserId;
use crate::domain::error::DomainError;

/// Everything a users request can fail with. Each variant is terminal for the
/// request and maps to one status code with a short plain-text body.
#[derive(Debug, Error)]
pub enum UsersApiError {
    #[error("invalid ID {0:?}")]
    InvalidId(String),

    #[error("invalid body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("user {id} not found")]
    NotFound { id: UserId },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("internal error")]
    Internal(String),
}

impl UsersApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidId(_) | Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DomainError> for UsersApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::UserNotFound { id } => Self::NotFound { id },
        }
    }
}

impl IntoResponse for UsersApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            // Keep internal details in the log, not in the response
            Self::Internal(detail) => {
                tracing::error!(status = status.as_u16(), detail = %detail, "request failed")
            }
            other => tracing::warn!(status = status.as_u16(), error = %other, "request failed"),
        }

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let bad_body = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cases = [
            (UsersApiError::InvalidId("abc".into()), 400),
            (UsersApiError::InvalidBody(bad_body), 400),
            (UsersApiError::NotFound { id: 3 }, 404),
            (UsersApiError::Timeout(Duration::from_secs(2)), 504),
            (UsersApiError::MethodNotAllowed(Method::PATCH), 405),
            (UsersApiError::Internal("join".into()), 500),
        ];
        for (err, code) in cases {
            assert_eq!(err.status().as_u16(), code, "{err}");
        }
    }

    #[test]
    fn domain_not_found_maps_to_404() {
        let err = UsersApiError::from(DomainError::user_not_found(9));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "user 9 not found");
    }

    #[test]
    fn messages_are_short_plain_text() {
        assert_eq!(
            UsersApiError::InvalidId("abc".into()).to_string(),
            "invalid ID \"abc\""
        );
        assert_eq!(
            UsersApiError::Timeout(Duration::from_secs(2)).to_string(),
            "request timed out after 2s"
        );
        assert_eq!(
            UsersApiError::MethodNotAllowed(Method::PATCH).to_string(),
            "method PATCH not allowed"
        );
        assert_eq!(UsersApiError::Internal("boom".into()).to_string(), "internal error");
    }
}
