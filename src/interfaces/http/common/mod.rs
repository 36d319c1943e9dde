//! Common HTTP DTOs and extractors.

pub mod validated_json;

pub use validated_json::ValidatedJson;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

/// Status/message envelope returned by register, delete and error paths.
///
/// The SPA expects `{"status": "Success" | "Error", "message": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthStatus {
    pub status: String,
    pub message: String,
}

impl AuthStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// Maps a domain error to its HTTP status.
pub fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Standard error response: status code + `AuthStatus` body.
pub fn domain_error_response(error: DomainError) -> (StatusCode, Json<AuthStatus>) {
    (error_status(&error), Json(AuthStatus::error(error.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_status(&DomainError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DomainError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_status(&DomainError::NotFound {
                entity: "User",
                field: "id",
                value: "1".into()
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DomainError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            error_status(&DomainError::Store("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
