//! API Error Boundary
//! Mission: One place that turns every failure into a status code and JSON body

use crate::auth::jwt::TokenError;
use crate::db::StoreError;
use crate::validation::{FieldError, ValidationErrors};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// Errors returned by handlers and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed fields, or a malformed identity (400)
    #[error("{0}")]
    Validation(ValidationErrors),

    /// Missing, invalid or non-owning token (401)
    #[error("{0}")]
    Unauthorized(&'static str),

    /// Login failure (401)
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Unknown identity (404)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Anything unexpected (500). Never shown to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<FieldError>>,
}

impl ApiError {
    pub fn malformed_id() -> Self {
        Self::Validation(ValidationErrors::single(FieldError::malformed(
            "id",
            "malformatted id",
        )))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            Self::Validation(errors) => ErrorBody {
                error: errors.to_string(),
                fields: Some(errors.errors().to_vec()),
            },
            Self::Internal(cause) => {
                error!(error = ?cause, "Unhandled error while serving request");
                ErrorBody {
                    error: "internal server error".to_string(),
                    fields: None,
                }
            }
            other => ErrorBody {
                error: other.to_string(),
                fields: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateUsername => {
                Self::Validation(ValidationErrors::single(FieldError::unique("username")))
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidToken(e) => {
                warn!(error = %e, "Rejected bearer token");
                Self::Unauthorized("token invalid")
            }
            other => Self::Internal(other.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationErrors::single(FieldError::malformed(
            "body",
            rejection.body_text(),
        )))
    }
}
