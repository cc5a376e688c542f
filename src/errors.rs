//! # Error Handling
//!
//! Two layers of errors live here:
//!
//! - [`CrudError`] and [`CriteriaError`] are what the orchestrator and the predicate compiler
//!   return. Storage failures are carried unchanged as [`CrudError::Database`].
//! - [`ApiError`] is the HTTP boundary. It turns a `CrudError` into a structured response with a
//!   sanitized, catalog-resolved message and logs internal details through `tracing`.
//!
//! ## Response bodies
//!
//! ```text
//! 404  {"message": "Customer with id 7 not found", "path": null}
//! 400  {"message": "Validation errors", "content": [{"path": "name", "message": "..."}]}
//! 400  {"message": "Unknown search field 'nmae'", "path": "nmae"}
//! 500  {"message": "A database error occurred", "path": null}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

use crate::filtering::{FieldKind, SearchOperation};
use crate::messages::{MessageCatalog, MessageSource, codes};
use crate::validation::ValidationErrors;

/// Malformed search criteria. These are client errors and are never silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("unknown search field '{key}'")]
    FieldResolution { key: String },

    #[error("value '{value}' for field '{key}' is not a valid {kind}")]
    ValueCoercion {
        key: String,
        value: String,
        kind: FieldKind,
    },

    #[error("operation {operation} is not supported on {kind} field '{key}'")]
    UnsupportedOperation {
        key: String,
        operation: SearchOperation,
        kind: FieldKind,
    },
}

impl CriteriaError {
    /// Field key the error refers to.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::FieldResolution { key }
            | Self::ValueCoercion { key, .. }
            | Self::UnsupportedOperation { key, .. } => key,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::FieldResolution { .. } => codes::UNKNOWN_FIELD,
            Self::ValueCoercion { .. } => codes::INVALID_VALUE,
            Self::UnsupportedOperation { .. } => codes::UNSUPPORTED_OPERATION,
        }
    }

    fn args(&self) -> Vec<String> {
        match self {
            Self::FieldResolution { key } => vec![key.clone()],
            Self::ValueCoercion { key, value, kind } => {
                vec![key.clone(), value.clone(), kind.to_string()]
            }
            Self::UnsupportedOperation {
                key,
                operation,
                kind,
            } => vec![key.clone(), operation.to_string(), kind.to_string()],
        }
    }
}

/// Errors returned by [`CrudService`](crate::CrudService) operations.
#[derive(Debug, thiserror::Error)]
pub enum CrudError {
    /// No live record with this id.
    #[error("{resource} with id {id} not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{0}")]
    Validation(ValidationErrors),

    #[error(transparent)]
    Criteria(#[from] CriteriaError),

    /// The id embedded in an update body disagrees with the addressed id.
    #[error("body id {body} does not match path id {path}")]
    IdMismatch { path: String, body: String },

    #[error(transparent)]
    Database(#[from] DbErr),
}

impl CrudError {
    pub fn not_found(resource: &'static str, id: &impl fmt::Display) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<ValidationErrors> for CrudError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

/// One entry of an error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    pub path: Option<String>,
}

/// Error body carrying one entry per failed field constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorListResponse {
    pub message: String,
    pub content: Vec<ErrorResponse>,
}

/// HTTP-facing error with sanitized messages.
#[derive(Debug)]
pub enum ApiError {
    /// 404
    NotFound { message: String },

    /// 400 with an optional offending field
    BadRequest {
        message: String,
        path: Option<String>,
    },

    /// 400 with one entry per violated constraint
    ValidationFailed {
        message: String,
        content: Vec<ErrorResponse>,
    },

    /// 500, details logged and never sent
    Database { message: String, internal: DbErr },
}

impl ApiError {
    /// Translate a core error, resolving user messages through `messages`.
    pub fn from_crud(err: CrudError, messages: &dyn MessageSource) -> Self {
        match err {
            CrudError::NotFound { resource, id } => Self::NotFound {
                message: messages.message_with(codes::ENTITY_NOT_FOUND, &[resource.to_string(), id]),
            },
            CrudError::Validation(errors) => Self::ValidationFailed {
                message: messages.message(codes::VALIDATION_ERRORS),
                content: errors
                    .errors()
                    .iter()
                    .map(|error| ErrorResponse {
                        message: messages.message_with(&error.code, &error.args),
                        path: Some(error.path.clone()),
                    })
                    .collect(),
            },
            CrudError::Criteria(criteria) => Self::BadRequest {
                message: messages.message_with(criteria.code(), &criteria.args()),
                path: Some(criteria.key().to_string()),
            },
            CrudError::IdMismatch { path, body } => Self::BadRequest {
                message: messages.message_with(codes::ID_MISMATCH, &[body, path]),
                path: Some("id".to_string()),
            },
            CrudError::Database(internal) => Self::Database {
                message: messages.message(codes::DATABASE_ERROR),
                internal,
            },
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } | Self::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The sanitized top-level message.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::NotFound { message }
            | Self::BadRequest { message, .. }
            | Self::ValidationFailed { message, .. }
            | Self::Database { message, .. } => message,
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

impl From<CrudError> for ApiError {
    fn from(err: CrudError) -> Self {
        Self::from_crud(err, &MessageCatalog::english())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        match self {
            Self::ValidationFailed { message, content } => {
                (status, Json(ErrorListResponse { message, content })).into_response()
            }
            Self::BadRequest { message, path } => {
                (status, Json(ErrorResponse { message, path })).into_response()
            }
            Self::NotFound { message } | Self::Database { message, .. } => {
                (status, Json(ErrorResponse { message, path: None })).into_response()
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for ApiError {}
