use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::directory::DirectoryImportError;
use crate::workflows::navigator::{FieldErrors, NavigatorServiceError, SessionError};
use crate::workflows::repository::RepositoryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Machine-readable classification shared by every workflow error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    TransientStore,
    Configuration,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::TransientStore => "DATABASE_ERROR",
            ErrorKind::Configuration => "TENANT_NOT_FOUND",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::TransientStore => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Transient store failures are the only kind a caller should retry.
    pub const fn is_retryable(self) -> bool {
        matches!(self, ErrorKind::TransientStore)
    }
}

/// Renders the shared `{ "error", "code" }` payload for a workflow failure.
pub fn error_response(kind: ErrorKind, message: impl Into<String>) -> Response {
    let payload = json!({
        "error": message.into(),
        "code": kind.code(),
    });
    (kind.status(), Json(payload)).into_response()
}

/// Renders per-field validation failures.
pub fn validation_response(errors: &FieldErrors) -> Response {
    let payload = json!({
        "error": "one or more fields are invalid",
        "code": ErrorKind::Validation.code(),
        "fields": errors,
    });
    (ErrorKind::Validation.status(), Json(payload)).into_response()
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Import(DirectoryImportError),
    Navigator(NavigatorServiceError),
    Session(SessionError),
    Repository(RepositoryError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Import(err) => write!(f, "directory import error: {}", err),
            AppError::Navigator(err) => write!(f, "navigator error: {}", err),
            AppError::Session(err) => write!(f, "navigator session error: {}", err),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Navigator(err) => Some(err),
            AppError::Session(err) => Some(err),
            AppError::Repository(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Import(_) => error_response(ErrorKind::Validation, self.to_string()),
            AppError::Navigator(err) => error_response(err.kind(), err.to_string()),
            AppError::Session(SessionError::Invalid(errors)) => validation_response(errors),
            AppError::Session(SessionError::Submission(failure)) => {
                error_response(failure.kind, failure.message.clone())
            }
            AppError::Session(err) => error_response(ErrorKind::Validation, err.to_string()),
            AppError::Repository(err) => error_response(err.kind(), err.to_string()),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => {
                let body = Json(json!({ "error": self.to_string() }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<DirectoryImportError> for AppError {
    fn from(value: DirectoryImportError) -> Self {
        Self::Import(value)
    }
}

impl From<NavigatorServiceError> for AppError {
    fn from(value: NavigatorServiceError) -> Self {
        Self::Navigator(value)
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}
