use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One failing form field, shaped like the messages the UI already shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub param: &'static str,
    pub msg: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, param: &'static str, msg: impl Into<String>) {
        self.0.push(FieldError {
            param,
            msg: msg.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|field| field.param)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let payload = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        write!(f, "Validation error: {payload}")
    }
}

#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("workout {0} not found")]
    NotFound(i64),

    #[error("unknown filter type: {0}")]
    UnknownFilterKind(String),

    #[error("storage error during {op}: {source}")]
    Storage {
        op: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl WorkoutError {
    pub fn storage(op: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Storage { op, source }
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

impl From<ValidationErrors> for WorkoutError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Form posts answer failures with a 200 and a plain-text line instead of
    /// an error page.
    pub fn form(err: &WorkoutError, fallback: &str) -> Self {
        let message = match err {
            WorkoutError::Storage { .. } => fallback.to_string(),
            WorkoutError::NotFound(_) => {
                format!("{fallback}: Could not retrieve current values")
            }
            other => other.to_string(),
        };
        Self {
            status: StatusCode::OK,
            message,
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// JSON flavour of [`AppError`] used by the `/api` routes.
#[derive(Debug)]
pub struct ApiError(pub AppError);

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl From<WorkoutError> for ApiError {
    fn from(err: WorkoutError) -> Self {
        let inner = match &err {
            WorkoutError::Validation(_) => AppError::bad_request(err.to_string()),
            WorkoutError::UnknownFilterKind(_) => AppError::bad_request("Invalid filter type"),
            WorkoutError::NotFound(_) => AppError {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            WorkoutError::Storage { .. } => AppError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Database error".to_string(),
            },
        };
        Self(inner)
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = ErrorBody {
            error: &self.0.message,
        };
        (self.0.status, Json(body)).into_response()
    }
}
