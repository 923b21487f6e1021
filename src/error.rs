use std::borrow::Cow;
use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::{ValidationError, ValidationErrors};

pub type Result<T> = std::result::Result<T, Error>;

pub const VALIDATION_MESSAGE: &str = "The given data was invalid.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Excel export error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Single-field validation failure.
    pub fn invalid_field(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new("invalid").with_message(message.into()));
        Error::Validation(errors)
    }
}

/// Flattens validator output into `{field: [messages]}`, the shape the
/// front-end iterates over.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("The {} field is invalid.", field.replace('_', " ")),
                })
                .collect();
            (field, messages)
        })
        .collect()
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::Validation(errors) => {
                let body = json!({
                    "message": VALIDATION_MESSAGE,
                    "errors": field_messages(&errors),
                });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
            }
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::DuplicateEmail(email) => (
                StatusCode::CONFLICT,
                format!("A salary record for {} already exists", email),
            ),
            Error::Database(err) => {
                tracing::error!(error = %err, "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            Error::Xlsx(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Export error: {}", err),
            ),
            other => {
                tracing::error!(error = %other, "Unhandled error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::invalid_field("body", rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::invalid_field("path", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value as JsonValue;

    async fn body_of(err: Error) -> (StatusCode, JsonValue) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_errors_render_per_field_lists() {
        let (status, body) =
            body_of(Error::invalid_field("email", "The email must be a valid email address.")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], VALIDATION_MESSAGE);
        assert_eq!(
            body["errors"]["email"][0],
            "The email must be a valid email address."
        );
    }

    #[tokio::test]
    async fn not_found_keeps_message() {
        let (status, body) = body_of(Error::NotFound("User not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn storage_failures_hide_details() {
        let (status, body) = body_of(Error::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal server error");
    }

    #[test]
    fn missing_message_falls_back_to_field_name() {
        let mut errors = ValidationErrors::new();
        errors.add("salary_in_euros", ValidationError::new("range"));
        let map = field_messages(&errors);
        assert_eq!(
            map["salary_in_euros"],
            vec!["The salary in euros field is invalid.".to_string()]
        );
    }
}
