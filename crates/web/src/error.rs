use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::{error::StorageError, query::QueryError};
use validator::ValidationErrors;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
    Validation(ValidationErrors),
    BadRequest(String),
    Unauthorized,
    Forbidden,
    NotFound(String),
    InternalServerError(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
            Self::Validation(e) => write!(f, "Validation error: {}", e),
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Unauthorized => write!(f, "Unauthorized"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::NotFound(msg) => write!(f, "{}", msg),
            Self::InternalServerError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Storage(StorageError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Storage(
                StorageError::InvalidIdentifier(_)
                | StorageError::Validation(_)
                | StorageError::Query(_),
            ) => StatusCode::BAD_REQUEST,
            Self::Storage(StorageError::ConstraintViolation(_)) => StatusCode::CONFLICT,
            Self::Storage(StorageError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Storage(StorageError::ConstraintViolation(msg)) => msg.clone(),
            Self::Storage(
                e @ (StorageError::NotFound(_)
                | StorageError::InvalidIdentifier(_)
                | StorageError::Validation(_)
                | StorageError::Query(_)
                | StorageError::InvalidCredentials),
            ) => e.to_string(),
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "An internal error occurred".to_string()
            }
            Self::Validation(errors) => validation_message(errors),
            Self::BadRequest(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Unauthorized => "User not authenticated".to_string(),
            Self::Forbidden => "Insufficient permissions".to_string(),
            Self::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }
}

/// One line per distinct message, ordered by field name.
fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, e.code));
                (field.to_string(), message)
            })
        })
        .collect();
    fields.sort();

    let mut messages: Vec<String> = Vec::with_capacity(fields.len());
    for (_, message) in fields {
        if !messages.contains(&message) {
            messages.push(message);
        }
    }
    messages.join("; ")
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = json!({
            "error": self.message()
        });

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

impl From<QueryError> for WebError {
    fn from(error: QueryError) -> Self {
        Self::Storage(StorageError::Query(error))
    }
}

impl From<ValidationErrors> for WebError {
    fn from(error: ValidationErrors) -> Self {
        Self::Validation(error)
    }
}

impl From<JsonRejection> for WebError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for WebError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<tower_sessions::session::Error> for WebError {
    fn from(error: tower_sessions::session::Error) -> Self {
        Self::InternalServerError(format!("Session error: {}", error))
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;
    use storage::document::Collection;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn storage_errors_map_to_status_codes() {
        let cases = [
            (StorageError::NotFound(Collection::Clubs), StatusCode::NOT_FOUND),
            (
                StorageError::InvalidIdentifier("Invalid club id".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                StorageError::ConstraintViolation("taken".into()),
                StatusCode::CONFLICT,
            ),
            (StorageError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (
                StorageError::Credentials("bad hash".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(WebError::from(error).status_code(), status);
        }
    }

    #[test]
    fn validation_messages_are_deduplicated_and_ordered_by_field() {
        let mut errors = ValidationErrors::new();
        let error = |message: &'static str| ValidationError::new("length").with_message(message.into());
        errors.add("lastName", error("Player must have first name and last name"));
        errors.add("firstName", error("Player must have first name and last name"));
        errors.add("country", error("Player must have a country"));

        assert_eq!(
            validation_message(&errors),
            "Player must have a country; Player must have first name and last name"
        );
    }
}
