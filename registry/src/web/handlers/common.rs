// Common types and utilities for API handlers

use axum::{body::Bytes, http::StatusCode, response::Json};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::error::Category;
use tracing::{error, warn};

use crate::constants::messages;
use crate::errors::RegistryError;

// Helper type for API responses
pub type ApiResult<T> = Result<(StatusCode, Json<ApiEnvelope<T>>), (StatusCode, Json<ApiEnvelope<()>>)>;

/// `{ success, message?, error?, data?, count? }`; absent fields are omitted.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            error: None,
            data: Some(data),
            count: None,
        }
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}

impl ApiEnvelope<()> {
    pub fn error(message: String, code: &str) -> Self {
        Self {
            success: false,
            message: Some(message),
            error: Some(code.to_string()),
            data: None,
            count: None,
        }
    }
}

pub fn status_for(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::Validation { .. } | RegistryError::MissingId => StatusCode::BAD_REQUEST,
        RegistryError::NotFound { .. } => StatusCode::NOT_FOUND,
        RegistryError::UpdateFailed { .. }
        | RegistryError::DeleteFailed { .. }
        | RegistryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts a registry error into its envelope. Internal failures are logged
/// in full and reported to the client as `failure_message` only.
pub fn error_response(
    err: RegistryError,
    failure_message: &str,
) -> (StatusCode, Json<ApiEnvelope<()>>) {
    let status = status_for(&err);
    let message = if err.is_internal() {
        error!("{}: {}", failure_message, err);
        failure_message.to_string()
    } else {
        warn!("Request rejected ({}): {}", err.code(), err);
        err.to_string()
    };
    (status, Json(ApiEnvelope::error(message, err.code())))
}

/// Parses a JSON request body; anything unparseable is a validation error.
/// Well-formed JSON of the wrong shape is reported apart from broken syntax.
pub fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, RegistryError> {
    serde_json::from_slice(body).map_err(|e| {
        let prefix = match e.classify() {
            Category::Data => messages::INVALID_BODY_FIELDS,
            Category::Syntax | Category::Eof | Category::Io => messages::INVALID_JSON_BODY,
        };
        RegistryError::validation(format!("{}: {}", prefix, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CreateMailServerRequest;

    fn parse_error(raw: &'static str) -> String {
        parse_body::<CreateMailServerRequest>(&Bytes::from_static(raw.as_bytes()))
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_syntax_errors_report_invalid_json() {
        assert!(parse_error("{not json").starts_with(messages::INVALID_JSON_BODY));
        assert!(parse_error("").starts_with(messages::INVALID_JSON_BODY));
    }

    #[test]
    fn test_type_mismatch_reports_invalid_field() {
        let message = parse_error(r#"{"name": 5, "hostname": "resend"}"#);
        assert!(message.starts_with(messages::INVALID_BODY_FIELDS));
        assert!(!message.contains(messages::INVALID_JSON_BODY));
    }
}
