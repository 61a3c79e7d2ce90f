use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JSON envelope shared by every operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/// Terminal response of one operation: a status code and its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply<T> {
    pub status: u16,
    pub body: ApiResponse<T>,
}

impl<T> Reply<T> {
    pub fn with_status(status: u16, data: Option<T>, message: Option<String>) -> Self {
        Self {
            status,
            body: ApiResponse {
                success: true,
                data,
                message,
                errors: Vec::new(),
                error_code: None,
            },
        }
    }

    pub fn ok(data: T) -> Self {
        Self::with_status(200, Some(data), None)
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self::with_status(200, Some(data), Some(message.into()))
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(201, Some(data), Some(message.into()))
    }

    pub fn message_only(status: u16, message: impl Into<String>) -> Self {
        Self::with_status(status, None, Some(message.into()))
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.body.errors = errors;
        self
    }

    /// Failure reply. Internal failures are replaced by `fallback`, a message
    /// that is safe to show.
    pub fn from_error(error: &ApiError, fallback: &str) -> Self {
        let message = if error.is_client_facing() {
            error.message().to_string()
        } else {
            fallback.to_string()
        };
        let errors = match error {
            ApiError::ValidationError { errors, .. } => errors.clone(),
            _ => Vec::new(),
        };
        let error_code = error.error_code().map(str::to_string);
        Self {
            status: error.status_code(),
            body: ApiResponse {
                success: false,
                data: None,
                message: Some(message),
                errors,
                error_code,
            },
        }
    }

    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.body.error_code = Some(code.into());
        self
    }
}
