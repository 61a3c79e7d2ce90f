use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        errors: Vec<String>,
    },

    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// The actor id carried by the session credential is malformed
    #[error("Invalid user id: {0}")]
    InvalidUserId(String),

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl ApiError {
    /// Validation failure without per-field detail
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    /// HTTP status code the failure maps to
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. }
            | ApiError::InvalidId(_)
            | ApiError::InvalidUserId(_) => 400,
            ApiError::Unauthenticated(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => 500,
        }
    }

    /// Whether the message is safe to hand back to the caller verbatim.
    ///
    /// Internal and database failures carry store detail that is only logged.
    pub fn is_client_facing(&self) -> bool {
        !matches!(self, ApiError::InternalError(_) | ApiError::DatabaseError(_))
    }

    /// Machine readable code attached to failure replies, when there is one
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            ApiError::InvalidId(_) => Some("INVALID_ID"),
            ApiError::InvalidUserId(_) => Some("INVALID_USER_ID"),
            ApiError::InternalError(_) | ApiError::DatabaseError(_) => Some("SERVER_ERROR"),
            _ => None,
        }
    }

    /// The human readable message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidId(m)
            | ApiError::InvalidUserId(m)
            | ApiError::Unauthenticated(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::InternalError(m)
            | ApiError::DatabaseError(m) => m,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
