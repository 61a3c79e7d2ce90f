use crm_core_api::error::ApiError;
use crm_core_db::utils::validation_messages;
use std::error::Error;
use validator::ValidationErrors;

/// PostgreSQL SQLSTATE for a violated CHECK constraint
const CHECK_VIOLATION: &str = "23514";

/// Translates a repository failure into an [`ApiError`].
///
/// Schema-check failures become a `ValidationError` carrying `validation_message`
/// and the per-field messages. Everything else is logged and reported as a
/// `DatabaseError`.
pub fn map_store_error(error: Box<dyn Error + Send + Sync>, validation_message: &str) -> ApiError {
    if let Some(errors) = error.downcast_ref::<ValidationErrors>() {
        return ApiError::ValidationError {
            message: validation_message.to_string(),
            errors: validation_messages(errors),
        };
    }

    if let Some(sqlx::Error::Database(db_error)) = error.downcast_ref::<sqlx::Error>() {
        if db_error.code().as_deref() == Some(CHECK_VIOLATION) {
            tracing::warn!(constraint = ?db_error.constraint(), "store rejected row");
            return ApiError::validation(validation_message);
        }
    }

    tracing::error!(error = %error, "store operation failed");
    ApiError::DatabaseError(error.to_string())
}
