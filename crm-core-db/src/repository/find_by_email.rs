use async_trait::async_trait;
use sqlx::Database;

use crate::models::user::UserModel;

/// Repository trait for looking a user up by their unique email
#[async_trait]
pub trait FindByEmail<DB: Database>: Send + Sync {
    /// # Arguments
    /// * `email` - The email to look up, compared exactly
    ///
    /// # Returns
    /// * `Ok(Some(UserModel))` - The matching user
    /// * `Ok(None)` - If no user has this email
    /// * `Err` - An error if the query could not be executed
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, Box<dyn std::error::Error + Send + Sync>>;
}
