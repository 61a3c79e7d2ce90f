use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

use crate::models::owned::Owned;

/// Generic repository trait for reading the records created by one user
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Owned trait
#[async_trait]
pub trait FindByOwner<DB: Database, T: Owned>: Send + Sync {
    /// Find every record whose owner is `owner_id`, in creation order
    ///
    /// # Arguments
    /// * `owner_id` - The UUID of the creating user
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - The owned records (empty if there are none)
    /// * `Err` - An error if the query could not be executed
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
