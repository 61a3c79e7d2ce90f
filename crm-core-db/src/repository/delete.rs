use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;

/// Generic repository trait for hard-deleting a record by ID
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
#[async_trait]
pub trait Delete<DB: Database>: Send + Sync {
    /// Delete a record and everything it owns
    ///
    /// # Arguments
    /// * `id` - The UUID of the record to delete
    ///
    /// # Returns
    /// * `Ok(true)` - The record was deleted
    /// * `Ok(false)` - No record had this ID
    /// * `Err` - An error if the query could not be executed
    async fn delete(&self, id: Uuid) -> Result<bool, Box<dyn std::error::Error + Send + Sync>>;
}
