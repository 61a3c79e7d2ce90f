use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for reading a whole collection
///
/// Records are returned in creation order.
#[async_trait]
pub trait FindAll<DB: Database, T: Identifiable>: Send + Sync {
    /// # Returns
    /// * `Ok(Vec<T>)` - Every record of the collection
    /// * `Err` - An error if the query could not be executed
    async fn find_all(&self) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
