use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for inserting one record
///
/// Implementations run the record's schema validation before writing and
/// return a boxed `validator::ValidationErrors` when it fails.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable trait
#[async_trait]
pub trait Create<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert a single record
    ///
    /// # Arguments
    /// * `item` - The record to insert, with its ID already generated
    ///
    /// # Returns
    /// * `Ok(T)` - The stored record
    /// * `Err` - A validation error, a constraint violation, or a query failure
    async fn create(&self, item: T) -> Result<T, Box<dyn std::error::Error + Send + Sync>>;
}
