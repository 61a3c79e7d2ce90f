use async_trait::async_trait;
use sqlx::Database;

use crate::models::identifiable::Identifiable;

/// A row of an unordered insert that could not be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// Position of the row in the submitted batch
    pub index: usize,
    /// Why the row was rejected (logged, not shown to callers)
    pub reason: String,
}

/// Outcome of an unordered insert
#[derive(Debug, Clone, PartialEq)]
pub struct UnorderedInsertOutcome<T> {
    pub inserted: Vec<T>,
    pub failures: Vec<RowFailure>,
}

impl<T> UnorderedInsertOutcome<T> {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

impl<T> Default for UnorderedInsertOutcome<T> {
    fn default() -> Self {
        Self {
            inserted: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Generic repository trait for best-effort insertion of many records
///
/// Each record is validated and written independently: a rejected record does
/// not prevent any other record of the batch from being attempted, and records
/// that were written stay written.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The record type that must implement Identifiable trait
///
/// # Example
/// ```ignore
/// let outcome = repo.insert_unordered(batch).await?;
/// for failure in &outcome.failures {
///     tracing::warn!(index = failure.index, reason = %failure.reason, "row rejected");
/// }
/// ```
#[async_trait]
pub trait InsertUnordered<DB: Database, T: Identifiable>: Send + Sync {
    /// Insert every record that passes validation and store constraints
    ///
    /// # Arguments
    /// * `items` - The records to insert
    ///
    /// # Returns
    /// * `Ok(UnorderedInsertOutcome<T>)` - The stored records and the rejected rows
    /// * `Err` - Only when the store itself is unreachable
    async fn insert_unordered(
        &self,
        items: Vec<T>,
    ) -> Result<UnorderedInsertOutcome<T>, Box<dyn std::error::Error + Send + Sync>>;
}
