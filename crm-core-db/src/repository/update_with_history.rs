use async_trait::async_trait;
use sqlx::Database;

use crate::models::entry::{EntryModel, HistoryEntryModel};

/// Repository trait for replacing an entry's fields and appending to its history
///
/// The field write and the history append are atomic for the single entry.
/// Stored history is never rewritten: only `appended` is added to it.
#[async_trait]
pub trait UpdateWithHistory<DB: Database>: Send + Sync {
    /// Update an entry
    ///
    /// # Arguments
    /// * `item` - The entry with its new field values; `item.history` already ends with `appended`
    /// * `appended` - The history snapshot recorded by this update, if any
    ///
    /// # Returns
    /// * `Ok(Some(EntryModel))` - The stored entry
    /// * `Ok(None)` - If the entry no longer exists
    /// * `Err` - A validation error, a constraint violation, or a query failure
    async fn update_with_history(
        &self,
        item: EntryModel,
        appended: Option<HistoryEntryModel>,
    ) -> Result<Option<EntryModel>, Box<dyn std::error::Error + Send + Sync>>;
}
