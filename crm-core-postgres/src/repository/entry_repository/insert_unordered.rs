use async_trait::async_trait;
use crm_core_db::models::entry::EntryModel;
use crm_core_db::repository::insert_unordered::{InsertUnordered, RowFailure, UnorderedInsertOutcome};
use sqlx::Postgres;
use std::error::Error;
use validator::Validate;

use super::repo_impl::{is_row_rejection, EntryRepositoryImpl};

impl EntryRepositoryImpl {
    pub(super) async fn insert_unordered_impl(
        repo: &EntryRepositoryImpl,
        items: Vec<EntryModel>,
    ) -> Result<UnorderedInsertOutcome<EntryModel>, Box<dyn Error + Send + Sync>> {
        let mut outcome = UnorderedInsertOutcome::default();

        for (index, item) in items.into_iter().enumerate() {
            if let Err(errors) = item.validate() {
                outcome.failures.push(RowFailure {
                    index,
                    reason: errors.to_string(),
                });
                continue;
            }

            // Each row commits on its own so a rejected row leaves the others in place
            let mut transaction = repo.pool.begin().await?;
            match Self::insert_entry(&mut transaction, &item).await {
                Ok(()) => {
                    transaction.commit().await?;
                    outcome.inserted.push(item);
                }
                Err(e) if is_row_rejection(&e) => {
                    transaction.rollback().await?;
                    outcome.failures.push(RowFailure {
                        index,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        if outcome.has_failures() {
            tracing::warn!(
                inserted = outcome.inserted.len(),
                rejected = outcome.failures.len(),
                "unordered insert rejected rows"
            );
        }
        Ok(outcome)
    }
}

#[async_trait]
impl InsertUnordered<Postgres, EntryModel> for EntryRepositoryImpl {
    async fn insert_unordered(
        &self,
        items: Vec<EntryModel>,
    ) -> Result<UnorderedInsertOutcome<EntryModel>, Box<dyn Error + Send + Sync>> {
        Self::insert_unordered_impl(self, items).await
    }
}
