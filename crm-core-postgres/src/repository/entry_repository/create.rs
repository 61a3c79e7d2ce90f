use async_trait::async_trait;
use crm_core_db::models::entry::EntryModel;
use crm_core_db::repository::create::Create;
use sqlx::Postgres;
use std::error::Error;
use validator::Validate;

use super::repo_impl::EntryRepositoryImpl;

impl EntryRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &EntryRepositoryImpl,
        item: EntryModel,
    ) -> Result<EntryModel, Box<dyn Error + Send + Sync>> {
        item.validate()?;

        let mut transaction = repo.pool.begin().await?;
        Self::insert_entry(&mut transaction, &item).await?;
        transaction.commit().await?;

        tracing::debug!(entry_id = %item.id, created_by = %item.created_by, "entry inserted");
        Ok(item)
    }
}

#[async_trait]
impl Create<Postgres, EntryModel> for EntryRepositoryImpl {
    async fn create(&self, item: EntryModel) -> Result<EntryModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}
