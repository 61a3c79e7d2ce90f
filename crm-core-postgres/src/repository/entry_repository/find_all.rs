use async_trait::async_trait;
use crm_core_db::models::entry::EntryModel;
use crm_core_db::repository::find_all::FindAll;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::EntryRepositoryImpl;

impl EntryRepositoryImpl {
    pub(super) async fn find_all_impl(
        repo: &EntryRepositoryImpl,
    ) -> Result<Vec<EntryModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(r#"SELECT * FROM entry ORDER BY created_at, id"#)
            .fetch_all(&*repo.pool)
            .await?;
        repo.hydrate(rows).await
    }
}

#[async_trait]
impl FindAll<Postgres, EntryModel> for EntryRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<EntryModel>, Box<dyn Error + Send + Sync>> {
        Self::find_all_impl(self).await
    }
}
