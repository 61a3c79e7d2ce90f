use async_trait::async_trait;
use crm_core_db::models::entry::EntryModel;
use crm_core_db::repository::find_by_owner::FindByOwner;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EntryRepositoryImpl;

impl EntryRepositoryImpl {
    pub(super) async fn find_by_owner_impl(
        repo: &EntryRepositoryImpl,
        owner_id: Uuid,
    ) -> Result<Vec<EntryModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(r#"SELECT * FROM entry WHERE created_by = $1 ORDER BY created_at, id"#)
            .bind(owner_id)
            .fetch_all(&*repo.pool)
            .await?;
        repo.hydrate(rows).await
    }
}

#[async_trait]
impl FindByOwner<Postgres, EntryModel> for EntryRepositoryImpl {
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<EntryModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_owner_impl(self, owner_id).await
    }
}
