use async_trait::async_trait;
use crm_core_db::models::entry::EntryModel;
use crm_core_db::repository::load::Load;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EntryRepositoryImpl;

impl EntryRepositoryImpl {
    pub(super) async fn load_impl(
        repo: &EntryRepositoryImpl,
        id: Uuid,
    ) -> Result<Option<EntryModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(r#"SELECT * FROM entry WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&*repo.pool)
            .await?;

        match row {
            Some(row) => Ok(repo.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl Load<Postgres, EntryModel> for EntryRepositoryImpl {
    async fn load(&self, id: Uuid) -> Result<Option<EntryModel>, Box<dyn Error + Send + Sync>> {
        Self::load_impl(self, id).await
    }
}
