use async_trait::async_trait;
use crm_core_db::repository::delete::Delete;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EntryRepositoryImpl;

impl EntryRepositoryImpl {
    pub(super) async fn delete_impl(
        repo: &EntryRepositoryImpl,
        id: Uuid,
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        // entry_history rows cascade
        let result = sqlx::query(r#"DELETE FROM entry WHERE id = $1"#)
            .bind(id)
            .execute(&*repo.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl Delete<Postgres> for EntryRepositoryImpl {
    async fn delete(&self, id: Uuid) -> Result<bool, Box<dyn Error + Send + Sync>> {
        Self::delete_impl(self, id).await
    }
}
