use async_trait::async_trait;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::load_batch::LoadBatch;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &UserRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<UserModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query(r#"SELECT * FROM app_user WHERE id = ANY($1)"#)
            .bind(ids)
            .fetch_all(&*repo.pool)
            .await?;

        let mut item_map = std::collections::HashMap::new();
        for row in rows {
            let item = UserModel::try_from_row(&row)?;
            item_map.insert(item.id, item);
        }

        // Duplicate ids each get their own copy
        let mut result = Vec::with_capacity(ids.len());
        for id in ids {
            result.push(item_map.get(id).cloned());
        }
        Ok(result)
    }
}

#[async_trait]
impl LoadBatch<Postgres, UserModel> for UserRepositoryImpl {
    async fn load_batch(&self, ids: &[Uuid]) -> Result<Vec<Option<UserModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
