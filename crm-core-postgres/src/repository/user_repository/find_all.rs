use async_trait::async_trait;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::find_all::FindAll;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub(super) async fn find_all_impl(
        repo: &UserRepositoryImpl,
    ) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        let rows = sqlx::query(r#"SELECT * FROM app_user ORDER BY username, id"#)
            .fetch_all(&*repo.pool)
            .await?;

        let mut users = Vec::with_capacity(rows.len());
        for row in rows {
            users.push(UserModel::try_from_row(&row)?);
        }
        Ok(users)
    }
}

#[async_trait]
impl FindAll<Postgres, UserModel> for UserRepositoryImpl {
    async fn find_all(&self) -> Result<Vec<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::find_all_impl(self).await
    }
}
