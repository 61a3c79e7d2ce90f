use async_trait::async_trait;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::create::Create;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub(super) async fn create_impl(
        repo: &UserRepositoryImpl,
        item: UserModel,
    ) -> Result<UserModel, Box<dyn Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO app_user (id, username, email, password_hash, role)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.id)
        .bind(item.username.as_str())
        .bind(item.email.as_str())
        .bind(item.password_hash.as_str())
        .bind(item.role.as_str())
        .execute(&*repo.pool)
        .await?;

        tracing::debug!(user_id = %item.id, role = %item.role, "user inserted");
        Ok(item)
    }
}

#[async_trait]
impl Create<Postgres, UserModel> for UserRepositoryImpl {
    async fn create(&self, item: UserModel) -> Result<UserModel, Box<dyn Error + Send + Sync>> {
        Self::create_impl(self, item).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_api::domain::Role;
    use crm_core_db::repository::create::Create;
    use crm_core_db::repository::load::Load;
    use serial_test::serial;
    use super::super::test_utils::test_utils::create_test_user;

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_create_user() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.repos().user_repository;

        let user = create_test_user("jane", Role::Admin);
        user_repo.create(user.clone()).await?;

        let loaded = user_repo.load(user.id).await?.expect("user should exist");
        assert_eq!(loaded, user);

        Ok(())
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_email_is_unique() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.repos().user_repository;

        let user = create_test_user("dup", Role::Others);
        user_repo.create(user.clone()).await?;

        let mut twin = create_test_user("dup-twin", Role::Others);
        twin.email = user.email.clone();
        assert!(user_repo.create(twin).await.is_err());

        Ok(())
    }
}
