use async_trait::async_trait;
use crm_core_db::models::user::UserModel;
use crm_core_db::repository::find_by_email::FindByEmail;
use crate::utils::TryFromRow;
use sqlx::Postgres;
use std::error::Error;

use super::repo_impl::UserRepositoryImpl;

impl UserRepositoryImpl {
    pub(super) async fn find_by_email_impl(
        repo: &UserRepositoryImpl,
        email: &str,
    ) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        let row = sqlx::query(r#"SELECT * FROM app_user WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&*repo.pool)
            .await?;
        row.as_ref().map(UserModel::try_from_row).transpose()
    }
}

#[async_trait]
impl FindByEmail<Postgres> for UserRepositoryImpl {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_email_impl(self, email).await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use crm_core_api::domain::Role;
    use crm_core_db::repository::create::Create;
    use crm_core_db::repository::find_all::FindAll;
    use crm_core_db::repository::find_by_email::FindByEmail;
    use serial_test::serial;
    use super::super::test_utils::test_utils::create_test_user;

    #[tokio::test]
    #[serial]
    #[ignore = "requires a running PostgreSQL (DATABASE_URL)"]
    async fn test_find_by_email() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context().await?;
        let user_repo = &ctx.repos().user_repository;

        let user = user_repo.create(create_test_user("finder", Role::Superadmin)).await?;

        let found = user_repo.find_by_email(&user.email).await?.expect("user should exist");
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, Role::Superadmin);
        assert!(user_repo.find_by_email("nobody@example.com").await?.is_none());

        let all = user_repo.find_all().await?;
        assert!(all.iter().any(|u| u.id == user.id));

        Ok(())
    }
}
