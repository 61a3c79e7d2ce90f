use sqlx::PgPool;
use std::sync::Arc;

use crate::repository::entry_repository::EntryRepositoryImpl;
use crate::repository::user_repository::UserRepositoryImpl;

pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PgPool> {
        &self.pool
    }

    /// Create all repositories sharing the same pool
    pub fn create_all_repositories(&self) -> RepositorySet {
        RepositorySet {
            entry_repository: Arc::new(EntryRepositoryImpl::new(self.pool.clone())),
            user_repository: Arc::new(UserRepositoryImpl::new(self.pool.clone())),
        }
    }
}

pub struct RepositorySet {
    pub entry_repository: Arc<EntryRepositoryImpl>,
    pub user_repository: Arc<UserRepositoryImpl>,
}
