pub mod config;
pub mod postgres_repositories;
pub mod repository;
pub mod utils;

pub use config::{ConfigError, DatabaseConfig};
pub use postgres_repositories::{PostgresRepositories, RepositorySet};
pub use repository::entry_repository::EntryRepositoryImpl;
pub use repository::user_repository::UserRepositoryImpl;

#[cfg(test)]
pub mod test_helper;
