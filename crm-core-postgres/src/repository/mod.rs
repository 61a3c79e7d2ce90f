pub mod db_init;
pub mod entry_repository;
pub mod user_repository;

pub use entry_repository::EntryRepositoryImpl;
pub use user_repository::UserRepositoryImpl;
