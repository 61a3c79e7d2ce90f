pub mod load;
pub mod load_batch;
pub mod find_all;
pub mod find_by_owner;
pub mod find_by_email;
pub mod create;
pub mod insert_unordered;
pub mod update_with_history;
pub mod delete;
pub mod entry_repository;
pub mod user_repository;

// Re-exports
pub use load::*;
pub use load_batch::*;
pub use find_all::*;
pub use find_by_owner::*;
pub use find_by_email::*;
pub use create::*;
pub use insert_unordered::*;
pub use update_with_history::*;
pub use delete::*;
pub use entry_repository::*;
pub use user_repository::*;
