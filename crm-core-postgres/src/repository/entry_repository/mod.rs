pub mod repo_impl;
pub mod create;
pub mod delete;
pub mod find_all;
pub mod find_by_owner;
pub mod insert_unordered;
pub mod load;
pub mod update_with_history;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::EntryRepositoryImpl;
