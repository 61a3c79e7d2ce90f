pub mod repo_impl;
pub mod create;
pub mod find_all;
pub mod find_by_email;
pub mod load;
pub mod load_batch;

#[cfg(test)]
pub mod test_utils;

pub use repo_impl::UserRepositoryImpl;
