pub mod auth;
pub mod bulk;
pub mod config;
pub mod entry_service;
pub mod export;
pub mod handlers;
pub mod lifecycle;
pub mod policy;
pub mod store_error;
pub mod user_service;

pub use auth::authenticate;
pub use config::ServiceConfig;
pub use entry_service::EntryServiceImpl;
pub use handlers::Controller;
pub use policy::{Action, Capability, Decision, RolePolicy, Scope};
pub use user_service::UserServiceImpl;

#[cfg(test)]
pub mod test_support;
