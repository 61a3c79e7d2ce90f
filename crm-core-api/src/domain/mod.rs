pub mod bulk;
pub mod entry;
pub mod export;
pub mod identity;
pub mod role;
pub mod user;

pub use bulk::*;
pub use entry::*;
pub use export::*;
pub use identity::*;
pub use role::*;
pub use user::*;
