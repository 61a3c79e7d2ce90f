pub mod identifiable;
pub mod owned;
pub mod entry;
pub mod user;

// Re-exports
pub use identifiable::*;
pub use owned::*;
pub use entry::*;
pub use user::*;
