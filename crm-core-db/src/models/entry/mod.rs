#[allow(clippy::module_inception)]
pub mod entry;
pub mod history;

pub use entry::*;
pub use history::*;
