pub mod domain;
pub mod service;
pub mod error;
pub mod response;

pub use error::*;
pub use domain::*;
pub use service::*;
pub use response::*;
