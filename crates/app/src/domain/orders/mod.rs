//! Orders

pub mod errors;
pub mod records;
pub mod service;

pub use errors::OrderServiceError;
pub use service::*;
