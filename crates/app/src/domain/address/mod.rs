//! Addresses

pub mod errors;
pub mod service;

pub use errors::AddressServiceError;
pub use service::*;
