//! Slots

pub mod errors;
pub mod records;
pub mod service;

pub use errors::SlotServiceError;
pub use service::*;
