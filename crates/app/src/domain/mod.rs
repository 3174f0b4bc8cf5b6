//! Remote service domains.

pub mod address;
pub mod catalog;
pub mod orders;
pub mod slots;

pub(crate) mod money;
