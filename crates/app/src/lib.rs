//! Client application layer for the Tricto storefront.
//!
//! Wires the domain core to its remote collaborators: typed HTTP services
//! for the catalog, slots, orders, addresses, and authentication, a shared
//! injectable cart handle, the persisted auth session, and the order
//! submission saga. The application root builds one [`context::AppContext`]
//! and hands clones of it to every surface.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod context;
pub mod domain;
pub mod http;
pub mod storage;

#[cfg(test)]
mod test;
