//! Auth

pub mod errors;
pub mod models;
pub mod service;
pub mod session;
pub mod token;

pub use errors::{AuthServiceError, SessionError};
pub use models::*;
pub use service::*;
pub use session::*;
