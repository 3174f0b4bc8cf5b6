//! Address service errors.

use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum AddressServiceError {
    #[error(transparent)]
    Http(#[from] HttpError),
}
