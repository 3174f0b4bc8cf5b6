//! Catalog service errors.

use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("product not found")]
    NotFound,

    #[error("product price is not a representable amount")]
    InvalidPrice,

    #[error(transparent)]
    Http(HttpError),
}

impl From<HttpError> for CatalogServiceError {
    fn from(error: HttpError) -> Self {
        if matches!(error, HttpError::Status(reqwest::StatusCode::NOT_FOUND)) {
            return Self::NotFound;
        }

        Self::Http(error)
    }
}
