//! Order service errors.

use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum OrderServiceError {
    #[error("authentication failed; please login again")]
    Unauthorized,

    #[error("order carried an unrepresentable price")]
    InvalidPrice,

    #[error(transparent)]
    Http(HttpError),
}

impl From<HttpError> for OrderServiceError {
    fn from(error: HttpError) -> Self {
        if matches!(error, HttpError::Unauthorized) {
            return Self::Unauthorized;
        }

        Self::Http(error)
    }
}
