//! Slot service errors.

use thiserror::Error;

use crate::http::HttpError;

#[derive(Debug, Error)]
pub enum SlotServiceError {
    #[error("authentication failed; please login again")]
    Unauthorized,

    #[error("administrator role required")]
    AdminRequired,

    #[error("slot carried an unrepresentable discount percentage")]
    InvalidDiscount,

    #[error(transparent)]
    Http(HttpError),
}

impl From<HttpError> for SlotServiceError {
    fn from(error: HttpError) -> Self {
        if matches!(error, HttpError::Unauthorized) {
            return Self::Unauthorized;
        }

        Self::Http(error)
    }
}
