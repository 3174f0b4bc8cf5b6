//! HTTP plumbing shared by every remote service.
//!
//! A thin typed wrapper over [`reqwest`]: base URL joining, optional bearer
//! authentication, JSON encoding, and status mapping. 401/403 responses are
//! mapped to [`HttpError::Unauthorized`] and are never retried here or
//! anywhere above.

use reqwest::StatusCode;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Errors surfaced by the HTTP layer.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend rejected the bearer token (401/403). Surfaced to the
    /// shopper as "please login again"; not retried.
    #[error("authentication failed; please login again")]
    Unauthorized,

    /// A non-2xx status other than 401/403.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// Connection, timeout, or body decoding failure.
    #[error("transport error")]
    Transport(#[from] reqwest::Error),
}

/// Shared client for one backend base URL.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpClient {
    /// Create a client for the given base URL (trailing slash optional).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GET a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] on transport failure or a non-2xx status.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, HttpError> {
        let mut request = self.client.get(self.url(path));

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = check_status(request.send().await?)?;

        Ok(response.json().await?)
    }

    /// POST a JSON body and decode a JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] on transport failure or a non-2xx status.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, HttpError> {
        let response = check_status(self.post(path, body, bearer).await?)?;

        Ok(response.json().await?)
    }

    /// POST a JSON body and return the raw response text. The order endpoint
    /// replies with an opaque confirmation body rather than JSON.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] on transport failure or a non-2xx status.
    pub async fn post_text<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<String, HttpError> {
        let response = check_status(self.post(path, body, bearer).await?)?;

        Ok(response.text().await?)
    }

    /// POST a JSON body, ignoring the response body.
    ///
    /// # Errors
    ///
    /// Returns an [`HttpError`] on transport failure or a non-2xx status.
    pub async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<(), HttpError> {
        check_status(self.post(path, body, bearer).await?)?;

        Ok(())
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut request = self.client.post(self.url(path)).json(body);

        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        request.send().await
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(HttpError::Unauthorized),
        status => Err(HttpError::Status(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let client = HttpClient::new("http://localhost:8085/tricto/");

        assert_eq!(
            client.url("slots/product/3"),
            "http://localhost:8085/tricto/slots/product/3"
        );
        assert_eq!(
            client.url("/auth/login"),
            "http://localhost:8085/tricto/auth/login"
        );
    }
}
