//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{Credentials, NewUser},
    },
    http::HttpClient,
};

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RegisterPayload<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

/// Remote authentication collaborator.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for an opaque bearer token.
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthServiceError>;

    /// Register a new shopper. No session is created; callers login next.
    async fn register(&self, user: &NewUser) -> Result<(), AuthServiceError>;
}

/// Auth service backed by the REST backend.
#[derive(Debug, Clone)]
pub struct HttpAuthService {
    http: HttpClient,
}

impl HttpAuthService {
    #[must_use]
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl AuthService for HttpAuthService {
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthServiceError> {
        let payload = LoginPayload {
            email: &credentials.email,
            password: &credentials.password,
        };

        let response: TokenResponse = self.http.post_json("auth/login", &payload, None).await?;

        Ok(response.token)
    }

    async fn register(&self, user: &NewUser) -> Result<(), AuthServiceError> {
        let payload = RegisterPayload {
            name: &user.name,
            email: &user.email,
            password: &user.password,
        };

        self.http.post_unit("auth/register", &payload, None).await?;

        Ok(())
    }
}
