//! Client session lifecycle.
//!
//! `SessionHandle` owns the authentication state machine: it starts
//! anonymous, transitions through `Authenticating` while a login call is in
//! flight, and lands back on `Anonymous` when anything about the login
//! fails. Persistence failures never undo a successful remote login; the
//! session just will not survive a restart.

use std::sync::{Arc, Mutex, PoisonError};

use tricto::orders::UserId;

use crate::{
    auth::{
        errors::SessionError,
        models::{Credentials, NewUser, Session},
        service::AuthService,
        token::decode_claims,
    },
    storage::SessionStore,
};

/// Identifier reported for the signed-in user.
///
/// The login response carries only a token and the token subject is the
/// email address, so the client has no numeric id of its own. The backend
/// resolves the real principal from the bearer token on every call.
pub const PLACEHOLDER_USER_ID: UserId = UserId::from_i32(1);

/// Where the session currently is in its lifecycle.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated(Session),
}

/// Shared handle over the authentication state.
#[derive(Clone)]
pub struct SessionHandle {
    state: Arc<Mutex<AuthState>>,
    service: Arc<dyn AuthService>,
    store: Arc<dyn SessionStore>,
}

impl SessionHandle {
    #[must_use]
    pub fn new(service: Arc<dyn AuthService>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            state: Arc::new(Mutex::new(AuthState::Anonymous)),
            service,
            store,
        }
    }

    fn set_state(&self, next: AuthState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = next;
    }

    /// Rehydrate the session persisted by an earlier run.
    ///
    /// # Errors
    ///
    /// Returns an error when the store itself cannot be read. An absent or
    /// corrupt session is not an error; it loads as anonymous.
    pub fn restore(&self) -> Result<Option<Session>, SessionError> {
        let session = self.store.load()?;

        if let Some(session) = &session {
            self.set_state(AuthState::Authenticated(session.clone()));
        }

        Ok(session)
    }

    /// Exchange credentials for an authenticated session.
    ///
    /// # Errors
    ///
    /// Returns an error when the login call is rejected or the returned
    /// token cannot be decoded. Either way the state is anonymous again
    /// afterwards.
    pub async fn login(&self, credentials: Credentials) -> Result<Session, SessionError> {
        self.set_state(AuthState::Authenticating);

        let token = match self.service.login(&credentials).await {
            Ok(token) => token,
            Err(error) => {
                self.set_state(AuthState::Anonymous);
                return Err(error.into());
            }
        };

        let claims = match decode_claims(&token) {
            Ok(claims) => claims,
            Err(error) => {
                self.set_state(AuthState::Anonymous);
                return Err(SessionError::Token(error));
            }
        };

        let email = claims
            .email()
            .map_or_else(|| credentials.email.clone(), ToString::to_string);

        let name = credentials.name.clone().unwrap_or_else(|| {
            email.split('@').next().unwrap_or(&email).to_string()
        });

        let session = Session {
            id: PLACEHOLDER_USER_ID,
            name,
            email,
            role: claims.role(),
            token,
        };

        if let Err(error) = self.store.save(&session) {
            tracing::warn!(%error, "session could not be persisted; it will not survive a restart");
        }

        self.set_state(AuthState::Authenticated(session.clone()));

        Ok(session)
    }

    /// Register a new account. The session state is untouched; the caller
    /// logs in separately once registration succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when registration is rejected, including when the
    /// email address is already taken.
    pub async fn signup(&self, new_user: NewUser) -> Result<(), SessionError> {
        self.service.register(&new_user).await?;

        Ok(())
    }

    /// Drop the session and its persisted copy.
    pub fn logout(&self) {
        self.set_state(AuthState::Anonymous);

        if let Err(error) = self.store.clear() {
            tracing::warn!(%error, "persisted session could not be cleared");
        }
    }

    /// The signed-in session, if any.
    #[must_use]
    pub fn current(&self) -> Option<Session> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        match &*state {
            AuthState::Authenticated(session) => Some(session.clone()),
            AuthState::Anonymous | AuthState::Authenticating => None,
        }
    }

    /// Snapshot of the lifecycle state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The signed-in session, or [`SessionError::NotAuthenticated`].
    ///
    /// # Errors
    ///
    /// Returns an error when no session is signed in.
    pub fn require_authenticated(&self) -> Result<Session, SessionError> {
        self.current().ok_or(SessionError::NotAuthenticated)
    }

    /// The signed-in admin session, or the reason there is none.
    ///
    /// # Errors
    ///
    /// Returns an error when no session is signed in or the session does
    /// not carry the admin role.
    pub fn require_admin(&self) -> Result<Session, SessionError> {
        let session = self.require_authenticated()?;

        if !session.is_admin() {
            return Err(SessionError::AdminRequired);
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::{
            errors::AuthServiceError,
            models::Role,
            service::MockAuthService,
        },
        storage::MockSessionStore,
        test::unsigned_token,
    };

    fn credentials() -> Credentials {
        Credentials {
            email: "asha@tricto.in".to_string(),
            password: "hunter2".to_string(),
            name: None,
        }
    }

    fn handle(service: MockAuthService, store: MockSessionStore) -> SessionHandle {
        SessionHandle::new(Arc::new(service), Arc::new(store))
    }

    #[tokio::test]
    async fn login_builds_the_session_from_the_token() -> TestResult {
        let token = unsigned_token(r#"{"sub":"asha@tricto.in","roles":["ADMIN"]}"#);

        let mut service = MockAuthService::new();
        let returned = token.clone();
        service
            .expect_login()
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let mut store = MockSessionStore::new();
        store.expect_save().times(1).returning(|_| Ok(()));

        let handle = handle(service, store);
        let session = handle.login(credentials()).await?;

        assert_eq!(session.id, PLACEHOLDER_USER_ID);
        assert_eq!(session.email, "asha@tricto.in");
        assert_eq!(session.name, "asha");
        assert_eq!(session.role, Role::Admin);
        assert_eq!(session.token, token);
        assert_eq!(handle.current(), Some(session));

        Ok(())
    }

    #[tokio::test]
    async fn rejected_login_leaves_the_handle_anonymous() {
        let mut service = MockAuthService::new();
        service
            .expect_login()
            .returning(|_| Err(AuthServiceError::InvalidCredentials));

        let handle = handle(service, MockSessionStore::new());
        let result = handle.login(credentials()).await;

        assert!(matches!(
            result,
            Err(SessionError::Auth(AuthServiceError::InvalidCredentials))
        ));
        assert!(handle.current().is_none());
        assert!(matches!(handle.state(), AuthState::Anonymous));
    }

    #[tokio::test]
    async fn undecodable_token_leaves_the_handle_anonymous() {
        let mut service = MockAuthService::new();
        service
            .expect_login()
            .returning(|_| Ok("not-a-token".to_string()));

        let handle = handle(service, MockSessionStore::new());
        let result = handle.login(credentials()).await;

        assert!(matches!(result, Err(SessionError::Token(_))));
        assert!(handle.current().is_none());
    }

    #[tokio::test]
    async fn persistence_failure_keeps_the_session_signed_in() -> TestResult {
        let token = unsigned_token(r#"{"sub":"asha@tricto.in","roles":["USER"]}"#);

        let mut service = MockAuthService::new();
        service.expect_login().returning(move |_| Ok(token.clone()));

        let mut store = MockSessionStore::new();
        store.expect_save().returning(|_| {
            Err(crate::storage::StorageError::Io(std::io::Error::other(
                "disk full",
            )))
        });

        let handle = handle(service, store);
        let session = handle.login(credentials()).await?;

        assert_eq!(handle.current(), Some(session));

        Ok(())
    }

    #[tokio::test]
    async fn signup_delegates_without_touching_state() -> TestResult {
        let new_user = NewUser {
            name: "Asha".to_string(),
            email: "asha@tricto.in".to_string(),
            password: "hunter2".to_string(),
        };

        let mut service = MockAuthService::new();
        service.expect_register().times(1).returning(|_| Ok(()));

        let handle = handle(service, MockSessionStore::new());
        handle.signup(new_user).await?;

        assert!(matches!(handle.state(), AuthState::Anonymous));

        Ok(())
    }

    #[test]
    fn restore_rehydrates_a_persisted_session() -> TestResult {
        let session = Session {
            id: PLACEHOLDER_USER_ID,
            name: "Asha".to_string(),
            email: "asha@tricto.in".to_string(),
            role: Role::User,
            token: "token-123".to_string(),
        };

        let mut store = MockSessionStore::new();
        let stored = session.clone();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(stored.clone())));

        let handle = handle(MockAuthService::new(), store);

        assert_eq!(handle.restore()?, Some(session.clone()));
        assert_eq!(handle.current(), Some(session));

        Ok(())
    }

    #[test]
    fn logout_clears_state_and_storage() {
        let mut store = MockSessionStore::new();
        store.expect_clear().times(1).returning(|| Ok(()));

        let handle = handle(MockAuthService::new(), store);
        handle.logout();

        assert!(handle.current().is_none());
    }

    #[test]
    fn admin_gate_rejects_non_admin_sessions() {
        let session = Session {
            id: PLACEHOLDER_USER_ID,
            name: "Asha".to_string(),
            email: "asha@tricto.in".to_string(),
            role: Role::User,
            token: "token-123".to_string(),
        };

        let mut store = MockSessionStore::new();
        let stored = session.clone();
        store
            .expect_load()
            .returning(move || Ok(Some(stored.clone())));

        let handle = handle(MockAuthService::new(), store);
        handle.restore().unwrap();

        assert!(matches!(
            handle.require_admin(),
            Err(SessionError::AdminRequired)
        ));
        assert_eq!(handle.require_authenticated().unwrap(), session);
    }
}
