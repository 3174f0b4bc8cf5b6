//! Shared test helpers.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use crate::{
    auth::{
        models::{Role, Session},
        service::MockAuthService,
        session::{SessionHandle, PLACEHOLDER_USER_ID},
    },
    storage::MockSessionStore,
};

/// Build an unsigned JWT-shaped token around `payload_json`.
pub(crate) fn unsigned_token(payload_json: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload_json);

    format!("{header}.{payload}.sig")
}

/// A handle already signed in as a regular shopper.
pub(crate) fn authenticated_session() -> SessionHandle {
    let session = Session {
        id: PLACEHOLDER_USER_ID,
        name: "Asha".to_string(),
        email: "asha@tricto.in".to_string(),
        role: Role::User,
        token: "token-123".to_string(),
    };

    let mut store = MockSessionStore::new();
    store
        .expect_load()
        .returning(move || Ok(Some(session.clone())));

    let handle = SessionHandle::new(Arc::new(MockAuthService::new()), Arc::new(store));
    handle.restore().expect("mock store load cannot fail");

    handle
}
