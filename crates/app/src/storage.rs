//! Session persistence.
//!
//! One fixed key holds the serialized session; it is read once at process
//! start and rewritten on every session mutation. A corrupt or missing value
//! rehydrates as anonymous rather than failing startup.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tricto::orders::UserId;

use crate::auth::models::{Role, Session};

/// Fixed key the serialized session is stored under.
pub const SESSION_STATE_KEY: &str = "authState";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("session storage i/o error")]
    Io(#[from] io::Error),

    #[error("session could not be serialized")]
    Serialize(#[source] serde_json::Error),
}

/// Durable client storage for the session.
#[automock]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, `None` when absent or unreadable.
    fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Persist the session.
    fn save(&self, session: &Session) -> Result<(), StorageError>;

    /// Remove the persisted session.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Persisted shape of a session.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecord {
    id: i32,
    name: String,
    email: String,
    role: String,
    token: String,
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.into_i32(),
            name: session.name.clone(),
            email: session.email.clone(),
            role: session.role.as_wire().to_string(),
            token: session.token.clone(),
        }
    }
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        Self {
            id: UserId::from_i32(record.id),
            name: record.name,
            email: record.email,
            role: Role::from_wire(&record.role),
            token: record.token,
        }
    }
}

/// Session store writing one JSON file under a state directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store sessions under `dir`, keyed by [`SESSION_STATE_KEY`].
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STATE_KEY}.json")),
        }
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };

        match serde_json::from_str::<SessionRecord>(&raw) {
            Ok(record) => Ok(Some(record.into())),
            Err(error) => {
                tracing::warn!(%error, "persisted session is corrupt; starting anonymous");
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&SessionRecord::from(session))
            .map_err(StorageError::Serialize)?;

        fs::write(&self.path, raw)?;

        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}
