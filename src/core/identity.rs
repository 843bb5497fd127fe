//! Anonymous user identity.
//!
//! The backend issues an opaque id on `POST /users`; the client keeps it in an
//! [`IdentityStore`] and sends it with every authenticated request. No thread
//! or message call is made before [`ensure_identity`] has produced an id.

use std::error::Error;
use std::fmt;
use std::sync::Mutex;

use tracing::{info, warn};

use crate::api::{ApiError, ChatApi};
use crate::core::state_file::StateFile;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    /// Accept any non-blank string, trimmed.
    pub fn parse(raw: &str) -> Result<Self, IdentityError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub enum IdentityError {
    /// A blank id was supplied.
    Empty,
    /// The backing store could not be read or written.
    Storage(String),
    /// `POST /users` failed.
    Api(ApiError),
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityError::Empty => write!(f, "User ID must not be empty"),
            IdentityError::Storage(detail) => write!(f, "Failed to access stored user ID: {detail}"),
            IdentityError::Api(err) => write!(f, "Failed to create user: {err}"),
        }
    }
}

impl Error for IdentityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IdentityError::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Where the identity lives between runs.
pub trait IdentityStore: Send + Sync {
    fn load(&self) -> Result<Option<UserId>, IdentityError>;
    fn store(&self, user_id: &UserId) -> Result<(), IdentityError>;
    fn clear(&self) -> Result<(), IdentityError>;
}

/// Identity persisted in the client's `state.toml`.
pub struct FileIdentityStore {
    file: StateFile,
}

impl FileIdentityStore {
    pub fn new(file: StateFile) -> Self {
        Self { file }
    }
}

impl IdentityStore for FileIdentityStore {
    fn load(&self) -> Result<Option<UserId>, IdentityError> {
        let state = self
            .file
            .load()
            .map_err(|err| IdentityError::Storage(err.to_string()))?;
        // A hand-edited blank id counts as no id.
        Ok(state.user_id.and_then(|raw| UserId::parse(&raw).ok()))
    }

    fn store(&self, user_id: &UserId) -> Result<(), IdentityError> {
        self.file
            .update(|state| state.user_id = Some(user_id.as_str().to_string()))
            .map(|_| ())
            .map_err(|err| IdentityError::Storage(err.to_string()))
    }

    fn clear(&self) -> Result<(), IdentityError> {
        self.file
            .update(|state| state.user_id = None)
            .map(|_| ())
            .map_err(|err| IdentityError::Storage(err.to_string()))
    }
}

/// Process-local store, used by tests and `--ephemeral` runs.
#[derive(Default)]
pub struct MemoryIdentityStore {
    user_id: Mutex<Option<UserId>>,
}

impl MemoryIdentityStore {
    pub fn with_user(user_id: UserId) -> Self {
        Self {
            user_id: Mutex::new(Some(user_id)),
        }
    }
}

impl IdentityStore for MemoryIdentityStore {
    fn load(&self) -> Result<Option<UserId>, IdentityError> {
        self.user_id
            .lock()
            .map(|guard| guard.clone())
            .map_err(|err| IdentityError::Storage(err.to_string()))
    }

    fn store(&self, user_id: &UserId) -> Result<(), IdentityError> {
        let mut guard = self
            .user_id
            .lock()
            .map_err(|err| IdentityError::Storage(err.to_string()))?;
        *guard = Some(user_id.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), IdentityError> {
        let mut guard = self
            .user_id
            .lock()
            .map_err(|err| IdentityError::Storage(err.to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    /// True when the id was minted during this call.
    pub created: bool,
}

/// Return the stored identity, minting and persisting a new one when the
/// store is empty.
pub async fn ensure_identity(
    store: &dyn IdentityStore,
    api: &dyn ChatApi,
) -> Result<Identity, IdentityError> {
    if let Some(user_id) = store.load()? {
        return Ok(Identity {
            user_id,
            created: false,
        });
    }

    let raw = api.create_user().await.map_err(|err| {
        warn!(error = %err, "Failed to create anonymous user");
        IdentityError::Api(err)
    })?;
    let user_id = UserId::parse(&raw)?;
    store.store(&user_id)?;
    info!("Created anonymous user identity");
    Ok(Identity {
        user_id,
        created: true,
    })
}
