use tracing::warn;
use vle_config::{SESSION_TOKEN_KEY, USER_PROFILE_KEY};
use vle_core::Session;
use vle_infra::{SessionStorage, StorageError};

/// Read whatever session the login flow left behind. Missing keys, unreadable
/// storage and a malformed profile all read as "not there".
pub fn load_session<S: SessionStorage + ?Sized>(storage: &S) -> Session {
    let token = read_key(storage, SESSION_TOKEN_KEY).filter(|t| !t.is_empty());
    let user = read_key(storage, USER_PROFILE_KEY).and_then(|raw| {
        serde_json::from_str(&raw)
            .map_err(|e| warn!("stored user profile is not valid JSON: {e}"))
            .ok()
    });
    Session { token, user }
}

fn read_key<S: SessionStorage + ?Sized>(storage: &S, key: &str) -> Option<String> {
    storage
        .get(key)
        .map_err(|e| warn!(key, "session storage read failed: {e}"))
        .ok()
        .flatten()
}

/// Write token and profile in one storage call.
pub fn store_session<S: SessionStorage + ?Sized>(
    storage: &S,
    session: &Session,
) -> Result<(), StorageError> {
    let mut entries = Vec::with_capacity(2);
    if let Some(token) = &session.token {
        entries.push((SESSION_TOKEN_KEY, token.clone()));
    }
    if let Some(user) = &session.user {
        entries.push((USER_PROFILE_KEY, serde_json::to_string(user)?));
    }
    if entries.is_empty() {
        return Ok(());
    }
    storage.set_many(&entries)
}

pub fn clear_session<S: SessionStorage + ?Sized>(storage: &S) -> Result<(), StorageError> {
    storage.remove(SESSION_TOKEN_KEY)?;
    storage.remove(USER_PROFILE_KEY)
}
