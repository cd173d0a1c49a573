//! State document persistence over a `KvStore`.
//!
//! # Responsibility
//! - Serialize the whole `AppState` under one storage key.
//! - Load saved documents tolerantly, merging them over the defaults.
//! - Serialize background writes through a single writer.
//!
//! # Invariants
//! - Loading never fails the caller; any problem means "no saved state".
//! - Saving always writes the full document (last write wins).

use crate::model::state::AppState;
use crate::store::{KvStore, StoreError};
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod merge;
pub mod writer;

pub use merge::merge_with_defaults;
pub use writer::{StateWriter, WriterStats};

/// Storage key of the state document.
pub const STORAGE_KEY: &str = "student-companion-v1";

#[derive(Debug)]
pub enum PersistError {
    Serialize(serde_json::Error),
    Store(StoreError),
    /// Background writer thread could not be started.
    WriterSpawn(std::io::Error),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Serialize(err) => write!(f, "failed to serialize state: {err}"),
            Self::Store(err) => write!(f, "failed to write state: {err}"),
            Self::WriterSpawn(err) => write!(f, "failed to start state writer: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Serialize(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::WriterSpawn(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<StoreError> for PersistError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Loads the saved document merged over `AppState::default_document()`.
///
/// Returns `None` when nothing is saved, the store read fails, or the saved
/// text is not a JSON object.
pub fn load_state<S: KvStore + ?Sized>(store: &S) -> Option<AppState> {
    let raw = match store.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=state_load module=persist status=empty");
            return None;
        }
        Err(err) => {
            warn!(
                "event=state_load module=persist status=error error_code=store_read_failed error={err}"
            );
            return None;
        }
    };

    let object = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            warn!("event=state_load module=persist status=error error_code=not_an_object");
            return None;
        }
        Err(err) => {
            warn!(
                "event=state_load module=persist status=error error_code=parse_failed error={err}"
            );
            return None;
        }
    };

    info!(
        "event=state_load module=persist status=ok bytes={} sections={}",
        raw.len(),
        object.len()
    );
    Some(merge_with_defaults(&AppState::default_document(), &object))
}

/// Like `load_state`, falling back to the default document.
pub fn load_or_default<S: KvStore + ?Sized>(store: &S) -> AppState {
    load_state(store).unwrap_or_default()
}

/// Writes the full document synchronously.
pub fn save_state<S: KvStore + ?Sized>(store: &S, state: &AppState) -> Result<(), PersistError> {
    let json = serde_json::to_string(state)?;
    store.set(STORAGE_KEY, &json)?;
    Ok(())
}
