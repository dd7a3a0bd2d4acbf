//! Registration of converted sessions in OpenClaw's `sessions.json`.
//!
//! The registry is a JSON object of session key -> entry owned by OpenClaw.
//! Only one key, `agent:<agent>:claude-code-import`, is ever written here. The
//! file is read, patched in memory and rewritten whole after moving the old
//! copy to a timestamped backup. There is no locking.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::timestamp;
use crate::transcript::ModelRef;

/// Errors that can occur while registering a session.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("sessions.json not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode registry: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Registry entry written for an imported session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    pub session_id: String,
    pub updated_at: i64,
    pub system_sent: bool,
    pub aborted_last_run: bool,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub total_tokens_fresh: bool,
    pub model: String,
    pub model_provider: String,
    pub context_tokens: u64,
    pub session_file: String,
    pub auth_profile_override: String,
    pub label: String,
}

impl SessionEntry {
    /// Fresh entry with zeroed token counters.
    pub fn new(
        session_id: &str,
        session_file: &Path,
        model: &ModelRef,
        label: Option<&str>,
    ) -> Self {
        Self {
            session_id: session_id.to_string(),
            updated_at: timestamp::now_millis(),
            system_sent: false,
            aborted_last_run: false,
            input_tokens: 0,
            output_tokens: 0,
            total_tokens: 0,
            total_tokens_fresh: false,
            model: model.model_id.clone(),
            model_provider: model.provider.clone(),
            context_tokens: 0,
            session_file: session_file.display().to_string(),
            auth_profile_override: format!("{}:api-key", model.provider),
            label: label
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Claude Code import ({session_id})")),
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registered {
    pub key: String,
    pub store_path: PathBuf,
    /// Where the previous registry was moved, if the rename worked
    pub backup: Option<PathBuf>,
}

/// Registry key for imports under `agent_id`.
pub fn session_key(agent_id: &str) -> String {
    format!("agent:{agent_id}:claude-code-import")
}

/// Sessions directory of `agent_id` under the OpenClaw state dir.
pub fn sessions_dir(state_dir: &Path, agent_id: &str) -> PathBuf {
    state_dir.join("agents").join(agent_id).join("sessions")
}

/// `sessions.json` of `agent_id` under the OpenClaw state dir.
pub fn store_path(state_dir: &Path, agent_id: &str) -> PathBuf {
    sessions_dir(state_dir, agent_id).join("sessions.json")
}

/// Insert or replace the import entry for `agent_id` in `store`.
///
/// The store must already exist; it is never created here.
pub fn register(
    store: &Path,
    agent_id: &str,
    entry: &SessionEntry,
) -> Result<Registered, RegistryError> {
    if !store.exists() {
        return Err(RegistryError::NotFound {
            path: store.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(store).map_err(|source| RegistryError::Read {
        path: store.to_path_buf(),
        source,
    })?;
    let mut registry: Value =
        serde_json::from_str(&raw).map_err(|source| RegistryError::Parse {
            path: store.to_path_buf(),
            source,
        })?;

    let key = session_key(agent_id);
    let sessions = registry
        .as_object_mut()
        .ok_or_else(|| RegistryError::NotAnObject {
            path: store.to_path_buf(),
        })?;
    sessions.insert(key.clone(), serde_json::to_value(entry)?);

    let rendered = serde_json::to_string_pretty(&registry)?;

    let backup = backup(store);

    fs::write(store, rendered).map_err(|source| RegistryError::Write {
        path: store.to_path_buf(),
        source,
    })?;
    info!(key = %key, path = %store.display(), "registered session");

    Ok(Registered {
        key,
        store_path: store.to_path_buf(),
        backup,
    })
}

/// Move `store` aside to `<store>.bak.<unix seconds>`. Failure is tolerated.
fn backup(store: &Path) -> Option<PathBuf> {
    let mut name = store.as_os_str().to_owned();
    name.push(format!(".bak.{}", timestamp::now_millis() / 1000));
    let backup = PathBuf::from(name);

    match fs::rename(store, &backup) {
        Ok(()) => Some(backup),
        Err(e) => {
            warn!(path = %store.display(), error = %e, "could not back up registry; overwriting");
            None
        }
    }
}
