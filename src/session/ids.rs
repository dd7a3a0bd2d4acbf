//! Short identifiers for the OpenClaw parent/child graph.
//!
//! Claude Code uses UUIDs; OpenClaw uses 8-hex-char ids. The short id is the
//! first 8 hex digits of the MD5 digest of the long id, so the same transcript
//! always converts to the same ids and previously converted files stay stable.

use std::collections::HashMap;

use tracing::warn;

/// Length of a short id in hex characters.
pub const SHORT_ID_LEN: usize = 8;

/// Derive the short id for `long_id`.
pub fn short_id(long_id: &str) -> String {
    let digest = format!("{:x}", md5::compute(long_id.as_bytes()));
    digest[..SHORT_ID_LEN].to_string()
}

/// Per-run memo of long id -> short id.
///
/// Truncated digests can collide. A collision is not resolved (widening would
/// change ids that downstream consumers already hold) but it is logged and
/// counted so the run summary can report it.
#[derive(Debug, Default)]
pub struct IdMap {
    forward: HashMap<String, String>,
    owners: HashMap<String, String>,
    collisions: usize,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Short id for `long_id`, memoized for the lifetime of the map.
    pub fn shorten(&mut self, long_id: &str) -> String {
        if let Some(short) = self.forward.get(long_id) {
            return short.clone();
        }

        let short = short_id(long_id);
        match self.owners.get(&short) {
            Some(owner) if owner != long_id => {
                self.collisions += 1;
                warn!(
                    short_id = %short,
                    first = %owner,
                    second = %long_id,
                    "short id collision; parent links may merge"
                );
            }
            Some(_) => {}
            None => {
                self.owners.insert(short.clone(), long_id.to_string());
            }
        }

        self.forward.insert(long_id.to_string(), short.clone());
        short
    }

    /// Number of distinct long ids seen.
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Distinct long ids that mapped onto an already-taken short id.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}
