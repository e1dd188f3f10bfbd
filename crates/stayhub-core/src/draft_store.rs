//! Local draft persistence for in-progress wizard sessions.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use stayhub_domain::{PropertyCategory, WizardSession};
use tracing::{debug, warn};

use crate::CoreError;

pub const DEFAULT_DRAFT_PREFIX: &str = "property_wizard_draft";
pub const NEW_DRAFT_TOKEN: &str = "new";

/// Storage key of one wizard draft: `{prefix}_{token}` where the token is
/// `new` for a fresh property or the backend id when editing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DraftKey(String);

impl DraftKey {
    pub fn new_property(prefix: &str) -> Self {
        Self(format!("{prefix}_{NEW_DRAFT_TOKEN}"))
    }

    pub fn existing(prefix: &str, property_id: &str) -> Self {
        Self(format!("{prefix}_{property_id}"))
    }

    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw key-value storage for serialized drafts.
pub trait DraftStore: Send + Sync {
    fn read(&self, key: &DraftKey) -> Result<Option<String>, CoreError>;
    fn write(&self, key: &DraftKey, contents: &str) -> Result<(), CoreError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &DraftKey) -> Result<(), CoreError>;
    fn keys(&self) -> Result<Vec<DraftKey>, CoreError>;

    fn load(&self, key: &DraftKey) -> Result<Option<WizardSession>, CoreError> {
        match self.read(key)? {
            Some(raw) => decode_session(&raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, key: &DraftKey, session: &WizardSession) -> Result<(), CoreError> {
        let contents = encode_session(session)?;
        self.write(key, &contents)
    }
}

pub fn encode_session(session: &WizardSession) -> Result<String, CoreError> {
    Ok(serde_json::to_string_pretty(session)?)
}

pub fn decode_session(raw: &str) -> Result<WizardSession, CoreError> {
    Ok(serde_json::from_str(raw)?)
}

/// Loads the draft under `key`, falling back to a fresh session when the
/// stored data is missing, unreadable or belongs to another category.
pub fn restore_session(
    store: &dyn DraftStore,
    key: &DraftKey,
    category: PropertyCategory,
) -> WizardSession {
    match store.load(key) {
        Ok(Some(session)) if session.category() == category => {
            debug!(key = %key, step = session.current_step, "restored wizard draft");
            session
        }
        Ok(Some(session)) => {
            warn!(
                key = %key,
                stored = %session.category(),
                requested = %category,
                "ignoring draft saved for another category"
            );
            WizardSession::new(category)
        }
        Ok(None) => WizardSession::new(category),
        Err(err) => {
            warn!(key = %key, error = %err, "discarding unreadable wizard draft");
            WizardSession::new(category)
        }
    }
}

/// In-process store used by tests and by hosts without a filesystem.
#[derive(Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<DraftKey, String>>,
    writes: AtomicUsize,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds raw contents, bypassing serialization.
    pub fn insert_raw(&self, key: DraftKey, contents: impl Into<String>) {
        self.lock().insert(key, contents.into());
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<DraftKey, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, key: &DraftKey) -> Result<Option<String>, CoreError> {
        Ok(self.lock().get(key).cloned())
    }

    fn write(&self, key: &DraftKey, contents: &str) -> Result<(), CoreError> {
        self.lock().insert(key.clone(), contents.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &DraftKey) -> Result<(), CoreError> {
        self.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<DraftKey>, CoreError> {
        let mut keys: Vec<DraftKey> = self.lock().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_prefix_and_token() {
        assert_eq!(
            DraftKey::new_property(DEFAULT_DRAFT_PREFIX).as_str(),
            "property_wizard_draft_new"
        );
        assert_eq!(
            DraftKey::existing("drafts", "prop_42").to_string(),
            "drafts_prop_42"
        );
    }

    #[test]
    fn corrupt_draft_restores_fresh_session() {
        let store = MemoryDraftStore::new();
        let key = DraftKey::new_property(DEFAULT_DRAFT_PREFIX);
        store.insert_raw(key.clone(), "{not json");

        let session = restore_session(&store, &key, PropertyCategory::Villa);
        assert_eq!(session, WizardSession::new(PropertyCategory::Villa));
    }

    #[test]
    fn category_mismatch_restores_fresh_session() {
        let store = MemoryDraftStore::new();
        let key = DraftKey::new_property(DEFAULT_DRAFT_PREFIX);
        let mut saved = WizardSession::new(PropertyCategory::Hotel);
        saved.current_step = 4;
        store.save(&key, &saved).unwrap();

        let session = restore_session(&store, &key, PropertyCategory::Resort);
        assert_eq!(session.current_step, 1);
        assert_eq!(session.category(), PropertyCategory::Resort);
    }

    #[test]
    fn matching_draft_is_restored() {
        let store = MemoryDraftStore::new();
        let key = DraftKey::existing(DEFAULT_DRAFT_PREFIX, "prop_7");
        let mut saved = WizardSession::new(PropertyCategory::Pg);
        saved.current_step = 3;
        saved.property_draft.base.name = "Sunrise PG".into();
        store.save(&key, &saved).unwrap();

        let session = restore_session(&store, &key, PropertyCategory::Pg);
        assert_eq!(session, saved);
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.keys().unwrap(), vec![key]);
    }
}
