//! Debounced draft writes.
//!
//! Every edit schedules a save of the latest snapshot after a quiet period.
//! A newer edit aborts the pending timer, so the last write wins.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use stayhub_domain::WizardSession;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::draft_store::{DraftKey, DraftStore};

pub const DEFAULT_AUTOSAVE_DELAY: Duration = Duration::from_millis(800);

/// Serializes draft writes for one key.
///
/// Each scheduled write carries the generation it was queued under and is
/// dropped if a newer schedule, flush or cancel happened since. The check
/// and the write happen under the same lock.
#[derive(Default)]
struct WriteGate {
    generation: Mutex<u64>,
}

impl WriteGate {
    fn lock(&self) -> MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Invalidates every write queued before this call.
    fn advance(&self) -> u64 {
        let mut generation = self.lock();
        *generation += 1;
        *generation
    }

    fn write_if_current(
        &self,
        stamp: u64,
        store: &dyn DraftStore,
        key: &DraftKey,
        snapshot: &WizardSession,
    ) -> bool {
        let generation = self.lock();
        if *generation != stamp {
            debug!(key = %key, "superseded draft write skipped");
            return false;
        }
        write_snapshot(store, key, snapshot);
        true
    }

    fn write_now(&self, store: &dyn DraftStore, key: &DraftKey, snapshot: &WizardSession) {
        let mut generation = self.lock();
        *generation += 1;
        write_snapshot(store, key, snapshot);
    }
}

struct PendingSave {
    handle: JoinHandle<()>,
    snapshot: WizardSession,
}

pub struct DraftAutosaver {
    store: Arc<dyn DraftStore>,
    key: DraftKey,
    delay: Duration,
    gate: Arc<WriteGate>,
    pending: Option<PendingSave>,
}

impl DraftAutosaver {
    pub fn new(store: Arc<dyn DraftStore>, key: DraftKey, delay: Duration) -> Self {
        Self {
            store,
            key,
            delay,
            gate: Arc::new(WriteGate::default()),
            pending: None,
        }
    }

    pub fn key(&self) -> &DraftKey {
        &self.key
    }

    /// Schedules a write of `snapshot`, replacing any pending one.
    ///
    /// Outside a tokio runtime the snapshot is written immediately.
    pub fn schedule(&mut self, snapshot: WizardSession) {
        let Ok(runtime) = Handle::try_current() else {
            self.save_now(&snapshot);
            return;
        };
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        let stamp = self.gate.advance();
        let gate = Arc::clone(&self.gate);
        let store = Arc::clone(&self.store);
        let key = self.key.clone();
        let delay = self.delay;
        let queued = snapshot.clone();
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            gate.write_if_current(stamp, store.as_ref(), &key, &queued);
        });
        self.pending = Some(PendingSave { handle, snapshot });
    }

    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.handle.is_finished())
    }

    /// Writes the pending snapshot now instead of waiting for the timer.
    pub fn flush(&mut self) {
        if let Some(pending) = self.pending.take() {
            if !pending.handle.is_finished() {
                pending.handle.abort();
                self.gate
                    .write_now(self.store.as_ref(), &self.key, &pending.snapshot);
            }
        }
    }

    /// Replaces any pending snapshot with `snapshot` and writes it now.
    pub fn save_now(&mut self, snapshot: &WizardSession) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        self.gate.write_now(self.store.as_ref(), &self.key, snapshot);
    }

    /// Drops the pending snapshot without writing it. Returns once no
    /// earlier write can still land.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.handle.abort();
        }
        self.gate.advance();
    }
}

impl Drop for DraftAutosaver {
    fn drop(&mut self) {
        self.flush();
    }
}

fn write_snapshot(store: &dyn DraftStore, key: &DraftKey, snapshot: &WizardSession) {
    match store.save(key, snapshot) {
        Ok(()) => debug!(key = %key, step = snapshot.current_step, "draft saved"),
        Err(err) => warn!(key = %key, error = %err, "failed to save wizard draft"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft_store::{MemoryDraftStore, DEFAULT_DRAFT_PREFIX};
    use stayhub_domain::PropertyCategory;

    fn autosaver(store: &Arc<MemoryDraftStore>) -> DraftAutosaver {
        DraftAutosaver::new(
            store.clone(),
            DraftKey::new_property(DEFAULT_DRAFT_PREFIX),
            DEFAULT_AUTOSAVE_DELAY,
        )
    }

    fn session_named(name: &str) -> WizardSession {
        let mut session = WizardSession::new(PropertyCategory::Resort);
        session.property_draft.base.name = name.into();
        session
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_edits_collapse_into_one_write() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(session_named("A"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        saver.schedule(session_named("AB"));
        tokio::time::sleep(Duration::from_millis(300)).await;
        saver.schedule(session_named("ABC"));
        assert_eq!(store.write_count(), 0);

        tokio::time::sleep(Duration::from_millis(900)).await;
        assert_eq!(store.write_count(), 1);
        let saved = store.load(saver.key()).unwrap().unwrap();
        assert_eq!(saved.property_draft.base.name, "ABC");
    }

    #[tokio::test(start_paused = true)]
    async fn flush_writes_pending_snapshot_immediately() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(session_named("Palm Grove"));
        assert!(saver.has_pending());
        saver.flush();
        assert!(!saver.has_pending());
        assert_eq!(store.write_count(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_discards_pending_snapshot() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);

        saver.schedule(session_named("Gone"));
        saver.cancel();
        drop(saver);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn superseded_write_is_skipped() {
        let store = MemoryDraftStore::new();
        let key = DraftKey::new_property(DEFAULT_DRAFT_PREFIX);
        let gate = WriteGate::default();

        let stale = gate.advance();
        let fresh = gate.advance();
        assert!(!gate.write_if_current(stale, &store, &key, &session_named("Old")));
        assert_eq!(store.write_count(), 0);

        assert!(gate.write_if_current(fresh, &store, &key, &session_named("New")));
        let saved = store.load(&key).unwrap().unwrap();
        assert_eq!(saved.property_draft.base.name, "New");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn cancel_after_timer_fires_leaves_store_untouched() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = DraftAutosaver::new(
            store.clone(),
            DraftKey::new_property(DEFAULT_DRAFT_PREFIX),
            Duration::from_millis(5),
        );

        saver.schedule(session_named("Late"));
        std::thread::sleep(Duration::from_millis(5));
        saver.cancel();
        let written = store.write_count();
        store.remove(saver.key()).unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(written <= 1);
        assert!(store.load(saver.key()).unwrap().is_none());
    }

    #[test]
    fn without_runtime_writes_through() {
        let store = Arc::new(MemoryDraftStore::new());
        let mut saver = autosaver(&store);
        saver.schedule(session_named("Sync"));
        assert_eq!(store.write_count(), 1);
    }
}
