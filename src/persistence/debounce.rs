use super::{SessionSnapshot, Store};
use crate::session::Session;
use log::{debug, warn};
use std::time::{Duration, Instant};

/// Debounced, fire-and-forget writer in front of a `Store`.
///
/// The owner reports mutations with [`Persister::track`] and polls
/// [`Persister::flush_if_due`] from its event loop. A snapshot is written once the
/// session has been quiet for the debounce period. Failed writes are logged and dropped.
pub struct Persister<S: Store> {
    store: S,
    debounce: Duration,
    seen_revision: u64,
    dirty_since: Option<Instant>,
}

impl<S: Store> Persister<S> {
    pub fn new(store: S, debounce: Duration) -> Self {
        Self {
            store,
            debounce,
            seen_revision: 0,
            dirty_since: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty_since.is_some()
    }

    /// Records the session revision observed at `now`. Sessions start at revision 0; any
    /// other revision marks the persister dirty and restarts the debounce window.
    pub fn track(&mut self, revision: u64, now: Instant) {
        if self.seen_revision != revision {
            self.seen_revision = revision;
            self.dirty_since = Some(now);
        }
    }

    /// Writes the session if it has been dirty and quiet for the debounce period.
    /// Returns whether a write was attempted.
    pub fn flush_if_due(&mut self, session: &Session, now: Instant) -> bool {
        self.track(session.revision(), now);
        match self.dirty_since {
            Some(since) if now.saturating_duration_since(since) >= self.debounce => {
                self.flush(session);
                true
            }
            _ => false,
        }
    }

    /// Writes the session immediately.
    pub fn flush(&mut self, session: &Session) {
        self.dirty_since = None;
        self.seen_revision = session.revision();
        if let Err(e) = self.store.save(&session.snapshot()) {
            warn!("Failed to persist session snapshot: {}", e);
        }
    }

    /// Best-effort read: any failure is logged and treated as "nothing saved".
    pub fn load_or_default(&self) -> Option<SessionSnapshot> {
        match self.store.load() {
            Ok(snapshot) => {
                debug!("Loaded persisted snapshot: {}", snapshot.is_some());
                snapshot
            }
            Err(e) => {
                warn!("Ignoring unreadable session snapshot: {}", e);
                None
            }
        }
    }
}
