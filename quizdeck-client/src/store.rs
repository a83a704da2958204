use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use quizdeck_backend::UserRecord;
use serde::{Deserialize, Serialize};

/// A callback invoked with the new token and identity whenever the session changes
type ChangeListener = Arc<dyn Fn(&str, Option<&UserRecord>) + Send + Sync>;

#[derive(Default)]
struct StoreState {
    token: String,
    record: Option<UserRecord>,
}

/// Owns the client-side session: the token and the identity it belongs to.
///
/// [save](AuthStore::save) and [clear](AuthStore::clear) are the only
/// mutators, and both notify subscribers after the write. Validity is derived
/// on every read, never stored.
#[derive(Default)]
pub struct AuthStore {
    state: RwLock<StoreState>,
    listeners: Mutex<Vec<(usize, ChangeListener)>>,
    next_listener_id: AtomicUsize,
}

/// The serialized form of a session, for embedders that persist it
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
    record: Option<UserRecord>,
}

impl AuthStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The current session token, empty when signed out
    pub fn token(&self) -> String {
        self.state.read().token.clone()
    }

    /// The current identity, if any
    pub fn record(&self) -> Option<UserRecord> {
        self.state.read().record.clone()
    }

    /// A session is valid when both a token and an identity are present
    pub fn is_valid(&self) -> bool {
        let state = self.state.read();

        !state.token.is_empty() && state.record.is_some()
    }

    /// Stores a new session and notifies subscribers
    pub fn save(&self, token: &str, record: UserRecord) {
        {
            let mut state = self.state.write();

            state.token = token.to_string();
            state.record = Some(record);
        }

        self.notify();
    }

    /// Clears the session and notifies subscribers. Safe to call repeatedly.
    pub fn clear(&self) {
        {
            let mut state = self.state.write();

            state.token.clear();
            state.record = None;
        }

        self.notify();
    }

    /// Subscribes to session changes, returning a handle that unsubscribes
    /// when dropped. Listeners may mutate the store from inside the callback.
    pub fn on_change<F>(self: &Arc<Self>, listener: F) -> StoreSubscription
    where
        F: Fn(&str, Option<&UserRecord>) + Send + Sync + 'static,
    {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);

        self.listeners.lock().push((id, Arc::new(listener)));

        StoreSubscription {
            id,
            store: Arc::downgrade(self),
        }
    }

    /// Serializes the session so an embedding application can persist it
    /// across restarts
    pub fn export(&self) -> String {
        let state = self.state.read();

        let session = PersistedSession {
            token: state.token.clone(),
            record: state.record.clone(),
        };

        serde_json::to_string(&session).unwrap_or_default()
    }

    /// Restores a previously exported session and notifies subscribers
    pub fn restore(&self, serialized: &str) -> Result<(), serde_json::Error> {
        let session: PersistedSession = serde_json::from_str(serialized)?;

        {
            let mut state = self.state.write();

            state.token = session.token;
            state.record = session.record;
        }

        self.notify();
        Ok(())
    }

    fn notify(&self) {
        let (token, record) = {
            let state = self.state.read();
            (state.token.clone(), state.record.clone())
        };

        // Snapshot first, so a listener can save, clear, or subscribe
        // without re-entering the lock
        let listeners: Vec<ChangeListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&token, record.as_ref());
        }
    }

    fn remove_listener(&self, id: usize) {
        self.listeners.lock().retain(|(existing, _)| *existing != id);
    }
}

/// Handle to an active [AuthStore] subscription
pub struct StoreSubscription {
    id: usize,
    store: Weak<AuthStore>,
}

impl StoreSubscription {
    /// Stops the listener from being called. Also happens on drop.
    pub fn unsubscribe(&self) {
        if let Some(store) = self.store.upgrade() {
            store.remove_listener(self.id);
        }
    }
}

impl Drop for StoreSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
