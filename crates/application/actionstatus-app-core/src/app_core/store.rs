use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::AppState;

use super::{events::DomainEvent, reducer::reduce};

/// Change listener. Called after every applied event with the new state.
pub type Listener = Arc<dyn Fn(&DomainEvent, &AppState) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone)]
pub struct AppStore {
    inner: Arc<Mutex<AppState>>,
    listeners: Arc<Mutex<Listeners>>,
}

impl AppStore {
    pub fn new(state: AppState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
            listeners: Arc::new(Mutex::new(Listeners::default())),
        }
    }

    pub fn state(&self) -> AppState {
        lock(&self.inner).clone()
    }

    /// Runs `f` against the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&lock(&self.inner))
    }

    /// Reduces `ev` into the state, then notifies listeners outside the lock.
    pub fn apply(&self, ev: DomainEvent) {
        let listeners: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, l)| l.clone())
            .collect();

        let snapshot = {
            let mut guard = lock(&self.inner);
            let current = std::mem::take(&mut *guard);
            *guard = reduce(current, ev.clone());
            (!listeners.is_empty()).then(|| (*guard).clone())
        };

        if let Some(snapshot) = snapshot {
            for listener in listeners {
                listener(&ev, &snapshot);
            }
        }
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&DomainEvent, &AppState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut guard = lock(&self.listeners);
        let id = SubscriptionId(guard.next_id);
        guard.next_id += 1;
        guard.entries.push((id, Arc::new(listener)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut guard = lock(&self.listeners);
        let before = guard.entries.len();
        guard.entries.retain(|(sid, _)| *sid != id);
        guard.entries.len() != before
    }
}
