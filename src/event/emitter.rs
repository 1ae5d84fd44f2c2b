use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::event::Emitter;

enum Listener<P> {
    On(Arc<dyn Fn(P) + Send + Sync>),
    Once(Box<dyn FnOnce(P) + Send>),
}

/// In-memory event emitter keyed by event name.
///
/// Listeners run in registration order, outside the internal lock, so a
/// listener may register more listeners or emit again.
pub struct EventEmitter<P> {
    listeners: Mutex<HashMap<String, Vec<Listener<P>>>>,
}

impl<P: Clone> EventEmitter<P> {
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Listener<P>>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn on<L>(&self, event: &str, listener: L)
    where
        L: Fn(P) + Send + Sync + 'static,
    {
        self.lock()
            .entry(event.to_owned())
            .or_default()
            .push(Listener::On(Arc::new(listener)));
    }

    /// Delivers `payload` to every listener of `event`. Returns whether any
    /// listener was registered.
    pub fn emit(&self, event: &str, payload: P) -> bool {
        let current = match self.lock().get_mut(event) {
            Some(listeners) if !listeners.is_empty() => mem::take(listeners),
            _ => {
                log::trace!("no listeners for event {}", event);
                return false;
            }
        };

        let mut kept = Vec::with_capacity(current.len());
        for listener in current {
            match listener {
                Listener::On(l) => {
                    l(payload.clone());
                    kept.push(Listener::On(l));
                }
                Listener::Once(l) => l(payload.clone()),
            }
        }

        if !kept.is_empty() {
            let mut inner = self.lock();
            let listeners = inner.entry(event.to_owned()).or_default();
            // Listeners added while emitting go after the surviving ones.
            let added = mem::replace(listeners, kept);
            listeners.extend(added);
        }
        true
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, |l| l.len())
    }

    pub fn remove_all_listeners(&self, event: &str) {
        self.lock().remove(event);
    }
}

impl<P: Clone> Default for EventEmitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> Emitter<P> for EventEmitter<P> {
    fn once(&self, event: &str, listener: Box<dyn FnOnce(P) + Send>) {
        self.lock()
            .entry(event.to_owned())
            .or_default()
            .push(Listener::Once(listener));
    }
}
