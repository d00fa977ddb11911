//! Weak listener registry.
//!
//! A session holds at most one listener and never owns it: the registry
//! stores a [`Weak`] reference, so dropping the listener on the caller side
//! is always safe and turns subsequent dispatches into silent no-ops.

use std::sync::Weak;

use parking_lot::Mutex;

/// Single-subscriber registry holding a non-owning listener reference.
///
/// `register` is last-write-wins: registering a second listener evicts the
/// first. Dispatch via [`ListenerRegistry::notify`] upgrades the weak
/// reference for the duration of one callback and skips silently when the
/// listener is gone.
pub(crate) struct ListenerRegistry<L: ?Sized> {
    inner: Mutex<Option<Weak<L>>>,
}

impl<L: ?Sized> ListenerRegistry<L> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Register a listener, replacing any previous registration.
    pub(crate) fn register(&self, listener: Weak<L>) {
        *self.inner.lock() = Some(listener);
    }

    /// Clear the registration.
    pub(crate) fn unregister(&self) {
        *self.inner.lock() = None;
    }

    /// Invoke `f` on the listener if one is registered and still alive.
    ///
    /// The lock is released before the callback runs, so a listener may
    /// re-register from within its own callback without deadlocking.
    pub(crate) fn notify(&self, f: impl FnOnce(&L)) {
        let weak = self.inner.lock().clone();
        if let Some(listener) = weak.and_then(|w| w.upgrade()) {
            f(&listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct Counter {
        hits: AtomicUsize,
    }

    #[test]
    fn test_notify_reaches_live_listener() {
        let registry: ListenerRegistry<Counter> = ListenerRegistry::new();
        let listener = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        registry.register(Arc::downgrade(&listener));

        registry.notify(|l| {
            l.hits.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(listener.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_notify_skips_dropped_listener() {
        let registry: ListenerRegistry<Counter> = ListenerRegistry::new();
        let listener = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        registry.register(Arc::downgrade(&listener));
        drop(listener);

        let mut invoked = false;
        registry.notify(|_| invoked = true);
        assert!(!invoked);
    }

    #[test]
    fn test_notify_without_registration_is_noop() {
        let registry: ListenerRegistry<Counter> = ListenerRegistry::new();
        let mut invoked = false;
        registry.notify(|_| invoked = true);
        assert!(!invoked);
    }

    #[test]
    fn test_register_replaces_previous() {
        let registry: ListenerRegistry<Counter> = ListenerRegistry::new();
        let first = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        let second = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        registry.register(Arc::downgrade(&first));
        registry.register(Arc::downgrade(&second));

        registry.notify(|l| {
            l.hits.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(first.hits.load(Ordering::SeqCst), 0);
        assert_eq!(second.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unregister_clears() {
        let registry: ListenerRegistry<Counter> = ListenerRegistry::new();
        let listener = Arc::new(Counter {
            hits: AtomicUsize::new(0),
        });
        registry.register(Arc::downgrade(&listener));
        registry.unregister();

        registry.notify(|l| {
            l.hits.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(listener.hits.load(Ordering::SeqCst), 0);
    }
}
