//! Shared value with synchronous change listeners.
//!
//! Every write replaces the whole value and then calls each listener, in
//! registration order, with the new value before the write returns. Readers
//! get `Arc` snapshots, so a value handed out is never mutated afterwards.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Token returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Inner<T> {
    value: Arc<T>,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: u64,
}

/// A cloneable handle to one shared value.
///
/// Writes are serialized: listeners observe replacements in the order they
/// happened. A listener must not write to the observable that is notifying
/// it; doing so blocks forever.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
    writer: Arc<Mutex<()>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock_inner();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value: Arc::new(initial),
                listeners: Vec::new(),
                next_id: 0,
            })),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.lock_inner().value)
    }

    /// Register a listener. It is called right away with the current value,
    /// then after every write until unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let _writer = self.lock_writer();
        let listener: Listener<T> = Arc::new(listener);
        let (id, current) = {
            let mut inner = self.lock_inner();
            let id = ListenerId(inner.next_id);
            inner.next_id += 1;
            inner.listeners.push((id, Arc::clone(&listener)));
            (id, Arc::clone(&inner.value))
        };
        listener(&current);
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.lock_inner();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock_inner().listeners.len()
    }

    /// Replace the value and notify listeners.
    pub fn set(&self, value: T) {
        let _writer = self.lock_writer();
        self.replace_and_notify(value);
    }

    /// Derive the next value from the current one, then notify listeners.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        self.try_update(|current| Some(f(current)));
    }

    /// Like [`Self::update`], but `f` may return `None` to leave the value
    /// untouched. Listeners are only notified when a new value is stored.
    ///
    /// Returns whether a new value was stored.
    pub fn try_update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> Option<T>,
    {
        let _writer = self.lock_writer();
        let current = self.get();
        match f(&current) {
            Some(next) => {
                self.replace_and_notify(next);
                true
            }
            None => false,
        }
    }

    /// Caller must hold the writer lock.
    fn replace_and_notify(&self, value: T) {
        let value = Arc::new(value);
        let listeners: Vec<Listener<T>> = {
            let mut inner = self.lock_inner();
            inner.value = Arc::clone(&value);
            inner
                .listeners
                .iter()
                .map(|(_, listener)| Arc::clone(listener))
                .collect()
        };
        for listener in listeners {
            listener(&value);
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
