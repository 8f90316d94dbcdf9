// src/reactive/observable.rs
//
// Observable state container.
//
// - Listeners execute synchronously, in subscription order
// - Listeners only run when the stored value actually changes
// - No internal lock is held while listeners run, so a listener may
//   read or write any observable (including this one)
// - A panicking listener is logged and skipped; the others still run

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::{error, trace};

/// Type-erased listener; receives the new value
type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to detach later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: RwLock<T>,
    listeners: RwLock<Vec<(SubscriptionId, Listener<T>)>>,
    next_id: AtomicU64,
    label: &'static str,
}

/// A value that notifies subscribers when it changes.
///
/// Cloning produces another handle to the same value.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Observable<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    pub fn new(value: T) -> Self {
        Self::labeled("observable", value)
    }

    /// Same as `new`, with a name that shows up in logs
    pub fn labeled(label: &'static str, value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: RwLock::new(value),
                listeners: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
                label,
            }),
        }
    }

    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.read(T::clone)
    }

    /// Borrow the current value without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self
            .inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&*guard)
    }

    /// Replace the value. Returns `true` (and notifies) if it changed.
    pub fn set(&self, value: T) -> bool {
        self.update(|current| *current = value)
    }

    /// Mutate in place. Returns `true` (and notifies) if the value changed.
    pub fn update(&self, f: impl FnOnce(&mut T)) -> bool {
        let snapshot = {
            let mut guard = self
                .inner
                .value
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let before = guard.clone();
            f(&mut *guard);
            if *guard == before {
                return false;
            }
            guard.clone()
        };

        self.notify(&snapshot);
        true
    }

    /// Register a listener. It is not called for the current value.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        id
    }

    /// Detach a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self
            .inner
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn notify(&self, value: &T) {
        // Copy the listener list so none of our locks are held during callbacks
        let listeners: Vec<Listener<T>> = self
            .inner
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        trace!(
            "[STATE] {} changed | {} listeners",
            self.inner.label,
            listeners.len()
        );

        for (idx, listener) in listeners.iter().enumerate() {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                listener(value);
            }));

            if let Err(e) = result {
                error!(
                    "Listener {} for {} panicked: {:?}",
                    idx, self.inner.label, e
                );
            }
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default + Clone + PartialEq + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self
            .inner
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Observable")
            .field("label", &self.inner.label)
            .field("value", &*value)
            .finish()
    }
}
