//! Listener registry and synchronous event dispatch.
//!
//! The [`Notifier`] keeps listeners in registration order and hands every
//! event to each of them on the calling thread. There is no isolation
//! between listeners: the first one that fails stops the dispatch and its
//! error propagates to whoever triggered the event.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::ListenerError;
use crate::events::BinEvent;

/// Receiver of packing events.
///
/// Listeners cannot reach back into the packer that notifies them: the
/// packer is mutably borrowed for the whole `add` call that fires the event.
pub trait BinListener<T>: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        "listener"
    }

    /// Handle one event. An error aborts the dispatch.
    fn update(&self, event: &BinEvent<'_, T>) -> Result<(), ListenerError>;
}

/// Opaque token returned by [`Notifier::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Ordered set of listeners.
pub struct Notifier<T> {
    listeners: Vec<(ListenerId, Arc<dyn BinListener<T>>)>,
    next_id: u64,
}

impl<T> Notifier<T> {
    /// Create an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    /// Append a listener to the dispatch list.
    ///
    /// The same listener may be registered more than once; it is then
    /// called once per registration.
    pub fn register(&mut self, listener: Arc<dyn BinListener<T>>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        debug!(listener = listener.name(), id = id.0, "registering listener");
        self.listeners.push((id, listener));
        id
    }

    /// Remove the first registration of `listener`, compared by identity.
    ///
    /// Returns `false` when the listener is not registered.
    pub fn deregister<L>(&mut self, listener: &Arc<L>) -> bool
    where
        L: BinListener<T> + ?Sized,
    {
        let target = Arc::as_ptr(listener);
        let position = self
            .listeners
            .iter()
            .position(|(_, l)| std::ptr::addr_eq(Arc::as_ptr(l), target));
        self.remove_at(position)
    }

    /// Remove the registration identified by `id`.
    ///
    /// Returns `false` when the token is unknown or already removed.
    pub fn deregister_id(&mut self, id: ListenerId) -> bool {
        let position = self.listeners.iter().position(|(lid, _)| *lid == id);
        self.remove_at(position)
    }

    fn remove_at(&mut self, position: Option<usize>) -> bool {
        let Some(index) = position else {
            return false;
        };
        let (id, listener) = self.listeners.remove(index);
        debug!(listener = listener.name(), id = id.0, "deregistered listener");
        true
    }

    /// Dispatch `event` to every listener in registration order.
    pub fn notify(&self, event: &BinEvent<'_, T>) -> Result<(), ListenerError> {
        for (_, listener) in &self.listeners {
            if let Err(error) = listener.update(event) {
                warn!(
                    listener = listener.name(),
                    kind = %event.kind(),
                    bin_id = %event.bin().id(),
                    %error,
                    "listener failed, aborting dispatch"
                );
                return Err(error);
            }
        }
        Ok(())
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<T> Default for Notifier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listener_count", &self.listeners.len())
            .finish()
    }
}
