//! Signal/slot system for Wicker.
//!
//! A type-safe observer mechanism: signals are emitted by components when
//! their state changes, and connected slots (closures) are invoked in
//! response. Wicker's contract is single-threaded and cooperative, so every
//! emission is a direct call — all connected slots run to completion in the
//! emitting thread before `emit` returns. There is no deferred or queued
//! delivery.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use wicker_core::Signal;
//!
//! let rows_inserted = Signal::<(usize, usize)>::new();
//!
//! let id = rows_inserted.connect(|(start, count)| {
//!     println!("inserted {count} rows at {start}");
//! });
//!
//! rows_inserted.emit((0, 3));
//! rows_inserted.disconnect(id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, all connected slots are invoked immediately
/// with a reference to the provided arguments, in the emitting thread.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no arguments, or a tuple like `(usize, usize)` for
///   multiple arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Arc<dyn Fn(&Args) + Send + Sync>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot
    /// later.
    ///
    /// # Example
    ///
    /// ```
    /// use wicker_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("got: {s}"));
    /// signal.emit("hello".to_string());
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot whose connection is dropped together with the
    /// returned guard.
    ///
    /// This is useful for RAII-style connection management, ensuring the
    /// slot is cleaned up when the receiver goes out of scope.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<'_, Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: self.connect(slot),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false`
    /// otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. This is useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// If the signal is blocked, this does nothing. Otherwise, every
    /// connected slot is invoked in the current thread before this method
    /// returns. Slots are invoked in an unspecified order.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots so a slot may connect/disconnect on this same
        // signal without deadlocking on the connection table.
        let slots: Vec<_> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

static_assertions::assert_impl_all!(Signal<(usize, usize)>: Send, Sync);
static_assertions::assert_impl_all!(Signal<()>: Send, Sync);

/// A connection that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use wicker_core::Signal;
///
/// let signal = Signal::<()>::new();
/// let hits = Arc::new(AtomicUsize::new(0));
///
/// {
///     let hits = hits.clone();
///     let _guard = signal.connect_scoped(move |_| {
///         hits.fetch_add(1, Ordering::SeqCst);
///     });
///     signal.emit(());
/// }
///
/// // Guard dropped: the slot is gone.
/// signal.emit(());
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
pub struct ConnectionGuard<'a, Args> {
    signal: &'a Signal<Args>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<'_, Args> {
    /// The ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<'_, Args> {
    fn drop(&mut self) {
        self.signal.disconnect(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_and_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let recv = received.clone();
        signal.connect(move |n| recv.lock().push(*n));

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1, 2]);
    }

    #[test]
    fn emit_is_synchronous() {
        let signal = Signal::<usize>::new();
        let seen = Arc::new(Mutex::new(None));

        let recv = seen.clone();
        signal.connect(move |n| *recv.lock() = Some(*n));

        signal.emit(7);
        // The slot has already run by the time emit returns.
        assert_eq!(*seen.lock(), Some(7));
    }

    #[test]
    fn disconnect_removes_slot() {
        let signal = Signal::<()>::new();
        let count = Arc::new(Mutex::new(0));

        let recv = count.clone();
        let id = signal.connect(move |_| *recv.lock() += 1);
        assert_eq!(signal.connection_count(), 1);

        signal.emit(());
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(());

        assert_eq!(*count.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn blocked_emit_is_dropped() {
        let signal = Signal::<()>::new();
        let count = Arc::new(Mutex::new(0));

        let recv = count.clone();
        signal.connect(move |_| *recv.lock() += 1);

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(());

        signal.set_blocked(false);
        signal.emit(());

        assert_eq!(*count.lock(), 1);
    }

    #[test]
    fn multiple_slots_all_invoked() {
        let signal = Signal::<u8>::new();
        let count = Arc::new(Mutex::new(0u32));

        for _ in 0..3 {
            let recv = count.clone();
            signal.connect(move |n| *recv.lock() += u32::from(*n));
        }

        signal.emit(5);
        assert_eq!(*count.lock(), 15);
    }

    #[test]
    fn scoped_connection_disconnects_on_drop() {
        let signal = Signal::<()>::new();
        let count = Arc::new(Mutex::new(0));

        {
            let recv = count.clone();
            let guard = signal.connect_scoped(move |_| *recv.lock() += 1);
            assert_eq!(signal.connection_count(), 1);
            signal.emit(());
            drop(guard);
        }

        signal.emit(());
        assert_eq!(*count.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn slot_may_disconnect_itself() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(Mutex::new(0));

        let sig = signal.clone();
        let recv = count.clone();
        let slot_id = Arc::new(Mutex::new(None::<ConnectionId>));
        let slot_id_inner = slot_id.clone();
        let id = signal.connect(move |_| {
            *recv.lock() += 1;
            if let Some(id) = slot_id_inner.lock().take() {
                sig.disconnect(id);
            }
        });
        *slot_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(*count.lock(), 1);
    }
}
