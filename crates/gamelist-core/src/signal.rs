//! Signal/slot callbacks for GameList.
//!
//! A [`Signal<Args>`] is the way a component hands notifications back to its
//! owner. The owner connects slots (closures); the component emits the signal
//! and every connected slot runs synchronously on the emitting thread.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type components expose as public fields
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//!
//! # Example
//!
//! ```
//! use gamelist_core::Signal;
//!
//! let launched = Signal::<String>::new();
//!
//! let conn_id = launched.connect(|title| {
//!     println!("Launching {}", title);
//! });
//!
//! launched.emit("Doom".to_string());
//! launched.disconnect(conn_id);
//! assert!(!launched.is_connected());
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// Slots are invoked directly, in connection order, each time the signal is
/// emitted. The connection table is not locked while slots run, so a slot may
/// connect or disconnect other slots on the same signal.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(String, usize)` for several.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Whether at least one slot is connected.
    pub fn is_connected(&self) -> bool {
        self.connection_count() > 0
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// Returns the number of slots invoked.
    pub fn emit(&self, args: Args) -> usize {
        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in &slots {
            slot(&args);
        }
        slots.len()
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<(String, usize)>: Send, Sync);
