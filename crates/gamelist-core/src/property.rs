//! Change-tracking properties.
//!
//! A [`Property<T>`] wraps a value and reports whether a write actually
//! changed it. Components use the result to decide whether a re-render is
//! needed or a change signal must be emitted.
//!
//! # Example
//!
//! ```
//! use gamelist_core::{Property, Signal};
//!
//! struct Sorting {
//!     order_by: Property<String>,
//!     order_changed: Signal<String>,
//! }
//!
//! impl Sorting {
//!     fn set_order_by(&self, column: &str) {
//!         if self.order_by.set(column.to_string()) {
//!             self.order_changed.emit(column.to_string());
//!         }
//!     }
//! }
//!
//! let sorting = Sorting {
//!     order_by: Property::new("title".to_string()),
//!     order_changed: Signal::new(),
//! };
//! sorting.set_order_by("platform");
//! assert_eq!(sorting.order_by.get(), "platform");
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A property that tracks changes.
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}
