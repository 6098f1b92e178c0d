//! Core systems for GameList.
//!
//! This crate provides the primitives the game list component is built from:
//!
//! - **Signal/Slot System**: Type-safe callbacks from a component to its owner
//! - **Property System**: Values that report whether a write changed them
//! - **Element Tree**: A retained tree of tagged elements with ancestry queries
//! - **Geometry**: Points and sizes in pixels
//! - **Logging**: `tracing` targets, performance spans, tree debug output
//!
//! # Signal/Slot Example
//!
//! ```
//! use gamelist_core::Signal;
//!
//! let selection_changed = Signal::<Option<usize>>::new();
//!
//! let conn_id = selection_changed.connect(|index| {
//!     println!("Selected row: {:?}", index);
//! });
//!
//! selection_changed.emit(Some(3));
//! selection_changed.disconnect(conn_id);
//! ```

pub mod element;
mod error;
pub mod logging;
pub mod property;
pub mod signal;
mod types;

pub use element::{Ancestors, ElementId, ElementRef, ElementTree};
pub use error::{ElementError, ElementResult};
pub use logging::{ElementTreeDebug, PerfSpan, TreeFormatOptions, TreeStyle};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use types::{Point, Size};
