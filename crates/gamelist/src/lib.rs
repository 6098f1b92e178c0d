//! # GameList
//!
//! A virtualized, windowed list of games for library views that may hold
//! thousands of entries. Only the rows near the viewport exist as elements;
//! the selected game is kept scrolled into view, and clicks, double-clicks,
//! keyboard navigation, drags and context-menu requests on rows are reported
//! to the owner through signals.
//!
//! The list is headless: it renders into a [`gamelist_core::ElementTree`] and
//! receives input as [`ListEvent`]s, so any host that can mirror an element
//! tree and translate its input can drive it.
//!
//! ## Modules
//!
//! - [`window`]: pure windowing math (visible range, overscan, scroll target)
//! - [`sizer`]: viewport size tracking
//! - [`stepper`]: keyboard navigation between rows
//! - [`render`]: row and placeholder rendering hooks
//! - [`events`]: input events routed into the list
//! - [`config`]: TOML-backed configuration
//!
//! ## Logging
//!
//! The list logs through `tracing` under the targets in
//! [`gamelist_core::logging::targets`]; render passes are wrapped in a
//! [`gamelist_core::PerfSpan`].

pub mod config;
mod error;
pub mod events;
mod game_list;
mod item;
pub mod render;
pub mod sizer;
pub mod stepper;
pub mod window;

pub use config::GameListConfig;
pub use error::{ConfigError, GameListError, Result};
pub use events::{
    ContextMenuEvent, ContextMenuReason, DragEvent, Key, KeyPressEvent, KeyboardModifiers,
    ListEvent, MouseButton, PointerEvent, ResizeEvent, ScrollEvent,
};
pub use game_list::{DRAGGING_CLASS, GameList, GameListProps, RenderOutcome, SELECTED_CLASS};
pub use item::{Item, ItemList, same_item};
pub use render::{NoRowsRenderer, RowBuilder, RowRenderer, RowState};
pub use sizer::ViewportSizer;
pub use stepper::{ArrowKeyStepper, StepTarget};
pub use window::{RowWindow, SectionRendered};

pub use gamelist_core::{
    ElementError, ElementId, ElementResult, ElementTree, Point, Signal, Size,
};

static_assertions::assert_impl_all!(ViewportSizer: Send, Sync);
static_assertions::assert_impl_all!(RowWindow: Send, Sync, Copy);
