//! Input events routed into a [`GameList`](crate::GameList).
//!
//! The host translates its platform input into these events and passes them
//! to [`GameList::handle_event`](crate::GameList::handle_event). Every
//! pointer, key and context-menu event names the element it hit (`target`);
//! the list works out which row, if any, that element belongs to.

use gamelist_core::{ElementId, Point, Size};

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Primary button (usually left).
    #[default]
    Left,
    /// Secondary button (usually right).
    Right,
    /// Middle button (scroll wheel click).
    Middle,
}

/// Keys the list reacts to. Everything else arrives as [`Key::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    NumpadEnter,
    Space,
    Escape,
    Tab,
    /// Any key without special meaning to the list.
    Other,
}

impl Key {
    /// Whether this key activates (launches) the selected item.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::NumpadEnter)
    }
}

/// Key press, delivered to the element that has keyboard focus.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPressEvent {
    /// The focused element.
    pub target: ElementId,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a key press without modifiers.
    pub fn new(target: ElementId, key: Key) -> Self {
        Self {
            target,
            key,
            modifiers: KeyboardModifiers::NONE,
            is_repeat: false,
        }
    }

    /// Mark this press as an auto-repeat.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.is_repeat = true;
        self
    }
}

/// A click or double-click.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    /// The innermost element under the pointer.
    pub target: ElementId,
    /// Position relative to the list viewport.
    pub local_pos: Point,
    /// The button involved.
    pub button: MouseButton,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl PointerEvent {
    /// Create a left-button pointer event on `target`.
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            local_pos: Point::ZERO,
            button: MouseButton::Left,
            modifiers: KeyboardModifiers::NONE,
        }
    }

    /// Set the viewport-relative position.
    #[must_use]
    pub fn at(mut self, local_pos: Point) -> Self {
        self.local_pos = local_pos;
        self
    }
}

/// Drag start or end on a row. Forwarded to the owner unmodified.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEvent {
    /// The element the drag originated from (or ended on).
    pub target: ElementId,
    /// Position relative to the list viewport.
    pub local_pos: Point,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl DragEvent {
    /// Create a drag event on `target`.
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            local_pos: Point::ZERO,
            modifiers: KeyboardModifiers::NONE,
        }
    }
}

/// Reason a context menu was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContextMenuReason {
    /// Triggered by mouse (typically right-click).
    #[default]
    Mouse,
    /// Triggered by keyboard (Menu key).
    Keyboard,
}

/// Context menu request.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuEvent {
    /// The innermost element the request hit.
    pub target: ElementId,
    /// Position relative to the list viewport.
    pub local_pos: Point,
    /// The reason the context menu was requested.
    pub reason: ContextMenuReason,
}

impl ContextMenuEvent {
    /// Create a mouse-triggered context menu request on `target`.
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            local_pos: Point::ZERO,
            reason: ContextMenuReason::Mouse,
        }
    }
}

/// The scroll container's content box changed size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    /// The new content-box size.
    pub size: Size,
}

/// The user scrolled the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEvent {
    /// New vertical scroll offset in pixels.
    pub scroll_top: f32,
}

/// All events a [`GameList`](crate::GameList) handles.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    Resize(ResizeEvent),
    Scroll(ScrollEvent),
    KeyPress(KeyPressEvent),
    Click(PointerEvent),
    DoubleClick(PointerEvent),
    DragStart(DragEvent),
    DragEnd(DragEvent),
    ContextMenu(ContextMenuEvent),
}

impl ListEvent {
    /// The element the event targets, for events that have one.
    pub fn target(&self) -> Option<ElementId> {
        match self {
            ListEvent::Resize(_) | ListEvent::Scroll(_) => None,
            ListEvent::KeyPress(e) => Some(e.target),
            ListEvent::Click(e) | ListEvent::DoubleClick(e) => Some(e.target),
            ListEvent::DragStart(e) | ListEvent::DragEnd(e) => Some(e.target),
            ListEvent::ContextMenu(e) => Some(e.target),
        }
    }
}
