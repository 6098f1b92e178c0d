//! Error types for GameList core primitives.

use crate::element::ElementId;

/// Errors raised by [`ElementTree`](crate::ElementTree) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    /// The element ID is invalid or the element has been removed.
    #[error("Invalid or removed element {0:?}")]
    InvalidElementId(ElementId),

    /// Attempted to attach an element below itself or one of its descendants.
    #[error("Cannot attach element {child:?} below its own descendant {parent:?}")]
    CircularParentage {
        /// The element being attached.
        child: ElementId,
        /// The requested parent.
        parent: ElementId,
    },

    /// The document root cannot be removed or re-parented.
    #[error("The document root cannot be detached")]
    RootDetach,
}

/// Result type for element tree operations.
pub type ElementResult<T> = std::result::Result<T, ElementError>;
