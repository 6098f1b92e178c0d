//! Error types for the game list.
//!
//! Every variant here is a contract violation between the list and its owner
//! (or an inconsistency between the rendered rows and the current item list).
//! None of them is a runtime condition the list can recover from by itself;
//! the owner fixes its inputs and the next render recomputes everything.

use std::path::PathBuf;

use gamelist_core::{ElementError, ElementId};

/// Result type alias for game list operations.
pub type Result<T> = std::result::Result<T, GameListError>;

/// Errors that can occur while rendering or routing events.
#[derive(Debug, thiserror::Error)]
pub enum GameListError {
    /// Rows must be rendered but no item list was supplied.
    #[error("No item list supplied; call set_games() before rendering")]
    MissingItems,

    /// An action occurred that needs a callback nobody connected.
    #[error("No slot connected to required callback '{callback}'")]
    MissingCallback {
        /// Name of the signal field that has no connection.
        callback: &'static str,
    },

    /// A layout update was attempted before the container was mounted.
    #[error("Game list container is not mounted")]
    NotMounted,

    /// `mount()` was called on a list that already owns a container.
    #[error("Game list is already mounted as {0:?}")]
    AlreadyMounted(ElementId),

    /// A context-menu target has no row element among its ancestors.
    #[error("Element {element:?} is not inside a rendered row")]
    RowNotFound {
        /// The event target.
        element: ElementId,
    },

    /// A rendered row names an item that is not in the current list.
    #[error("No item with id '{id}' in the current list")]
    UnknownItem {
        /// The identifier read from the row element.
        id: String,
    },

    /// The configured row height is not a positive, finite number.
    #[error("Invalid row height {value}; expected a positive number of pixels")]
    InvalidRowHeight {
        /// The rejected value.
        value: f32,
    },

    /// An element tree operation failed.
    #[error("Element tree error: {0}")]
    Element(#[from] ElementError),

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading a [`GameListConfig`](crate::GameListConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse error.
    #[error("Failed to parse game list config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Failed to serialize game list config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// File I/O error.
    #[error("Failed to read game list config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A field holds a value the list cannot work with.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl GameListError {
    /// Create a missing-callback error.
    pub fn missing_callback(callback: &'static str) -> Self {
        Self::MissingCallback { callback }
    }

    /// Create an unknown-item error.
    pub fn unknown_item(id: impl Into<String>) -> Self {
        Self::UnknownItem { id: id.into() }
    }
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
