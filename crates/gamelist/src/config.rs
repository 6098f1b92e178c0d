//! Game list configuration.
//!
//! [`GameListConfig`] holds the values a host application usually keeps in a
//! settings file: the uniform row height, the overscan margin, and the names
//! the list uses when it tags the elements it renders.
//!
//! ```
//! use gamelist::GameListConfig;
//!
//! let config = GameListConfig::from_toml_str(r#"
//!     row_height = 30.0
//!     overscan_rows = 10
//! "#).unwrap();
//!
//! assert_eq!(config.row_height, 30.0);
//! assert_eq!(config.overscan_rows, 10);
//! assert_eq!(config.row_height_property, "--game-row-height");
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default number of rows rendered beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN_ROWS: usize = 15;

/// Default row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f32 = 32.0;

/// Configuration for a [`GameList`](crate::GameList).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameListConfig {
    /// Height of every row, in pixels.
    pub row_height: f32,
    /// Rows rendered above and below the visible range.
    pub overscan_rows: usize,
    /// CSS custom property written onto the container with the row height.
    pub row_height_property: String,
    /// Class carried by the list container.
    pub container_class: String,
    /// Class carried by every rendered row root.
    pub row_class: String,
    /// Attribute holding the item identifier on every row root.
    pub item_id_attribute: String,
    /// Attribute holding the logical index on every row root.
    pub item_index_attribute: String,
}

impl Default for GameListConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            overscan_rows: DEFAULT_OVERSCAN_ROWS,
            row_height_property: "--game-row-height".to_string(),
            container_class: "game-list".to_string(),
            row_class: "game-list-row".to_string(),
            item_id_attribute: "data-game-id".to_string(),
            item_index_attribute: "data-index".to_string(),
        }
    }
}

impl GameListConfig {
    /// Parse and validate a configuration from TOML text.
    ///
    /// Missing fields take their default values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a TOML file.
    pub fn load_toml(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration to TOML text.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Set the row height.
    #[must_use]
    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the overscan margin.
    #[must_use]
    pub fn with_overscan_rows(mut self, overscan_rows: usize) -> Self {
        self.overscan_rows = overscan_rows;
        self
    }

    /// Check that every field holds a usable value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_row_height(self.row_height) {
            return Err(ConfigError::invalid_value(
                "row_height",
                format!("{} is not a positive number of pixels", self.row_height),
            ));
        }
        if !self.row_height_property.starts_with("--") {
            return Err(ConfigError::invalid_value(
                "row_height_property",
                "custom properties must start with '--'",
            ));
        }
        for (field, value) in [
            ("container_class", &self.container_class),
            ("row_class", &self.row_class),
            ("item_id_attribute", &self.item_id_attribute),
            ("item_index_attribute", &self.item_index_attribute),
        ] {
            if value.is_empty() {
                return Err(ConfigError::invalid_value(field, "must not be empty"));
            }
        }
        Ok(())
    }
}

pub(crate) fn is_valid_row_height(row_height: f32) -> bool {
    row_height.is_finite() && row_height > 0.0
}
