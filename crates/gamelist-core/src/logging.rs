//! Logging and debugging facilities for GameList.
//!
//! This module provides:
//! - Target names for filtering the `tracing` output of each subsystem
//! - Debug visualization for element trees
//! - A performance span guard for timing render passes
//!
//! # Tracing Integration
//!
//! GameList uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("gamelist=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! ```
//! use gamelist_core::{ElementTree, ElementTreeDebug};
//!
//! let mut tree = ElementTree::new();
//! let list = tree.create_element("div");
//! tree.append_child(tree.root(), list).unwrap();
//! tree.add_class(list, "game-list").unwrap();
//!
//! let output = ElementTreeDebug::new().format_subtree(&tree, tree.root()).unwrap();
//! assert!(output.contains("div.game-list"));
//! ```

use std::fmt::Write as FmtWrite;

use crate::element::{ElementId, ElementTree};
use crate::error::{ElementError, ElementResult};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "gamelist_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gamelist_core::signal";
    /// Element tree target.
    pub const ELEMENT: &str = "gamelist_core::element";
    /// Game list controller target.
    pub const GAME_LIST: &str = "gamelist::game_list";
    /// Windowing engine target.
    pub const WINDOW: &str = "gamelist::window";
    /// Viewport sizer target.
    pub const SIZER: &str = "gamelist::sizer";
    /// Performance spans target.
    pub const PERF: &str = "gamelist::perf";
}

/// Style options for element tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line-per-node representation.
    Compact,
}

/// Configuration for element tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show element IDs.
    pub show_ids: bool,
    /// Whether to show attributes.
    pub show_attributes: bool,
    /// Whether to show text content.
    pub show_text: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_attributes: true,
            show_text: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output (tags and classes only).
    pub fn minimal() -> Self {
        Self {
            show_attributes: false,
            show_text: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing element trees.
#[derive(Debug, Clone, Default)]
pub struct ElementTreeDebug {
    options: TreeFormatOptions,
}

impl ElementTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a subtree starting from a specific element.
    pub fn format_subtree(&self, tree: &ElementTree, root: ElementId) -> ElementResult<String> {
        let mut output = String::new();
        self.format_subtree_into(tree, root, 0, true, &mut output)?;
        Ok(output)
    }

    fn format_subtree_into(
        &self,
        tree: &ElementTree,
        id: ElementId,
        depth: usize,
        is_last: bool,
        output: &mut String,
    ) -> ElementResult<()> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Ok(());
            }
        }

        let element = tree.get(id).ok_or(ElementError::InvalidElementId(id))?;

        output.push_str(&self.build_prefix(depth, is_last));
        output.push_str(element.tag());
        for class in element.classes() {
            output.push('.');
            output.push_str(class);
        }

        if self.options.show_ids {
            let _ = write!(output, " [{:?}]", id);
        }

        if self.options.show_attributes {
            for (name, value) in element.attributes() {
                let _ = write!(output, " {}=\"{}\"", name, value);
            }
        }

        if self.options.show_text {
            if let Some(text) = element.text() {
                let _ = write!(output, " {:?}", text);
            }
        }

        output.push('\n');

        let children = element.children();
        let child_count = children.len();
        for (i, &child_id) in children.iter().enumerate() {
            self.format_subtree_into(tree, child_id, depth + 1, i == child_count - 1, output)?;
        }

        Ok(())
    }

    fn build_prefix(&self, depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for _ in 0..(depth - 1) {
            prefix.push_str(branch);
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used to measure the duration of render passes.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: targets::PERF, "perf", operation = name);
        Self {
            _span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (ElementTree, ElementId) {
        let mut tree = ElementTree::new();
        let list = tree.create_element("div");
        tree.append_child(tree.root(), list).unwrap();
        tree.add_class(list, "game-list").unwrap();
        for i in 0..2 {
            let row = tree.create_element("div");
            tree.append_child(list, row).unwrap();
            tree.set_attribute(row, "data-index", i.to_string()).unwrap();
            tree.set_text(row, format!("Game {i}")).unwrap();
        }
        (tree, list)
    }

    #[test]
    fn test_tree_format_hierarchy() {
        let (tree, list) = sample_tree();
        let output = ElementTreeDebug::new().format_subtree(&tree, list).unwrap();

        assert!(output.starts_with("div.game-list\n"));
        assert!(output.contains("\u{251c}\u{2500}\u{2500} div data-index=\"0\" \"Game 0\""));
        assert!(output.contains("\u{2514}\u{2500}\u{2500} div data-index=\"1\" \"Game 1\""));
    }

    #[test]
    fn test_tree_format_minimal_ascii() {
        let (tree, list) = sample_tree();
        let options = TreeFormatOptions {
            style: TreeStyle::Ascii,
            ..TreeFormatOptions::minimal()
        };
        let output = ElementTreeDebug::with_options(options)
            .format_subtree(&tree, list)
            .unwrap();

        assert_eq!(output, "div.game-list\n+-- div\n`-- div\n");
    }

    #[test]
    fn test_tree_format_max_depth() {
        let (tree, _) = sample_tree();
        let options = TreeFormatOptions {
            max_depth: Some(1),
            ..TreeFormatOptions::minimal()
        };
        let output = ElementTreeDebug::with_options(options)
            .format_subtree(&tree, tree.root())
            .unwrap();

        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
