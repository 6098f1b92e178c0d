//! Row and placeholder rendering hooks.
//!
//! The list decides *which* rows exist and where they sit; the owner decides
//! what a row looks like. For every visible index the list creates an empty
//! row root and hands a [`RowBuilder`] scoped to that root to the owner's
//! [`RowRenderer`]. The builder only reaches elements inside the row, so a
//! renderer cannot disturb other rows or the container.

use gamelist_core::{ElementError, ElementId, ElementResult, ElementTree};

/// Per-row flags passed to a [`RowRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowState {
    /// Logical index of the row in the current item list.
    pub index: usize,
    /// The row shows the selected item.
    pub selected: bool,
    /// The row shows the item being dragged.
    pub dragged: bool,
}

/// Builds the content of one row (or of the empty-list placeholder).
pub struct RowBuilder<'a> {
    tree: &'a mut ElementTree,
    root: ElementId,
}

impl<'a> RowBuilder<'a> {
    pub(crate) fn new(tree: &'a mut ElementTree, root: ElementId) -> Self {
        Self { tree, root }
    }

    /// The row root element.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Read-only access to the whole tree.
    pub fn tree(&self) -> &ElementTree {
        &*self.tree
    }

    /// Append a new element to the row root.
    pub fn append_child(&mut self, tag: &str) -> ElementResult<ElementId> {
        self.append(self.root, tag)
    }

    /// Append a new element under `parent`, which must belong to this row.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementResult<ElementId> {
        self.check(parent)?;
        let child = self.tree.create_element(tag);
        if let Err(err) = self.tree.append_child(parent, child) {
            self.tree.remove(child)?;
            return Err(err);
        }
        Ok(child)
    }

    /// Set the text content of an element in this row.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> ElementResult<()> {
        self.check(id)?;
        self.tree.set_text(id, text)
    }

    /// Set an attribute on an element in this row.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> ElementResult<()> {
        self.check(id)?;
        self.tree.set_attribute(id, name, value)
    }

    /// Add a class to an element in this row.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> ElementResult<()> {
        self.check(id)?;
        self.tree.add_class(id, class)
    }

    /// Set an inline style property on an element in this row.
    pub fn set_style_property(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> ElementResult<()> {
        self.check(id)?;
        self.tree.set_style_property(id, name, value)
    }

    fn check(&self, id: ElementId) -> ElementResult<()> {
        if self.tree.is_inclusive_ancestor(self.root, id)? {
            Ok(())
        } else {
            Err(ElementError::InvalidElementId(id))
        }
    }
}

/// Renders the content of one row.
///
/// Implemented for any `Fn(&mut RowBuilder<'_>, &T, &RowState)` closure.
pub trait RowRenderer<T>: Send + Sync {
    /// Fill `row` with the content for `item`.
    fn render_row(&self, row: &mut RowBuilder<'_>, item: &T, state: &RowState) -> ElementResult<()>;
}

impl<T, F> RowRenderer<T> for F
where
    F: Fn(&mut RowBuilder<'_>, &T, &RowState) -> ElementResult<()> + Send + Sync,
{
    fn render_row(&self, row: &mut RowBuilder<'_>, item: &T, state: &RowState) -> ElementResult<()> {
        self(row, item, state)
    }
}

/// Renders the placeholder shown when the item list is empty.
pub type NoRowsRenderer = Box<dyn Fn(&mut RowBuilder<'_>) -> ElementResult<()> + Send + Sync>;
