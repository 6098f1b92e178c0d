//! Retained element tree.
//!
//! [`ElementTree`] is the rendering surface components build into: a tree of
//! tagged elements with parent links, attributes, classes, inline style
//! properties and text. It plays the role a DOM plays for a web view, which
//! makes two things cheap:
//!
//! - tagging a rendered node with data (`set_attribute`) and reading it back
//!   later, and
//! - walking from any node up to the nearest ancestor that matches a
//!   predicate ([`ElementTree::closest`]), so events that hit a nested child
//!   can be attributed to the logical node that owns it.
//!
//! Every tree has a permanent document root. Elements are created detached
//! and attached with [`ElementTree::append_child`]; removing an element
//! removes its whole subtree.
//!
//! # Example
//!
//! ```
//! use gamelist_core::ElementTree;
//!
//! let mut tree = ElementTree::new();
//! let row = tree.create_element("div");
//! tree.append_child(tree.root(), row).unwrap();
//! tree.add_class(row, "row").unwrap();
//! tree.set_attribute(row, "data-id", "42").unwrap();
//!
//! let label = tree.create_element("span");
//! tree.append_child(row, label).unwrap();
//!
//! let found = tree.closest(label, |el| el.has_class("row")).unwrap();
//! assert_eq!(found, Some(row));
//! ```

use std::collections::BTreeMap;

use slotmap::{SlotMap, new_key_type};

use crate::error::{ElementError, ElementResult};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for an element in an [`ElementTree`].
    pub struct ElementId;
}

#[derive(Debug, Clone, Default)]
struct ElementData {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    text: Option<String>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }
}

/// A read-only view of one element, handed to predicates and debug output.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    id: ElementId,
    data: &'a ElementData,
}

impl<'a> ElementRef<'a> {
    /// The element's identifier.
    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The element's tag name.
    pub fn tag(&self) -> &'a str {
        &self.data.tag
    }

    /// The value of an attribute, if set.
    pub fn attribute(&self, name: &str) -> Option<&'a str> {
        self.data.attributes.get(name).map(String::as_str)
    }

    /// The element's attributes, sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.data
            .attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Whether the element carries the given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.data.classes.iter().any(|c| c == class)
    }

    /// The element's classes in insertion order.
    pub fn classes(&self) -> &'a [String] {
        &self.data.classes
    }

    /// The value of an inline style property, if set.
    pub fn style_property(&self, name: &str) -> Option<&'a str> {
        self.data.style.get(name).map(String::as_str)
    }

    /// The element's text content, if any.
    pub fn text(&self) -> Option<&'a str> {
        self.data.text.as_deref()
    }

    /// The parent element, or `None` for detached elements and the root.
    pub fn parent(&self) -> Option<ElementId> {
        self.data.parent
    }

    /// The children of this element.
    pub fn children(&self) -> &'a [ElementId] {
        &self.data.children
    }
}

impl std::fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("tag", &self.data.tag)
            .field("classes", &self.data.classes)
            .finish()
    }
}

/// A tree of elements with a permanent document root.
#[derive(Debug, Clone)]
pub struct ElementTree {
    elements: SlotMap<ElementId, ElementData>,
    root: ElementId,
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementTree {
    /// Create a tree containing only the document root.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let root = elements.insert(ElementData::new("#document"));
        Self { elements, root }
    }

    /// The document root.
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of live elements, including the root and detached elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the tree only holds its root.
    pub fn is_empty(&self) -> bool {
        self.elements.len() == 1
    }

    /// Check if an element is alive.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Borrow a read-only view of an element.
    pub fn get(&self, id: ElementId) -> Option<ElementRef<'_>> {
        self.elements.get(id).map(|data| ElementRef { id, data })
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let id = self.elements.insert(ElementData::new(tag));
        tracing::trace!(target: targets::ELEMENT, ?id, tag, "created element");
        id
    }

    /// Attach `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> ElementResult<()> {
        self.data(parent)?;
        self.data(child)?;
        if child == self.root {
            return Err(ElementError::RootDetach);
        }
        if self.is_inclusive_ancestor(child, parent)? {
            return Err(ElementError::CircularParentage { child, parent });
        }

        self.detach(child);
        self.data_mut(child)?.parent = Some(parent);
        self.data_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove an element and its whole subtree.
    ///
    /// Returns the number of elements removed.
    pub fn remove(&mut self, id: ElementId) -> ElementResult<usize> {
        self.data(id)?;
        if id == self.root {
            return Err(ElementError::RootDetach);
        }

        self.detach(id);
        let mut doomed = vec![id];
        let mut removed = 0;
        while let Some(next) = doomed.pop() {
            if let Some(data) = self.elements.remove(next) {
                doomed.extend(data.children);
                removed += 1;
            }
        }
        tracing::trace!(target: targets::ELEMENT, ?id, removed, "removed element subtree");
        Ok(removed)
    }

    /// Remove all children (and their subtrees) of an element.
    pub fn clear_children(&mut self, id: ElementId) -> ElementResult<()> {
        let children = std::mem::take(&mut self.data_mut(id)?.children);
        for child in children {
            if let Some(data) = self.elements.get_mut(child) {
                data.parent = None;
            }
            self.remove(child)?;
        }
        Ok(())
    }

    /// Strip an element back to its bare tag.
    ///
    /// Children are removed; classes, attributes, inline style and text are
    /// cleared. The element keeps its id and its place under its parent.
    pub fn reset(&mut self, id: ElementId) -> ElementResult<()> {
        self.clear_children(id)?;
        let data = self.data_mut(id)?;
        data.classes.clear();
        data.attributes.clear();
        data.style.clear();
        data.text = None;
        tracing::trace!(target: targets::ELEMENT, ?id, "reset element");
        Ok(())
    }

    /// Get the parent of an element.
    pub fn parent(&self, id: ElementId) -> ElementResult<Option<ElementId>> {
        Ok(self.data(id)?.parent)
    }

    /// Get the children of an element.
    pub fn children(&self, id: ElementId) -> ElementResult<&[ElementId]> {
        Ok(self.data(id)?.children.as_slice())
    }

    /// Get the tag name of an element.
    pub fn tag(&self, id: ElementId) -> ElementResult<&str> {
        Ok(&self.data(id)?.tag)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> ElementResult<()> {
        self.data_mut(id)?
            .attributes
            .insert(name.to_string(), value.into());
        Ok(())
    }

    /// Read an attribute.
    pub fn attribute(&self, id: ElementId, name: &str) -> ElementResult<Option<&str>> {
        Ok(self.data(id)?.attributes.get(name).map(String::as_str))
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> ElementResult<Option<String>> {
        Ok(self.data_mut(id)?.attributes.remove(name))
    }

    /// Add a class if not already present.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> ElementResult<()> {
        let data = self.data_mut(id)?;
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a class if present.
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> ElementResult<()> {
        self.data_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Add or remove a class depending on `enabled`.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, enabled: bool) -> ElementResult<()> {
        if enabled {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }

    /// Whether an element carries a class.
    pub fn has_class(&self, id: ElementId, class: &str) -> ElementResult<bool> {
        Ok(self.data(id)?.classes.iter().any(|c| c == class))
    }

    /// Set an inline style property (including `--custom` properties).
    pub fn set_style_property(
        &mut self,
        id: ElementId,
        name: &str,
        value: impl Into<String>,
    ) -> ElementResult<()> {
        self.data_mut(id)?.style.insert(name.to_string(), value.into());
        Ok(())
    }

    /// Read an inline style property.
    pub fn style_property(&self, id: ElementId, name: &str) -> ElementResult<Option<&str>> {
        Ok(self.data(id)?.style.get(name).map(String::as_str))
    }

    /// Replace the text content of an element.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> ElementResult<()> {
        self.data_mut(id)?.text = Some(text.into());
        Ok(())
    }

    /// The text content of an element.
    pub fn text(&self, id: ElementId) -> ElementResult<Option<&str>> {
        Ok(self.data(id)?.text.as_deref())
    }

    /// Iterate over `id` and then each of its ancestors, ending at the
    /// outermost one.
    pub fn ancestors(&self, id: ElementId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.contains(id).then_some(id),
        }
    }

    /// Find the nearest inclusive ancestor of `id` matching `predicate`.
    ///
    /// The element itself is tested first, then its parent and so on up to
    /// the top of its tree.
    pub fn closest<P>(&self, id: ElementId, mut predicate: P) -> ElementResult<Option<ElementId>>
    where
        P: FnMut(ElementRef<'_>) -> bool,
    {
        self.data(id)?;
        Ok(self
            .ancestors(id)
            .find(|el| predicate(*el))
            .map(|el| el.id()))
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_inclusive_ancestor(&self, ancestor: ElementId, node: ElementId) -> ElementResult<bool> {
        self.data(ancestor)?;
        self.data(node)?;
        Ok(self.ancestors(node).any(|el| el.id() == ancestor))
    }

    /// Collect all descendants of `id` in depth-first pre-order.
    pub fn descendants(&self, id: ElementId) -> ElementResult<Vec<ElementId>> {
        let mut result = Vec::new();
        let mut stack: Vec<ElementId> = self.data(id)?.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            result.push(next);
            if let Some(data) = self.elements.get(next) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        Ok(result)
    }

    fn detach(&mut self, id: ElementId) {
        let Some(old_parent) = self.elements.get(id).and_then(|d| d.parent) else {
            return;
        };
        if let Some(parent_data) = self.elements.get_mut(old_parent) {
            parent_data.children.retain(|&child| child != id);
        }
        if let Some(data) = self.elements.get_mut(id) {
            data.parent = None;
        }
    }

    fn data(&self, id: ElementId) -> ElementResult<&ElementData> {
        self.elements.get(id).ok_or(ElementError::InvalidElementId(id))
    }

    fn data_mut(&mut self, id: ElementId) -> ElementResult<&mut ElementData> {
        self.elements
            .get_mut(id)
            .ok_or(ElementError::InvalidElementId(id))
    }
}

/// Iterator returned by [`ElementTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a ElementTree,
    next: Option<ElementId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = ElementRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let element = self.tree.get(id)?;
        self.next = element.parent();
        Some(element)
    }
}

static_assertions::assert_impl_all!(ElementTree: Send, Sync);
