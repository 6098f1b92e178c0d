//! Items and the item list shown by a [`GameList`](crate::GameList).
//!
//! The list never owns, sorts or filters its data. The owner hands it an
//! [`ItemList`], an immutable, cheaply cloned sequence of shared items, and
//! replaces the whole list when its data changes. Items are compared by
//! identity ([`Arc::ptr_eq`]), never by value: two records with the same
//! fields are still two different rows.

use std::fmt;
use std::sync::Arc;

/// A record the list can display.
///
/// Only a stable unique identifier is required; everything else is read by
/// the owner's [`RowRenderer`](crate::RowRenderer).
pub trait Item: Send + Sync + 'static {
    /// Stable, unique identifier of this item.
    fn id(&self) -> &str;
}

/// Whether two shared items are the same item.
#[inline]
pub fn same_item<T: ?Sized>(a: &Arc<T>, b: &Arc<T>) -> bool {
    Arc::ptr_eq(a, b)
}

/// An ordered, immutable sequence of items.
///
/// Cloning an `ItemList` is cheap and yields the *same* list
/// ([`same_list`](Self::same_list) is `true`); building a new one from the
/// same items yields a different list.
pub struct ItemList<T> {
    items: Arc<[Arc<T>]>,
}

impl<T: Item> ItemList<T> {
    /// Create a list from shared items.
    pub fn new(items: impl IntoIterator<Item = Arc<T>>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Create a list taking ownership of plain items.
    pub fn from_items(items: impl IntoIterator<Item = T>) -> Self {
        Self::new(items.into_iter().map(Arc::new))
    }

    /// An empty list.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item at `index`.
    pub fn get(&self, index: usize) -> Option<&Arc<T>> {
        self.items.get(index)
    }

    /// Iterate over the items in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Arc<T>> {
        self.items.iter()
    }

    /// The items as a slice.
    pub fn as_slice(&self) -> &[Arc<T>] {
        &self.items
    }

    /// Position of `item` in this list, compared by identity.
    pub fn index_of(&self, item: &Arc<T>) -> Option<usize> {
        self.items.iter().position(|candidate| same_item(candidate, item))
    }

    /// Find an item by its identifier.
    pub fn find_by_id(&self, id: &str) -> Option<(usize, &Arc<T>)> {
        self.items
            .iter()
            .enumerate()
            .find(|(_, item)| item.id() == id)
    }

    /// Whether `other` is this very list (not merely equal contents).
    pub fn same_list(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T> Clone for ItemList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T: Item> Default for ItemList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Item> FromIterator<Arc<T>> for ItemList<T> {
    fn from_iter<I: IntoIterator<Item = Arc<T>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T: Item> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_items(items)
    }
}

impl<'a, T: Item> IntoIterator for &'a ItemList<T> {
    type Item = &'a Arc<T>;
    type IntoIter = std::slice::Iter<'a, Arc<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Item> fmt::Debug for ItemList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.items.iter().map(|item| item.id()))
            .finish()
    }
}
