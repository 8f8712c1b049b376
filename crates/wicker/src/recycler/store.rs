//! Ordered item storage for the recycler engine.
//!
//! [`ItemStore<T>`] owns the row collection and all mutation operations.
//! It is a leaf component with no view concepts: every mutation returns a
//! [`ChangeRecord`] describing exactly the delta applied, and the adapter
//! translates that record into the external change notification. Because
//! the record is produced by the mutation itself, an observer's view of
//! the row count can never diverge from [`ItemStore::len`].

use parking_lot::RwLock;

use wicker_core::logging::targets;

use crate::error::{Error, Result};

/// The structural delta produced by a single store mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeRecord {
    /// `count` contiguous rows were inserted starting at `start`.
    Inserted { start: usize, count: usize },
    /// The whole collection was restructured; observers must re-query.
    Reset,
}

/// An ordered sequence of rows.
///
/// Insertion order is semantically significant: it defines display order
/// and row indices. Items are opaque to the store — it holds values and
/// position indices, never inspects fields.
///
/// Mutation goes through `&self` (interior `RwLock`, as elsewhere in the
/// workspace) so the store can be shared between the adapter and the host.
pub struct ItemStore<T> {
    items: RwLock<Vec<T>>,
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ItemStore<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Creates a store seeded with `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(items),
        }
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if the store holds no rows.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends one item at the end.
    pub fn push(&self, item: T) -> ChangeRecord {
        let mut items = self.items.write();
        let start = items.len();
        items.push(item);
        tracing::trace!(target: targets::STORE, start, "row appended");
        ChangeRecord::Inserted { start, count: 1 }
    }

    /// Appends a contiguous batch at the end.
    ///
    /// Returns `None` for an empty batch: nothing changed, nothing to
    /// report.
    pub fn extend(&self, batch: impl IntoIterator<Item = T>) -> Option<ChangeRecord> {
        let mut items = self.items.write();
        let start = items.len();
        items.extend(batch);
        let count = items.len() - start;
        if count == 0 {
            return None;
        }
        tracing::trace!(target: targets::STORE, start, count, "rows appended");
        Some(ChangeRecord::Inserted { start, count })
    }

    /// Empties the store.
    pub fn clear(&self) -> ChangeRecord {
        self.items.write().clear();
        tracing::trace!(target: targets::STORE, "store cleared");
        ChangeRecord::Reset
    }

    /// Replaces the whole collection with `items`.
    ///
    /// Always a full reset, including when `items` is empty: the result is
    /// then an empty store with a reset notification.
    pub fn replace_all(&self, items: Vec<T>) -> ChangeRecord {
        let mut rows = self.items.write();
        *rows = items;
        tracing::trace!(target: targets::STORE, len = rows.len(), "store replaced");
        ChangeRecord::Reset
    }

    /// Replaces the item at `position` in place.
    ///
    /// A data change, not a structural one: row count and order are
    /// untouched, so no [`ChangeRecord`] is produced. Fails with
    /// [`Error::IndexOutOfRange`] outside `[0, len)`.
    pub fn set(&self, position: usize, item: T) -> Result<()> {
        let mut items = self.items.write();
        let len = items.len();
        let slot = items
            .get_mut(position)
            .ok_or_else(|| Error::out_of_range(position, len))?;
        *slot = item;
        tracing::trace!(target: targets::STORE, position, "row updated");
        Ok(())
    }

    /// Calls `f` with a borrow of the item at `position`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] outside `[0, len)`.
    pub fn with_item<R>(&self, position: usize, f: impl FnOnce(&T) -> R) -> Result<R> {
        let items = self.items.read();
        let item = items
            .get(position)
            .ok_or_else(|| Error::out_of_range(position, items.len()))?;
        Ok(f(item))
    }
}

impl<T: Clone> ItemStore<T> {
    /// Returns the item at `position`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] outside `[0, len)`.
    pub fn get(&self, position: usize) -> Result<T> {
        self.with_item(position, T::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_reports_insert_at_old_len() {
        let store = ItemStore::new();
        assert_eq!(store.push("a"), ChangeRecord::Inserted { start: 0, count: 1 });
        assert_eq!(store.push("b"), ChangeRecord::Inserted { start: 1, count: 1 });
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn extend_reports_batch_range() {
        let store = ItemStore::new();
        store.push("a");

        let record = store.extend(["b", "c", "d"]);
        assert_eq!(record, Some(ChangeRecord::Inserted { start: 1, count: 3 }));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn extend_empty_batch_is_a_no_op() {
        let store = ItemStore::<&str>::new();
        store.push("a");

        assert_eq!(store.extend([]), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clear_resets() {
        let store = ItemStore::new();
        store.extend(["a", "b"]);

        assert_eq!(store.clear(), ChangeRecord::Reset);
        assert!(store.is_empty());
    }

    #[test]
    fn replace_all_installs_new_collection() {
        let store = ItemStore::new();
        store.extend(["a", "b", "c"]);

        assert_eq!(store.replace_all(vec!["x", "y"]), ChangeRecord::Reset);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap(), "x");
        assert_eq!(store.get(1).unwrap(), "y");
    }

    #[test]
    fn replace_all_with_empty_collection_empties_the_store() {
        let store = ItemStore::new();
        store.extend(["a", "b"]);

        assert_eq!(store.replace_all(Vec::new()), ChangeRecord::Reset);
        assert!(store.is_empty());
    }

    #[test]
    fn get_preserves_insertion_order() {
        let store = ItemStore::new();
        store.push("first");
        store.push("second");

        assert_eq!(store.get(0).unwrap(), "first");
        assert_eq!(store.get(1).unwrap(), "second");
    }

    #[test]
    fn get_out_of_range_fails() {
        let store = ItemStore::new();
        store.push("only");

        assert_eq!(store.get(1), Err(Error::out_of_range(1, 1)));
        assert_eq!(store.get(usize::MAX), Err(Error::out_of_range(usize::MAX, 1)));
    }

    #[test]
    fn get_on_empty_store_fails() {
        let store = ItemStore::<String>::new();
        assert_eq!(store.get(0), Err(Error::out_of_range(0, 0)));
    }

    #[test]
    fn set_replaces_in_place() {
        let store = ItemStore::new();
        store.extend(["a", "b"]);

        store.set(1, "c").unwrap();
        assert_eq!(store.get(1).unwrap(), "c");
        assert_eq!(store.len(), 2);

        assert_eq!(store.set(2, "d"), Err(Error::out_of_range(2, 2)));
    }

    #[test]
    fn with_item_borrows_without_clone() {
        struct NotClone(&'static str);

        let store = ItemStore::new();
        store.push(NotClone("payload"));

        let name = store.with_item(0, |item| item.0).unwrap();
        assert_eq!(name, "payload");
    }

    #[test]
    fn replay_implies_len_after_each_operation() {
        let store = ItemStore::new();
        let mut expected = 0usize;

        store.push(1);
        expected += 1;
        assert_eq!(store.len(), expected);

        store.extend([2, 3, 4]);
        expected += 3;
        assert_eq!(store.len(), expected);

        store.clear();
        expected = 0;
        assert_eq!(store.len(), expected);

        store.replace_all(vec![9, 8]);
        expected = 2;
        assert_eq!(store.len(), expected);

        store.extend([]);
        assert_eq!(store.len(), expected);
    }
}
