//! The in-memory todo list.
//!
//! Items keep their file order. The 1-based position of an item is its
//! number, which is what listings show and what commands accept.

use std::collections::HashSet;

use crate::error::{Result, TodoError};
use crate::models::Item;

/// An ordered collection of todo items.
///
/// The list tracks whether it was changed since it was loaded so callers
/// know whether it needs to be written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<Item>,
    dirty: bool,
}

impl TodoList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from lines, skipping blank ones.
    ///
    /// The resulting list is not dirty.
    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = lines
            .into_iter()
            .filter(|line| !line.as_ref().trim().is_empty())
            .map(|line| Item::parse(line.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            items,
            dirty: false,
        })
    }

    /// Returns all items in file order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if the list was changed since it was loaded.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the list as saved.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Returns the item with the given 1-based number.
    pub fn item(&self, number: usize) -> Option<&Item> {
        number.checked_sub(1).and_then(|idx| self.items.get(idx))
    }

    /// Returns the 1-based number of an item borrowed from this list.
    ///
    /// Identity is by address, so an equal item from another list is not
    /// found. The lookup is constant time: the number follows from the
    /// item's offset into the backing storage.
    pub fn number_of(&self, item: &Item) -> Option<usize> {
        let size = std::mem::size_of::<Item>();
        let range = self.items.as_ptr_range();
        let ptr: *const Item = item;
        if size == 0 || !range.contains(&ptr) {
            return None;
        }

        let offset = ptr as usize - range.start as usize;
        (offset % size == 0).then(|| offset / size + 1)
    }

    /// Parses and appends a new item, returning its number.
    pub fn add(&mut self, line: &str) -> Result<usize> {
        let item = Item::parse(line)?;
        self.items.push(item);
        self.dirty = true;
        Ok(self.items.len())
    }

    /// Appends text to an existing item.
    ///
    /// Empty text leaves the item untouched and the list clean.
    pub fn append(&mut self, number: usize, text: &str) -> Result<&Item> {
        let idx = number
            .checked_sub(1)
            .filter(|idx| *idx < self.items.len())
            .ok_or_else(|| TodoError::invalid_number(number.to_string()))?;

        if !text.trim().is_empty() {
            self.items[idx].append(text)?;
            self.dirty = true;
        }
        Ok(&self.items[idx])
    }

    /// Returns the dependency ids (`id:` values) that still have incomplete
    /// children, i.e. some open item tagged `p:<id>`.
    pub fn blocked_ids(&self) -> HashSet<&str> {
        self.items
            .iter()
            .filter(|item| !item.is_completed())
            .flat_map(|item| item.tag_values("p"))
            .collect()
    }

    /// Serializes the list back to lines, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(Item::source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TodoList {
        TodoList::from_lines([
            "(C) Foo @Context2",
            "",
            "(D) Bar @Context1 +Project2 p:1",
            "(C) Baz @Context1 +Project1 key:value id:1",
            "x 2014-12-12 Done p:2",
        ])
        .unwrap()
    }

    #[test]
    fn test_from_lines_skips_blank_lines() {
        let list = sample();
        assert_eq!(list.len(), 4);
        assert!(!list.is_dirty());
        assert_eq!(list.item(2).unwrap().source(), "(D) Bar @Context1 +Project2 p:1");
    }

    #[test]
    fn test_item_number_bounds() {
        let list = sample();
        assert!(list.item(0).is_none());
        assert!(list.item(5).is_none());
        assert!(list.item(4).is_some());
    }

    #[test]
    fn test_number_of_uses_identity() {
        let list = sample();
        let third = &list.items()[2];
        assert_eq!(list.number_of(third), Some(3));

        let copy = third.clone();
        assert_eq!(list.number_of(&copy), None);
    }

    #[test]
    fn test_number_of_every_item_in_large_list() {
        let lines: Vec<String> = (1..=5000).map(|n| format!("task {n}")).collect();
        let list = TodoList::from_lines(&lines).unwrap();

        for (idx, item) in list.items().iter().enumerate().rev() {
            assert_eq!(list.number_of(item), Some(idx + 1));
        }

        let other = TodoList::from_lines(&lines).unwrap();
        assert_eq!(list.number_of(&other.items()[0]), None);
        assert_eq!(TodoList::new().number_of(&other.items()[0]), None);
    }

    #[test]
    fn test_add_marks_dirty() {
        let mut list = TodoList::new();
        assert_eq!(list.add("Foo").unwrap(), 1);
        assert!(list.is_dirty());
        assert_eq!(list.add("  "), Err(TodoError::EmptyText));
    }

    #[test]
    fn test_append() {
        let mut list = TodoList::from_lines(["Foo"]).unwrap();
        let item = list.append(1, "Bar").unwrap();
        assert_eq!(item.source(), "Foo Bar");
        assert!(list.is_dirty());
    }

    #[test]
    fn test_append_empty_text_keeps_list_clean() {
        let mut list = TodoList::from_lines(["Foo"]).unwrap();
        list.append(1, "").unwrap();
        assert!(!list.is_dirty());
        assert_eq!(list.item(1).unwrap().source(), "Foo");
    }

    #[test]
    fn test_append_invalid_number() {
        let mut list = TodoList::from_lines(["Foo"]).unwrap();
        let err = list.append(2, "Bar").unwrap_err();
        assert_eq!(err.to_string(), "Invalid todo number given.");
        assert!(list.append(0, "Bar").is_err());
    }

    #[test]
    fn test_blocked_ids_ignore_completed_children() {
        let list = sample();
        let blocked = list.blocked_ids();
        assert!(blocked.contains("1"));
        assert!(!blocked.contains("2"));
    }
}
