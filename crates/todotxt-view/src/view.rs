//! Sorted and filtered views over a list of items.

use std::fmt;

use todotxt_model_rs::models::Item;

use crate::filter::ViewFilter;
use crate::sort::{Group, Sorter};

/// The result of sorting items once and then applying each filter in turn.
///
/// The view borrows its items and keeps the derived sequence until
/// [`View::update`] is called again; it does not observe changes to the
/// backing collection by itself.
///
/// # Example
///
/// ```
/// use todotxt_model_rs::list::TodoList;
/// use todotxt_view_rs::filter::{compile, ViewFilter};
/// use todotxt_view_rs::sort::Sorter;
/// use todotxt_view_rs::view::View;
///
/// let list = TodoList::from_lines(["(B) Bar @c1", "x Done @c1", "(A) Foo @c1"]).unwrap();
/// let filters = vec![
///     ViewFilter::Expression(compile("@c1").unwrap()),
///     ViewFilter::HideCompleted,
/// ];
///
/// let view = View::new(Sorter::default(), filters, list.items());
/// assert_eq!(view.to_string(), "(A) Foo @c1\n(B) Bar @c1");
/// ```
#[derive(Debug, Clone)]
pub struct View<'a> {
    sorter: Sorter,
    filters: Vec<ViewFilter<'a>>,
    items: &'a [Item],
    viewdata: Vec<&'a Item>,
}

impl<'a> View<'a> {
    /// Creates a view and computes its contents.
    pub fn new(sorter: Sorter, filters: Vec<ViewFilter<'a>>, items: &'a [Item]) -> Self {
        let mut view = Self {
            sorter,
            filters,
            items,
            viewdata: Vec::new(),
        };
        view.update();
        view
    }

    /// Recomputes the view from scratch: one sort, then every filter in
    /// order.
    pub fn update(&mut self) {
        let sorted = self.sorter.sort(self.items);
        self.viewdata = self
            .filters
            .iter()
            .fold(sorted, |items, filter| filter.filter(items));
    }

    /// Points the view at another snapshot of items. Call
    /// [`View::update`] afterwards.
    pub fn set_items(&mut self, items: &'a [Item]) {
        self.items = items;
    }

    /// The sorted, filtered items.
    pub fn items(&self) -> &[&'a Item] {
        &self.viewdata
    }

    /// The sorted, filtered items split by the sorter's group keys.
    pub fn groups(&self) -> Vec<Group<'a>> {
        self.sorter.groups(&self.viewdata)
    }

    pub fn sorter(&self) -> &Sorter {
        &self.sorter
    }

    pub fn len(&self) -> usize {
        self.viewdata.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewdata.is_empty()
    }
}

impl fmt::Display for View<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<&str> = self.viewdata.iter().map(|item| item.source()).collect();
        f.write_str(&lines.join("\n"))
    }
}
