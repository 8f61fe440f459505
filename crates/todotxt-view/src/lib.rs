//! Query language, sorting and views over todo.txt items.
//!
//! The pipeline is: items → [`Sorter`](sort::Sorter) → each
//! [`ViewFilter`](filter::ViewFilter) in order → optional
//! [`Limit`](limit::Limit) → rendered output. [`View`](view::View) performs
//! the first two steps; the caller applies the limit when rendering.
//!
//! ```
//! use todotxt_model_rs::list::TodoList;
//! use todotxt_view_rs::filter::{FilterParser, ViewFilter};
//! use todotxt_view_rs::limit::Limit;
//! use todotxt_view_rs::sort::Sorter;
//! use todotxt_view_rs::view::View;
//!
//! let list = TodoList::from_lines([
//!     "(A) Foo @c1",
//!     "(B) Bar @c1",
//!     "x Done @c1",
//! ])
//! .unwrap();
//!
//! let mut filters = vec![ViewFilter::HideCompleted];
//! if let Some(query) = FilterParser::parse_args(&["@c1"]).unwrap() {
//!     filters.push(ViewFilter::Expression(query));
//! }
//!
//! let view = View::new(Sorter::default(), filters, list.items());
//! let shown = Limit::Count(1).apply(view.items().to_vec());
//! assert_eq!(shown[0].source(), "(A) Foo @c1");
//! ```

pub mod filter;
pub mod limit;
pub mod sort;
pub mod store;
pub mod view;
