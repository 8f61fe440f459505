//! Filters applied by a [`View`](crate::view::View).
//!
//! A [`ViewFilter`] is either a compiled expression or one of the structural
//! rules used by the default listing.

use std::collections::HashSet;

use chrono::NaiveDate;
use todotxt_model_rs::ids::Identifiers;
use todotxt_model_rs::list::TodoList;
use todotxt_model_rs::models::Item;

use super::ast::Filter;
use super::evaluator::evaluate;

/// One stage of a view's filter chain.
#[derive(Debug, Clone)]
pub enum ViewFilter<'a> {
    /// Keeps items matching a compiled expression.
    Expression(Filter),

    /// Drops completed items.
    HideCompleted,

    /// Drops items tagged `h:1`.
    HideHidden,

    /// Drops items whose `id:` is referenced by an open item's `p:` tag.
    HideBlocked {
        /// Dependency ids that still have open children.
        blocked: HashSet<String>,
    },

    /// Drops items whose `t:` start date lies after `today`.
    HideFutureStart {
        /// The reference date.
        today: NaiveDate,
    },

    /// Keeps items whose list number is in the set.
    Numbers {
        /// The list the numbers refer to.
        list: &'a TodoList,
        /// Accepted 1-based item numbers.
        numbers: HashSet<usize>,
    },
}

impl<'a> ViewFilter<'a> {
    /// Builds the blocked-item rule from the current state of a list.
    pub fn hide_blocked(list: &TodoList) -> Self {
        ViewFilter::HideBlocked {
            blocked: list.blocked_ids().into_iter().map(str::to_string).collect(),
        }
    }

    /// Builds an id-list rule from a comma separated list of line numbers or
    /// text ids, such as `1,foo,3` or `3,t5c`.
    ///
    /// Entries that name no item are ignored.
    pub fn identifiers(list: &'a TodoList, raw: &str, ids: &Identifiers) -> Self {
        let numbers = raw
            .split(',')
            .filter_map(|part| ids.resolve(part))
            .collect();
        ViewFilter::Numbers { list, numbers }
    }

    /// The structural rules of the default listing, in application order.
    pub fn relevance(list: &TodoList, today: NaiveDate) -> Vec<Self> {
        vec![
            ViewFilter::HideCompleted,
            ViewFilter::HideHidden,
            ViewFilter::HideFutureStart { today },
            ViewFilter::hide_blocked(list),
        ]
    }

    /// Returns true if the item survives this stage.
    pub fn keep(&self, item: &Item) -> bool {
        match self {
            ViewFilter::Expression(filter) => evaluate(filter, item),
            ViewFilter::HideCompleted => !item.is_completed(),
            ViewFilter::HideHidden => !item.is_hidden(),
            ViewFilter::HideBlocked { blocked } => {
                !item.tag_values("id").any(|id| blocked.contains(id))
            }
            ViewFilter::HideFutureStart { today } => {
                !item.start_date().is_some_and(|start| start > *today)
            }
            ViewFilter::Numbers { list, numbers } => list
                .number_of(item)
                .is_some_and(|number| numbers.contains(&number)),
        }
    }

    /// Returns the retained items, order preserved.
    pub fn filter<'b>(&self, items: Vec<&'b Item>) -> Vec<&'b Item> {
        items.into_iter().filter(|item| self.keep(item)).collect()
    }
}

impl From<Filter> for ViewFilter<'_> {
    fn from(filter: Filter) -> Self {
        ViewFilter::Expression(filter)
    }
}
