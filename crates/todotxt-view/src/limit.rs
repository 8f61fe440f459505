//! Row-count limiting of a rendered view.

use todotxt_model_rs::models::Item;

use crate::sort::Group;

/// Terminal lines kept free for the shell prompt in fit-to-terminal mode.
pub const RESERVED_PROMPT_LINES: usize = 2;

/// How many items a listing may show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// No truncation.
    All,
    /// At most this many items; zero shows nothing.
    Count(usize),
    /// As many whole items as fit in `rows - reserved` lines, at least one.
    FitTerminal {
        /// Terminal height, zero when unknown.
        rows: usize,
        /// Lines kept free below the listing.
        reserved: usize,
    },
}

impl Limit {
    /// Maps a signed count: zero is empty, negative is unlimited.
    pub fn from_count(count: i64) -> Self {
        match usize::try_from(count) {
            Ok(count) => Limit::Count(count),
            Err(_) => Limit::All,
        }
    }

    /// Parses a user supplied count, falling back to `default` when the
    /// value is not an integer.
    ///
    /// ```
    /// use todotxt_view_rs::limit::Limit;
    ///
    /// assert_eq!(Limit::parse_count("3", 5), Limit::Count(3));
    /// assert_eq!(Limit::parse_count("-1", 5), Limit::All);
    /// assert_eq!(Limit::parse_count("foo", 5), Limit::Count(5));
    /// ```
    pub fn parse_count(raw: &str, default: i64) -> Self {
        Self::from_count(raw.trim().parse().unwrap_or(default))
    }

    /// Fit-to-terminal mode with the default prompt reservation.
    pub fn fit_terminal(rows: usize) -> Self {
        Limit::FitTerminal {
            rows,
            reserved: RESERVED_PROMPT_LINES,
        }
    }

    /// Number of rows available, `None` when unlimited.
    fn budget(&self) -> Option<usize> {
        match *self {
            Limit::All => None,
            Limit::Count(count) => Some(count),
            Limit::FitTerminal { rows, reserved } => Some(rows.saturating_sub(reserved).max(1)),
        }
    }

    /// Returns the leading items allowed by the limit.
    pub fn apply<'a>(&self, mut items: Vec<&'a Item>) -> Vec<&'a Item> {
        if let Some(budget) = self.budget() {
            items.truncate(budget);
        }
        items
    }

    /// Truncates grouped output.
    ///
    /// Counts limit items only. In fit-to-terminal mode every labeled group
    /// header also takes a row, but at least one item is always shown.
    pub fn apply_groups<'a>(&self, groups: Vec<Group<'a>>) -> Vec<Group<'a>> {
        let Some(mut budget) = self.budget() else {
            return groups;
        };
        let headers_cost = matches!(self, Limit::FitTerminal { .. });

        let mut kept: Vec<Group<'a>> = Vec::new();
        for mut group in groups {
            let header = usize::from(headers_cost && !group.label.is_empty());
            let shown_any = kept.iter().any(|g| !g.items.is_empty());

            let room = if shown_any {
                budget.saturating_sub(header)
            } else {
                budget.saturating_sub(header).max(usize::from(budget > 0))
            };
            if room == 0 {
                break;
            }

            group.items.truncate(room);
            budget = budget.saturating_sub(header + group.items.len());
            kept.push(group);
        }
        kept
    }
}
