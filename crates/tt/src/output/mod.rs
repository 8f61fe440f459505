//! Output formatting for listings and confirmations.

pub mod helpers;
mod ical;
mod items;

pub use ical::format_items_ical;
pub use items::{
    format_appended_item, format_created_item, format_groups_plain, format_items_json,
    format_items_plain, RowStyle,
};
