//! Item output formatting.

use serde::Serialize;
use todotxt_model_rs::ids::{IdentifierStyle, Identifiers};
use todotxt_model_rs::list::TodoList;
use todotxt_model_rs::models::Item;
use todotxt_view_rs::sort::Group;

use super::helpers::{colorize, format_header, format_row, DEFAULT_LIST_FORMAT};

/// JSON output structure for a listed item.
#[derive(Serialize)]
pub struct ItemOutput<'a> {
    pub id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<&'a str>,
    #[serde(flatten)]
    pub item: &'a Item,
}

/// How plain rows are laid out.
#[derive(Debug, Clone, Copy)]
pub struct RowStyle<'a> {
    /// Row template, see [`format_row`].
    pub format: &'a str,
    /// Tag keys removed from the text.
    pub hide_tags: &'a [String],
    pub use_colors: bool,
}

impl Default for RowStyle<'_> {
    fn default() -> Self {
        Self {
            format: DEFAULT_LIST_FORMAT,
            hide_tags: &[],
            use_colors: false,
        }
    }
}

fn label<'a>(list: &TodoList, ids: &'a Identifiers, item: &Item) -> &'a str {
    list.number_of(item)
        .and_then(|number| ids.label(number))
        .unwrap_or_default()
}

/// Formats items as plain rows, one per line.
pub fn format_items_plain(
    list: &TodoList,
    ids: &Identifiers,
    items: &[&Item],
    style: RowStyle<'_>,
) -> String {
    items
        .iter()
        .map(|item| {
            let text = item.display_text(style.hide_tags);
            let row = format_row(style.format, label(list, ids, item), &text);
            colorize(&row, item, style.use_colors)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Formats groups as a header line followed by plain rows. Groups without a
/// label have no header.
pub fn format_groups_plain(
    list: &TodoList,
    ids: &Identifiers,
    groups: &[Group<'_>],
    style: RowStyle<'_>,
) -> String {
    let mut lines = Vec::new();
    for group in groups {
        if !group.label.is_empty() {
            lines.push(format_header(&group.label, style.use_colors));
        }
        let rows = format_items_plain(list, ids, &group.items, style);
        if !rows.is_empty() {
            lines.push(rows);
        }
    }
    lines.join("\n")
}

/// Formats items as a JSON array.
///
/// `id` is always the line number; `uid` carries the text id when text ids
/// are in use.
pub fn format_items_json(
    list: &TodoList,
    ids: &Identifiers,
    items: &[&Item],
) -> Result<String, serde_json::Error> {
    let output: Vec<ItemOutput> = items
        .iter()
        .map(|item| ItemOutput {
            id: list.number_of(item).unwrap_or_default(),
            uid: match ids.style() {
                IdentifierStyle::Text => Some(label(list, ids, item)),
                IdentifierStyle::LineNumber => None,
            },
            item,
        })
        .collect();
    serde_json::to_string_pretty(&output)
}

/// Formats the confirmation for a newly added item.
pub fn format_created_item(label: &str, item: &Item, use_colors: bool) -> String {
    colorize(
        &format_row(DEFAULT_LIST_FORMAT, label, item.source()),
        item,
        use_colors,
    )
}

/// Formats the confirmation for an item that was appended to.
pub fn format_appended_item(label: &str, item: &Item, use_colors: bool) -> String {
    format_created_item(label, item, use_colors)
}
