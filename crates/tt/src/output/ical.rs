//! iCalendar (RFC 5545) output.
//!
//! Every item becomes a `VTODO`. The UID is the item's `ical:` tag when it
//! has one, otherwise its text id, so it stays stable while the line is
//! unchanged.

use chrono::NaiveDate;
use todotxt_model_rs::ids::text_ids;
use todotxt_model_rs::list::TodoList;
use todotxt_model_rs::models::Item;

const PRODID: &str = "-//tt//todo.txt//EN";

/// Content lines longer than this many octets are folded.
const FOLD_WIDTH: usize = 75;

/// Formats items as one VCALENDAR containing a VTODO per item.
pub fn format_items_ical(list: &TodoList, items: &[&Item]) -> String {
    let uids = text_ids(list.items());

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
    ];
    for item in items {
        let fallback = list
            .number_of(item)
            .and_then(|number| uids.get(number - 1))
            .map(String::as_str)
            .unwrap_or_default();
        let uid = item.tag_value("ical").unwrap_or(fallback);
        lines.extend(vtodo(item, uid));
    }
    lines.push("END:VCALENDAR".to_string());

    lines
        .iter()
        .map(|line| fold(line))
        .collect::<Vec<_>>()
        .join("\r\n")
}

fn vtodo(item: &Item, uid: &str) -> Vec<String> {
    let mut lines = vec!["BEGIN:VTODO".to_string(), format!("UID:{}", escape(uid))];
    lines.push(format!("SUMMARY:{}", escape(&summary(item))));

    if let Some(priority) = item.priority() {
        lines.push(format!("PRIORITY:{}", ical_priority(priority.letter())));
    }
    let status = if item.is_completed() {
        "COMPLETED"
    } else {
        "NEEDS-ACTION"
    };
    lines.push(format!("STATUS:{status}"));

    if let Some(created) = item.creation_date() {
        lines.push(format!("CREATED:{}", date_time(created)));
    }
    if let Some(start) = item.start_date() {
        lines.push(format!("DTSTART;VALUE=DATE:{}", date(start)));
    }
    if let Some(due) = item.due_date() {
        lines.push(format!("DUE;VALUE=DATE:{}", date(due)));
    }
    if let Some(completed) = item.completion_date() {
        lines.push(format!("COMPLETED:{}", date_time(completed)));
    }

    let categories: Vec<String> = item
        .contexts()
        .iter()
        .chain(item.projects())
        .map(|c| escape(c))
        .collect();
    if !categories.is_empty() {
        lines.push(format!("CATEGORIES:{}", categories.join(",")));
    }

    lines.push("END:VTODO".to_string());
    lines
}

/// The item text without its `key:value` tags.
fn summary(item: &Item) -> String {
    item.text()
        .split_whitespace()
        .filter(|word| {
            !word.split_once(':').is_some_and(|(key, value)| {
                item.tags().iter().any(|t| t.key == key && t.value == value)
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps `A` to 1 (highest) through `I` and beyond to 9 (lowest).
fn ical_priority(letter: char) -> u8 {
    let rank = (letter as u8).saturating_sub(b'A') + 1;
    rank.min(9)
}

fn date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

fn date_time(date: NaiveDate) -> String {
    date.format("%Y%m%dT000000").to_string()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | ';' | ',' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Folds a content line into chunks of at most [`FOLD_WIDTH`] octets,
/// continuation lines starting with a space.
fn fold(line: &str) -> String {
    if line.len() <= FOLD_WIDTH {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / FOLD_WIDTH * 3);
    let mut width = 0;
    let mut limit = FOLD_WIDTH;
    for c in line.chars() {
        if width + c.len_utf8() > limit {
            folded.push_str("\r\n ");
            width = 0;
            limit = FOLD_WIDTH - 1;
        }
        folded.push(c);
        width += c.len_utf8();
    }
    folded
}
