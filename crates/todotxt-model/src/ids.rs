//! Item identifiers.
//!
//! Items are addressed either by their line number or by a short text id
//! hashed from the item's line. Text ids stay the same while the line is
//! unchanged, even when other lines are added or removed around it.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, TodoError};
use crate::list::TodoList;
use crate::models::Item;

/// Shortest text id.
pub const MIN_TEXT_ID_WIDTH: usize = 3;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// How listed items are labelled and looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentifierStyle {
    /// The 1-based line number.
    #[default]
    #[serde(rename = "linenumber", alias = "number")]
    LineNumber,
    /// A short hash of the item line.
    Text,
}

/// The labels of every item of a list, plus the reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifiers {
    style: IdentifierStyle,
    labels: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Identifiers {
    /// Labels the items of a list in the given style.
    pub fn new(list: &TodoList, style: IdentifierStyle) -> Self {
        let labels = match style {
            IdentifierStyle::LineNumber => (1..=list.len()).map(|n| n.to_string()).collect(),
            IdentifierStyle::Text => text_ids(list.items()),
        };
        let lookup = match style {
            IdentifierStyle::LineNumber => HashMap::new(),
            IdentifierStyle::Text => labels
                .iter()
                .enumerate()
                .map(|(idx, label)| (label.clone(), idx + 1))
                .collect(),
        };

        Self {
            style,
            labels,
            lookup,
        }
    }

    /// Returns the style the labels were built with.
    pub fn style(&self) -> IdentifierStyle {
        self.style
    }

    /// Returns the label of the item with the given 1-based number.
    pub fn label(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
    }

    /// Resolves a user-supplied identifier to an item number.
    ///
    /// Text ids always start with a letter, so a plain number is still taken
    /// as a line number when text ids are in use.
    pub fn resolve(&self, raw: &str) -> Option<usize> {
        let raw = raw.trim();
        if let Some(number) = self.lookup.get(&raw.to_lowercase()) {
            return Some(*number);
        }
        raw.parse::<usize>()
            .ok()
            .filter(|n| *n >= 1 && *n <= self.labels.len())
    }

    /// Like [`Identifiers::resolve`] but fails with `InvalidNumber`.
    pub fn resolve_or_err(&self, raw: &str) -> Result<usize> {
        self.resolve(raw).ok_or_else(|| TodoError::invalid_number(raw))
    }
}

/// Returns the text id width for a list of `count` items.
///
/// The id space is kept at least sixteen times larger than the list so
/// collisions stay rare.
pub fn text_id_width(count: usize) -> usize {
    let wanted = count.saturating_mul(16);
    let mut width = MIN_TEXT_ID_WIDTH;
    let mut space = LETTERS.len() * ALPHABET.len().pow((MIN_TEXT_ID_WIDTH - 1) as u32);
    while space < wanted {
        width += 1;
        space = space.saturating_mul(ALPHABET.len());
    }
    width
}

/// Computes the text ids of items, in order.
///
/// Colliding lines, including duplicates, are rehashed with an increasing
/// salt, so earlier lines keep their first choice.
pub fn text_ids(items: &[Item]) -> Vec<String> {
    let width = text_id_width(items.len());
    let mut taken = HashSet::with_capacity(items.len());

    items
        .iter()
        .map(|item| {
            let mut salt = 0u32;
            loop {
                let id = hash_line(item.source(), salt, width);
                if taken.insert(id.clone()) {
                    break id;
                }
                salt += 1;
            }
        })
        .collect()
}

fn hash_line(line: &str, salt: u32, width: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(line.as_bytes());
    if salt > 0 {
        hasher.update(salt.to_le_bytes());
    }
    let digest = hasher.finalize();

    let mut value = digest
        .iter()
        .take(16)
        .fold(0u128, |acc, byte| (acc << 8) | u128::from(*byte));

    let mut id = String::with_capacity(width);
    id.push(char::from(LETTERS[(value % LETTERS.len() as u128) as usize]));
    value /= LETTERS.len() as u128;
    for _ in 1..width {
        id.push(char::from(ALPHABET[(value % ALPHABET.len() as u128) as usize]));
        value /= ALPHABET.len() as u128;
    }
    id
}
