//! Main-list display order.
//!
//! Presets and groups share one user-sortable list. Its order is saved as a
//! list of keys, `preset_<id>` for a preset and `group_<id>` for a group.

use std::collections::HashMap;

pub const PRESET_KEY_PREFIX: &str = "preset_";
pub const GROUP_KEY_PREFIX: &str = "group_";

/// An entry of the main list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListEntry {
    Preset(String),
    Group(String),
}

impl ListEntry {
    /// The saved key for this entry.
    pub fn key(&self) -> String {
        match self {
            ListEntry::Preset(id) => preset_key(id),
            ListEntry::Group(id) => group_key(id),
        }
    }

    /// Parses a saved key. Keys with neither prefix yield `None`.
    pub fn parse(key: &str) -> Option<Self> {
        if let Some(id) = key.strip_prefix(PRESET_KEY_PREFIX) {
            Some(ListEntry::Preset(id.to_string()))
        } else {
            key.strip_prefix(GROUP_KEY_PREFIX)
                .map(|id| ListEntry::Group(id.to_string()))
        }
    }
}

pub fn preset_key(id: &str) -> String {
    format!("{PRESET_KEY_PREFIX}{id}")
}

pub fn group_key(id: &str) -> String {
    format!("{GROUP_KEY_PREFIX}{id}")
}

/// Sorts `items` by the position of their key in `saved_order`.
///
/// Items whose key is in the saved order come first, in that order. The
/// rest follow in their original relative order. Saved keys that match no
/// item are ignored.
pub fn sort_by_saved_order<T, F>(items: Vec<T>, saved_order: &[String], key_of: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    if saved_order.is_empty() {
        return items;
    }

    let rank: HashMap<&str, usize> = saved_order
        .iter()
        .enumerate()
        .rev()
        .map(|(i, key)| (key.as_str(), i))
        .collect();

    let mut keyed: Vec<(usize, usize, T)> = items
        .into_iter()
        .enumerate()
        .map(|(original, item)| {
            let position = rank
                .get(key_of(&item).as_str())
                .copied()
                .unwrap_or(usize::MAX);
            (position, original, item)
        })
        .collect();

    keyed.sort_by_key(|(position, original, _)| (*position, *original));
    keyed.into_iter().map(|(_, _, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_round_trip() {
        let entry = ListEntry::Preset("p1".to_string());
        assert_eq!(entry.key(), "preset_p1");
        assert_eq!(ListEntry::parse("preset_p1"), Some(entry));
        assert_eq!(
            ListEntry::parse("group_g1"),
            Some(ListEntry::Group("g1".to_string()))
        );
        assert_eq!(ListEntry::parse("chat_x"), None);
    }

    #[test]
    fn test_sort_puts_unknown_items_last() {
        let items = ids(&["a", "b", "c", "d"]);
        let saved = vec![preset_key("c"), preset_key("a"), preset_key("zzz")];

        let sorted = sort_by_saved_order(items, &saved, |id| preset_key(id));
        assert_eq!(sorted, ids(&["c", "a", "b", "d"]));
    }

    #[test]
    fn test_empty_order_keeps_items() {
        let items = ids(&["b", "a"]);
        let sorted = sort_by_saved_order(items, &[], |id| preset_key(id));
        assert_eq!(sorted, ids(&["b", "a"]));
    }

    #[test]
    fn test_duplicate_saved_key_uses_first_position() {
        let items = ids(&["a", "b"]);
        let saved = vec![preset_key("b"), preset_key("a"), preset_key("b")];
        let sorted = sort_by_saved_order(items, &saved, |id| preset_key(id));
        assert_eq!(sorted, ids(&["b", "a"]));
    }

    #[test]
    fn test_group_keys_do_not_match_presets() {
        let items = ids(&["x", "y"]);
        let saved = vec![group_key("y")];
        let sorted = sort_by_saved_order(items, &saved, |id| preset_key(id));
        assert_eq!(sorted, ids(&["x", "y"]));
    }
}
