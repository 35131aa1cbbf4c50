//! Checkbox group with a derived "select all" flag.

use serde::{Deserialize, Serialize};
use shared::domain::Item;

const SEED_ITEMS: [(&str, bool); 5] = [
    ("item1", false),
    ("item2", true),
    ("item3", false),
    ("item4", false),
    ("item5", true),
];

/// Ordered checkbox items plus the "all selected" flag.
///
/// `all_selected` is recomputed on every transition and always equals the
/// conjunction of the items' `checked` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredGroup")]
pub struct CheckboxGroup {
    items: Vec<Item>,
    all_selected: bool,
}

/// Deserialization shape: only the items are read, the flag is re-derived.
#[derive(Deserialize)]
struct StoredGroup {
    items: Vec<Item>,
}

impl From<StoredGroup> for CheckboxGroup {
    fn from(value: StoredGroup) -> Self {
        Self::new(value.items)
    }
}

impl Default for CheckboxGroup {
    fn default() -> Self {
        Self::seeded()
    }
}

impl CheckboxGroup {
    pub fn new(items: Vec<Item>) -> Self {
        let all_selected = all_checked(&items);
        Self {
            items,
            all_selected,
        }
    }

    /// The fixed item set the form starts with.
    pub fn seeded() -> Self {
        Self::new(
            SEED_ITEMS
                .iter()
                .map(|(label, checked)| Item::new(*label, *checked))
                .collect(),
        )
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn all_selected(&self) -> bool {
        self.all_selected
    }

    pub fn item(&self, label: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.label == label)
    }

    /// Caption for the bulk checkbox.
    pub fn bulk_label(&self) -> &'static str {
        if self.all_selected {
            "Deselect all"
        } else {
            "Select all"
        }
    }

    /// Flips the item named `label`. Unknown labels leave the group untouched
    /// and return `false`.
    pub fn toggle_item(&mut self, label: &str) -> bool {
        let Some(index) = self.items.iter().position(|item| item.label == label) else {
            return false;
        };

        let mut items = self.items.clone();
        items[index].checked = !items[index].checked;
        self.replace(items);
        true
    }

    /// Sets every item to `value`. The flag follows `value` directly rather
    /// than negating its previous state, so repeated bulk clicks stay in sync.
    pub fn set_all_checked(&mut self, value: bool) {
        let items = self
            .items
            .iter()
            .map(|item| Item::new(item.label.clone(), value))
            .collect();
        self.replace(items);
    }

    fn replace(&mut self, items: Vec<Item>) {
        let all_selected = all_checked(&items);
        *self = Self {
            items,
            all_selected,
        };
    }
}

// An empty group counts as fully selected, matching `Iterator::all`.
fn all_checked(items: &[Item]) -> bool {
    items.iter().all(|item| item.checked)
}

#[cfg(test)]
#[path = "tests/checkbox_group_tests.rs"]
mod tests;
