use std::collections::{BTreeSet, HashSet};

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Read-only view of the externally owned set of selected keys.
pub trait FilterSet {
    /// Whether any filter is active at all.
    fn has_filter(&self) -> bool;
    fn contains_key(&self, key: &str) -> bool;
}

impl FilterSet for IndexSet<String> {
    fn has_filter(&self) -> bool {
        !self.is_empty()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl FilterSet for HashSet<String> {
    fn has_filter(&self) -> bool {
        !self.is_empty()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

impl FilterSet for BTreeSet<String> {
    fn has_filter(&self) -> bool {
        !self.is_empty()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Filter set with nothing selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFilter;

impl FilterSet for NoFilter {
    fn has_filter(&self) -> bool {
        false
    }

    fn contains_key(&self, _key: &str) -> bool {
        false
    }
}

/// Highlight class of a rendered row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RowSelection {
    /// No filter is active; the row carries neither class.
    #[default]
    Neutral,
    Selected,
    Deselected,
}

impl RowSelection {
    #[must_use]
    pub const fn is_selected(self) -> bool {
        matches!(self, Self::Selected)
    }

    #[must_use]
    pub const fn class_name(self) -> Option<&'static str> {
        match self {
            Self::Neutral => None,
            Self::Selected => Some("selected"),
            Self::Deselected => Some("deselected"),
        }
    }
}

#[must_use]
pub fn is_selected(key: &str, filters: &dyn FilterSet) -> bool {
    filters.contains_key(key)
}

#[must_use]
pub fn classify(key: &str, filters: &dyn FilterSet) -> RowSelection {
    if !filters.has_filter() {
        RowSelection::Neutral
    } else if is_selected(key, filters) {
        RowSelection::Selected
    } else {
        RowSelection::Deselected
    }
}
