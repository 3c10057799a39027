use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::values::{Category, Item};

/// One row of a category norms table
///
/// An item belonging to several categories appears in several rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormRow {
    #[serde(alias = "Item")]
    pub item: Item,
    #[serde(alias = "Category")]
    pub category: Category,
}

impl NormRow {
    pub fn new(item: impl Into<Item>, category: impl Into<Category>) -> Self {
        Self {
            item: item.into(),
            category: category.into(),
        }
    }
}

/// Categories of one resolved item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySet {
    /// Item is in the norms table
    Known(BTreeSet<Category>),
    /// Item has no entry, even after fuzzy matching
    ///
    /// Shares no category with anything, including another unmatched item.
    NotInNorms,
}

impl CategorySet {
    pub fn is_known(&self) -> bool {
        matches!(self, CategorySet::Known(_))
    }

    pub fn categories(&self) -> Option<&BTreeSet<Category>> {
        match self {
            CategorySet::Known(categories) => Some(categories),
            CategorySet::NotInNorms => None,
        }
    }

    /// Returns true if both sets are known and share at least one category
    pub fn intersects(&self, other: &CategorySet) -> bool {
        match (self, other) {
            (CategorySet::Known(a), CategorySet::Known(b)) => !a.is_disjoint(b),
            _ => false,
        }
    }
}

/// Read-only category norms table
///
/// Maps canonical item labels to their categories. The canonical label list
/// keeps first-appearance order, which is the order fuzzy matching breaks ties in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryNorms {
    items: Vec<Item>,
    categories: HashMap<Item, BTreeSet<Category>>,
}

impl CategoryNorms {
    /// Build the table from (item, category) rows
    pub fn from_rows(rows: impl IntoIterator<Item = NormRow>) -> Self {
        let mut norms = Self::default();
        for row in rows {
            norms.insert(row.item, row.category);
        }
        norms
    }

    /// Build the table from `(item, category)` string pairs
    pub fn from_pairs<I, C>(pairs: impl IntoIterator<Item = (I, C)>) -> Self
    where
        I: Into<Item>,
        C: Into<Category>,
    {
        Self::from_rows(
            pairs
                .into_iter()
                .map(|(item, category)| NormRow::new(item, category)),
        )
    }

    fn insert(&mut self, item: Item, category: Category) {
        match self.categories.get_mut(&item) {
            Some(categories) => {
                categories.insert(category);
            }
            None => {
                self.items.push(item.clone());
                self.categories.insert(item, BTreeSet::from([category]));
            }
        }
    }

    /// Canonical item labels, in first-appearance order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn contains(&self, item: &str) -> bool {
        self.categories.contains_key(item)
    }

    /// Exact lookup of a canonical label
    pub fn categories(&self, item: &str) -> CategorySet {
        match self.categories.get(item) {
            Some(categories) => CategorySet::Known(categories.clone()),
            None => CategorySet::NotInNorms,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
