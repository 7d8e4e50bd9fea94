//! Distinct, ordered department set

use crate::extractor::CategoryExtractor;
use deptsched_domain::{Category, Record};
use std::collections::BTreeSet;

/// Deduplicated categories across a record collection, sorted ordinally
///
/// The null category (records without a department value) is a member unless
/// excluded, and sorts first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    /// Build the set from records
    pub fn build(records: &[Record], extractor: &CategoryExtractor, exclude_nulls: bool) -> Self {
        let distinct: BTreeSet<Category> = records
            .iter()
            .map(|record| Category::from(extractor.extract(record)))
            .filter(|category| !(exclude_nulls && category.is_null()))
            .collect();

        Self {
            categories: distinct.into_iter().collect(),
        }
    }

    /// Categories in order
    pub fn as_slice(&self) -> &[Category] {
        &self.categories
    }

    /// Iterate in order
    pub fn iter(&self) -> std::slice::Iter<'_, Category> {
        self.categories.iter()
    }

    /// Number of distinct categories
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Take the ordered categories
    pub fn into_vec(self) -> Vec<Category> {
        self.categories
    }
}

impl<'a> IntoIterator for &'a CategorySet {
    type Item = &'a Category;
    type IntoIter = std::slice::Iter<'a, Category>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
