use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::types::internal::category::Category;

/// Item counts per category, derived on demand and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    /// Every enumerated category, in enumeration order
    pub categories: BTreeMap<Category, u64>,
    pub total: u64,
}

impl CategorySummary {
    /// Zero-fill raw per-category counts against `Category::ALL`
    ///
    /// `total` is the sum of every raw count, including rows whose category
    /// is not (or no longer) in the enumeration.
    pub fn from_counts(raw: &HashMap<String, u64>) -> Self {
        let total = raw.values().sum();

        let categories = Category::ALL
            .into_iter()
            .map(|category| {
                let count = raw.get(category.as_str()).copied().unwrap_or(0);
                (category, count)
            })
            .collect();

        Self { categories, total }
    }

    pub fn count(&self, category: Category) -> u64 {
        self.categories.get(&category).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_counts_fill_every_category_with_zero() {
        let summary = CategorySummary::from_counts(&HashMap::new());

        assert_eq!(summary.total, 0);
        assert_eq!(summary.categories.len(), Category::ALL.len());
        assert!(summary.categories.values().all(|count| *count == 0));
    }

    #[test]
    fn test_partial_counts_are_zero_filled() {
        let raw = HashMap::from([("Watch".to_string(), 2), ("Bag".to_string(), 1)]);
        let summary = CategorySummary::from_counts(&raw);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(Category::Watch), 2);
        assert_eq!(summary.count(Category::Bag), 1);
        assert_eq!(summary.count(Category::Jewelry), 0);
        assert_eq!(summary.count(Category::Shoes), 0);
        assert_eq!(summary.count(Category::Other), 0);
    }

    #[test]
    fn test_unknown_categories_count_towards_total_only() {
        let raw = HashMap::from([("Watch".to_string(), 1), ("Legacy".to_string(), 4)]);
        let summary = CategorySummary::from_counts(&raw);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.categories.len(), Category::ALL.len());
        assert_eq!(summary.count(Category::Watch), 1);
    }

    #[test]
    fn test_serialises_with_category_names_as_keys() {
        let raw = HashMap::from([("Shoes".to_string(), 3)]);
        let json = serde_json::to_value(CategorySummary::from_counts(&raw)).unwrap();

        assert_eq!(json["categories"]["Shoes"], 3);
        assert_eq!(json["categories"]["Watch"], 0);
        assert_eq!(json["total"], 3);
    }
}
