use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::internal::ValidationError;

/// Closed set of categories an item can belong to
///
/// `Category::ALL` is the single list consulted both when validating new
/// items and when zero-filling the category summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Watch,
    Bag,
    Jewelry,
    Shoes,
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Watch,
        Category::Bag,
        Category::Jewelry,
        Category::Shoes,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Watch => "Watch",
            Category::Bag => "Bag",
            Category::Jewelry => "Jewelry",
            Category::Shoes => "Shoes",
            Category::Other => "Other",
        }
    }

    /// Names of every valid category, in enumeration order
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.iter().map(Category::as_str)
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Matching is exact; "watch" is not a valid category
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidCategory(s.to_string()))
    }
}

impl TryFrom<String> for Category {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
