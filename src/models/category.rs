//! Expense categories
//!
//! The category set is closed. Rows coming from storage may still carry a
//! label outside it; those are kept as [`ExpenseCategory::Unrecognized`] so
//! the aggregation code can route them explicitly instead of comparing strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Label used for income rows wherever a category column is shown
pub const INCOME_LABEL: &str = "Income";

/// One of the fixed expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryTag {
    Bills,
    Food,
    Entertainment,
    Transportation,
    #[serde(rename = "Personal Spending")]
    PersonalSpending,
    Savings,
    Healthcare,
}

impl CategoryTag {
    /// All categories in declaration order
    pub const ALL: [CategoryTag; 7] = [
        CategoryTag::Bills,
        CategoryTag::Food,
        CategoryTag::Entertainment,
        CategoryTag::Transportation,
        CategoryTag::PersonalSpending,
        CategoryTag::Savings,
        CategoryTag::Healthcare,
    ];

    /// Column order of the monthly export file
    pub const EXPORT_ORDER: [CategoryTag; 7] = [
        CategoryTag::Bills,
        CategoryTag::Food,
        CategoryTag::Entertainment,
        CategoryTag::Transportation,
        CategoryTag::PersonalSpending,
        CategoryTag::Healthcare,
        CategoryTag::Savings,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Bills => "Bills",
            Self::Food => "Food",
            Self::Entertainment => "Entertainment",
            Self::Transportation => "Transportation",
            Self::PersonalSpending => "Personal Spending",
            Self::Savings => "Savings",
            Self::Healthcare => "Healthcare",
        }
    }

    /// Position in [`CategoryTag::ALL`]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Exact label match, as stored by the app
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.label() == label)
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryTag {
    type Err = UnknownCategory;

    /// Lenient parse for user input: case-insensitive, and spaces, dashes and
    /// underscores are interchangeable ("personal-spending" works).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|tag| normalize(tag.label()) == wanted)
            .ok_or_else(|| UnknownCategory(s.trim().to_string()))
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A label that is not one of the fixed categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<_> = CategoryTag::ALL.iter().map(|t| t.label()).collect();
        write!(
            f,
            "Unknown category '{}' (expected one of: {})",
            self.0,
            labels.join(", ")
        )
    }
}

impl std::error::Error for UnknownCategory {}

/// Category carried by a stored expense row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseCategory {
    Known(CategoryTag),
    Unrecognized(String),
}

impl ExpenseCategory {
    pub fn tag(&self) -> Option<CategoryTag> {
        match self {
            Self::Known(tag) => Some(*tag),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Known(tag) => tag.label(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<CategoryTag> for ExpenseCategory {
    fn from(tag: CategoryTag) -> Self {
        Self::Known(tag)
    }
}

impl From<String> for ExpenseCategory {
    fn from(raw: String) -> Self {
        match CategoryTag::from_label(&raw) {
            Some(tag) => Self::Known(tag),
            None => Self::Unrecognized(raw),
        }
    }
}

impl From<ExpenseCategory> for String {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Known(tag) => tag.label().to_string(),
            ExpenseCategory::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip() {
        for tag in CategoryTag::ALL {
            assert_eq!(CategoryTag::from_label(tag.label()), Some(tag));
        }
        assert_eq!(CategoryTag::PersonalSpending.label(), "Personal Spending");
    }

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!(
            "personal-spending".parse::<CategoryTag>().unwrap(),
            CategoryTag::PersonalSpending
        );
        assert_eq!(" FOOD ".parse::<CategoryTag>().unwrap(), CategoryTag::Food);
        assert!("Groceries".parse::<CategoryTag>().is_err());
    }

    #[test]
    fn test_from_label_is_exact() {
        assert_eq!(CategoryTag::from_label("food"), None);
        assert_eq!(CategoryTag::from_label("Food"), Some(CategoryTag::Food));
    }

    #[test]
    fn test_index_matches_all() {
        for (i, tag) in CategoryTag::ALL.iter().enumerate() {
            assert_eq!(tag.index(), i);
        }
    }

    #[test]
    fn test_export_order_covers_every_tag() {
        let mut sorted = CategoryTag::EXPORT_ORDER;
        sorted.sort();
        assert_eq!(sorted, CategoryTag::ALL);
    }

    #[test]
    fn test_expense_category_serde() {
        let known: ExpenseCategory = serde_json::from_str("\"Personal Spending\"").unwrap();
        assert_eq!(known, ExpenseCategory::Known(CategoryTag::PersonalSpending));

        let unknown: ExpenseCategory = serde_json::from_str("\"Pets\"").unwrap();
        assert_eq!(unknown, ExpenseCategory::Unrecognized("Pets".into()));
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"Pets\"");
    }
}
