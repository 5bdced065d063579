//! Keyword categorizer mapping free-text transaction descriptions to a
//! spending Category.
//!
//! Matching is a lower-cased substring test against a prioritized table.
//! The first category in [`KEYWORD_TABLE`] with a matching keyword wins, so
//! "grocery shop" is Food & Dining even though "shop" is a Shopping keyword.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spending categories, in classifier priority order.
///
/// The derived `Ord` follows declaration order, which keeps category maps
/// and tie-breaks stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    #[serde(rename = "Transportation")]
    Transportation,
    #[serde(rename = "Entertainment")]
    Entertainment,
    #[serde(rename = "Bills & Utilities")]
    BillsAndUtilities,
    #[serde(rename = "Shopping")]
    Shopping,
    #[serde(rename = "Healthcare")]
    Healthcare,
    #[serde(rename = "Other")]
    Other,
}

impl Category {
    /// Every category, in priority order. `Other` is always last.
    pub const ALL: [Category; 7] = [
        Category::FoodAndDining,
        Category::Transportation,
        Category::Entertainment,
        Category::BillsAndUtilities,
        Category::Shopping,
        Category::Healthcare,
        Category::Other,
    ];

    /// Display name used on the wire and in insights
    pub fn name(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::BillsAndUtilities => "Bills & Utilities",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }

    /// Keywords tested for this category (empty for `Other`)
    pub fn keywords(&self) -> &'static [&'static str] {
        KEYWORD_TABLE
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Prioritized keyword table. Order is significant: it decides which
/// category wins when a description matches keywords from several rows.
pub const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::FoodAndDining,
        &[
            "restaurant", "food", "grocery", "cafe", "coffee", "dining", "starbucks", "mcdonald",
            "pizza", "sushi",
        ],
    ),
    (
        Category::Transportation,
        &[
            "gas", "uber", "lyft", "transit", "parking", "taxi", "fuel", "shell", "chevron",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "movie", "netflix", "spotify", "game", "entertainment", "hulu", "disney", "xbox",
            "playstation",
        ],
    ),
    (
        Category::BillsAndUtilities,
        &[
            "electric", "water", "internet", "phone", "utility", "rent", "mortgage", "insurance",
            "verizon", "att",
        ],
    ),
    (
        Category::Shopping,
        &[
            "amazon", "shop", "mall", "target", "walmart", "ebay", "clothing", "shoes",
        ],
    ),
    (
        Category::Healthcare,
        &[
            "doctor", "hospital", "pharmacy", "medical", "health", "cvs", "walgreens", "dentist",
        ],
    ),
];

/// Classify a transaction description. Total: unmatched text is `Other`.
pub fn classify(description: &str) -> Category {
    let desc = description.to_lowercase();

    KEYWORD_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| desc.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}
