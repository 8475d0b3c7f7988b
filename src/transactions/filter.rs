//! Filter chip and search box state for the transaction list.

use crate::transactions::record::{TransactionRecord, SUBSCRIPTIONS_TAG};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    #[default]
    All,
    Income,
    Expenses,
    Subscriptions,
    /// Reserved for generated tips; no record matches it yet.
    AiTips,
}

impl FilterKind {
    /// Chips in display order.
    pub const CHIPS: [FilterKind; 5] = [
        Self::All,
        Self::Income,
        Self::Expenses,
        Self::Subscriptions,
        Self::AiTips,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Income => "Income",
            Self::Expenses => "Expenses",
            Self::Subscriptions => "Subscriptions",
            Self::AiTips => "AI Tips",
        }
    }

    pub fn admits(&self, record: &TransactionRecord) -> bool {
        match self {
            Self::All => true,
            Self::Income => record.is_income(),
            Self::Expenses => record.is_expense(),
            Self::Subscriptions => record.category_tag == SUBSCRIPTIONS_TAG,
            Self::AiTips => false,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Active chip plus search text.
///
/// ```rust
/// use smartmoney::transactions::{FilterKind, TransactionFilter};
///
/// let mut filter = TransactionFilter::new();
/// filter.set_filter(FilterKind::Income);
/// filter.set_query("  sal ");
///
/// assert_eq!(filter.active(), FilterKind::Income);
/// assert_eq!(filter.query(), "sal");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    active: FilterKind,
    query: String,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_filter(&mut self, filter: FilterKind) {
        self.active = filter;
    }

    /// Replace the search text; surrounding whitespace is dropped.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    pub fn active(&self) -> FilterKind {
        self.active
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Records passing both the chip and the search text, in input order.
    pub fn visible<'a>(&self, records: &'a [TransactionRecord]) -> Vec<&'a TransactionRecord> {
        let needle = self.query.to_lowercase();
        records
            .iter()
            .filter(|record| self.active.admits(record))
            .filter(|record| needle.is_empty() || record.mentions(&needle))
            .collect()
    }
}
