//! Transaction values as the list screens show them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tag the "Subscriptions" filter looks for.
pub const SUBSCRIPTIONS_TAG: &str = "subscriptions";

/// Tag given to records saved without a category.
pub const UNCATEGORIZED_TAG: &str = "other";

/// One entry in the transaction list.
///
/// `amount_minor` is signed: income is positive, spending negative. Zero
/// never reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub amount_minor: i64,
    pub timestamp: DateTime<Utc>,
    pub category_tag: String,
}

impl TransactionRecord {
    pub fn is_income(&self) -> bool {
        self.amount_minor > 0
    }

    pub fn is_expense(&self) -> bool {
        self.amount_minor < 0
    }

    /// Case-insensitive substring match on label and subtitle.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        self.label.to_lowercase().contains(needle)
            || self
                .subtitle
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    /// Apply this kind's sign to a positive magnitude.
    pub fn signed(&self, magnitude: i64) -> i64 {
        match self {
            Self::Income => magnitude,
            Self::Expense => -magnitude,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}
