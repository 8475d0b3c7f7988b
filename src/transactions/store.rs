//! Where saved transactions go, and an in-process store.

use crate::clock::Clock;
use crate::transactions::record::{TransactionRecord, SUBSCRIPTIONS_TAG};
use chrono::{Duration, NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("transaction store unavailable: {0}")]
    Unavailable(String),

    #[error("transaction rejected: {0}")]
    Rejected(String),
}

/// Persistence for transaction records. Lists newest first.
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync {
    async fn list(&self) -> Result<Vec<TransactionRecord>, StoreError>;

    async fn append(&self, record: TransactionRecord) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<T: TransactionStore + ?Sized> TransactionStore for Arc<T> {
    async fn list(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        (**self).list().await
    }

    async fn append(&self, record: TransactionRecord) -> Result<(), StoreError> {
        (**self).append(record).await
    }
}

#[derive(Default)]
struct StoreInner {
    records: Vec<TransactionRecord>,
    unavailable: bool,
}

#[derive(Default)]
pub struct InMemoryTransactionStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `records` as given, newest first.
    pub fn with_records(records: Vec<TransactionRecord>) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                records,
                unavailable: false,
            }),
        }
    }

    /// Store seeded with the demo list, dated relative to `clock`.
    pub fn with_sample_data(clock: &dyn Clock) -> Self {
        Self::with_records(sample_records(clock.today()))
    }

    /// While unavailable every call fails.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    pub fn snapshot(&self) -> Vec<TransactionRecord> {
        self.lock().records.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn unavailable() -> StoreError {
    StoreError::Unavailable("store is offline".into())
}

#[async_trait::async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn list(&self) -> Result<Vec<TransactionRecord>, StoreError> {
        let inner = self.lock();
        if inner.unavailable {
            return Err(unavailable());
        }
        Ok(inner.records.clone())
    }

    async fn append(&self, record: TransactionRecord) -> Result<(), StoreError> {
        let mut inner = self.lock();
        if inner.unavailable {
            return Err(unavailable());
        }
        if record.label.trim().is_empty() {
            return Err(StoreError::Rejected("label is empty".into()));
        }
        if record.amount_minor == 0 {
            return Err(StoreError::Rejected("amount is zero".into()));
        }
        trace!(label = %record.label, amount_minor = record.amount_minor, "record stored");
        inner.records.insert(0, record);
        Ok(())
    }
}

/// The demo list: one salary and four expenses over the last three days,
/// newest first.
pub fn sample_records(today: NaiveDate) -> Vec<TransactionRecord> {
    let at = |days_ago: i64, hour: u32, minute: u32| {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
        (today - Duration::days(days_ago)).and_time(time).and_utc()
    };
    let record = |label: &str, amount_minor: i64, days_ago, hour, minute, tag: &str| {
        TransactionRecord {
            label: label.to_string(),
            subtitle: None,
            amount_minor,
            timestamp: at(days_ago, hour, minute),
            category_tag: tag.to_string(),
        }
    };

    vec![
        record("Lunch at Cafeteria", -120_000, 0, 12, 30, "food"),
        record("Salary", 15_000_000, 0, 9, 0, "income"),
        record("Bus fare to work", -50_000, 0, 8, 15, "transport"),
        record("Netflix Subscription", -450_000, 1, 18, 0, SUBSCRIPTIONS_TAG),
        record("Groceries", -875_000, 2, 17, 45, "shopping"),
    ]
}
