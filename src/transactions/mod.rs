//! Transaction list filtering, amount handling and the entry editor.

pub mod amount;
pub mod editor;
pub mod filter;
pub mod record;
pub mod store;

pub use amount::{format_signed, format_total, parse_positive_minor, AmountError};
pub use editor::{parse_date, DraftField, DraftTransaction, EditorError, TransactionEditor};
pub use filter::{FilterKind, TransactionFilter};
pub use record::{TransactionKind, TransactionRecord, SUBSCRIPTIONS_TAG, UNCATEGORIZED_TAG};
pub use store::{sample_records, InMemoryTransactionStore, StoreError, TransactionStore};
