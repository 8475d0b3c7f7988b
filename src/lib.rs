//! Smartmoney: headless state for a personal-finance app
//!
//! The crate holds the logic behind the app's screens and none of the
//! rendering. Each screen gets a small state machine; hosts wire in the
//! identity backend, the transaction store and a navigator.
//!
//! # Core Concepts
//!
//! - **Session**: one `SessionController` owns the signed-in state and
//!   gates the tab routes
//! - **Onboarding**: a forward-only pager that ends in sign-up
//! - **Transactions**: list filtering, and an editor that validates a draft
//!   before handing it to the store
//! - **Insights**: totals and category shares derived from records
//!
//! # Example
//!
//! ```rust
//! use smartmoney::clock::{Clock, SystemClock};
//! use smartmoney::transactions::{sample_records, FilterKind, TransactionFilter};
//!
//! let records = sample_records(SystemClock.today());
//!
//! let mut filter = TransactionFilter::new();
//! filter.set_filter(FilterKind::Income);
//!
//! let visible = filter.visible(&records);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].label, "Salary");
//! ```

pub mod clock;
pub mod config;
pub mod core;
pub mod insights;
pub mod logging;
pub mod navigation;
pub mod onboarding;
pub mod session;
pub mod transactions;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, CoreConfig};
pub use core::{Guard, State, StateHistory, StateTransition};
pub use navigation::{NavigationIntent, Navigator, Route};
pub use onboarding::OnboardingPager;
pub use session::{AuthError, SessionController};
pub use transactions::{TransactionEditor, TransactionFilter};
