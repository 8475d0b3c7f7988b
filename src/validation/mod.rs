//! Field validation for the sign-in, sign-up and transaction forms.
//!
//! Checks are built from stillwater's `Validation`, which accumulates every
//! failure instead of stopping at the first one. The caller still gets an
//! ordered list, so "which field is invalid" is simply the first entry.
//!
//! Validation never performs I/O and is never logged: a form that fails
//! here has made no external call and left its owner's state unchanged.
//!
//! # Example
//!
//! ```rust
//! use smartmoney::validation::{non_empty, Field, RulesBuilder};
//!
//! struct Login {
//!     email: String,
//! }
//!
//! let rules = RulesBuilder::new()
//!     .require(|l: &Login| non_empty(Field::Email, &l.email))
//!     .build();
//!
//! let errors = rules.enforce(&Login { email: " ".into() }).unwrap_err();
//! assert_eq!(errors.to_string(), "Please fill in all fields.");
//! ```

pub mod builder;
pub mod rules;
pub mod violations;

pub use builder::RulesBuilder;
pub use rules::{from_result, matches, non_empty, FieldCheck, FormRules};
pub use violations::{Field, FieldError, ValidationErrors, Violation};
