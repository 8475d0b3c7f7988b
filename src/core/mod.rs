//! State machine building blocks shared by every controller.
//!
//! - State definitions via the `State` trait
//! - Guard predicates for transition control
//! - Immutable history tracking
//!
//! Nothing in this module performs I/O.

mod guard;
mod history;
mod state;

pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
