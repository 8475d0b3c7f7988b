//! The `State` trait implemented by every state machine in the crate.
//!
//! Session status and onboarding position are both plain values that
//! implement this trait, which lets guards and history work over them
//! without knowing which screen they belong to.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure. A state is an immutable value describing where a
/// machine currently is; moving somewhere else means producing a new value.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history records
/// - `PartialEq`: guards and tests compare states
/// - `Debug`: states appear in log events
/// - `Serialize` + `Deserialize`: hosts can persist or ship states across an FFI boundary
///
/// # Example
///
/// ```rust
/// use smartmoney::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum SheetState {
///     Hidden,
///     Shown,
///     Dismissed,
/// }
///
/// impl State for SheetState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Hidden => "Hidden",
///             Self::Shown => "Shown",
///             Self::Dismissed => "Dismissed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Dismissed)
///     }
/// }
///
/// assert!(SheetState::Dismissed.is_final());
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Check if this is a terminal state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this state represents a failure the user must acknowledge.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
    enum ScreenPhase {
        Loading,
        Ready,
        Closed,
        Broken,
    }

    impl State for ScreenPhase {
        fn name(&self) -> &str {
            match self {
                Self::Loading => "Loading",
                Self::Ready => "Ready",
                Self::Closed => "Closed",
                Self::Broken => "Broken",
            }
        }

        fn is_final(&self) -> bool {
            matches!(self, Self::Closed)
        }

        fn is_error(&self) -> bool {
            matches!(self, Self::Broken)
        }
    }

    #[test]
    fn defaults_are_not_final_or_error() {
        #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
        struct Plain;

        impl State for Plain {
            fn name(&self) -> &str {
                "Plain"
            }
        }

        assert!(!Plain.is_final());
        assert!(!Plain.is_error());
    }

    #[test]
    fn overrides_are_respected() {
        assert_eq!(ScreenPhase::Loading.name(), "Loading");
        assert!(!ScreenPhase::Ready.is_final());
        assert!(ScreenPhase::Closed.is_final());
        assert!(ScreenPhase::Broken.is_error());
        assert!(!ScreenPhase::Broken.is_final());
    }

    #[test]
    fn state_serializes_correctly() {
        let json = serde_json::to_string(&ScreenPhase::Ready).unwrap();
        let back: ScreenPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ScreenPhase::Ready);
    }
}
