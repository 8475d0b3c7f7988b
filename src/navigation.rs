//! Navigation intents emitted by the controllers.
//!
//! The crate never owns a route stack. Controllers hand a
//! [`NavigationIntent`] to a [`Navigator`] and the host UI decides how to
//! perform it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

/// Screens the controllers can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Onboarding,
    SignUp,
    Login,
    Home,
    Transactions,
    Insights,
    Profile,
}

impl Route {
    /// Tab bar destinations, in display order.
    pub const TABS: [Route; 4] = [Self::Home, Self::Transactions, Self::Insights, Self::Profile];

    /// Whether reaching this route needs an authenticated session.
    pub fn requires_auth(&self) -> bool {
        Self::TABS.contains(self)
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Onboarding => "/onboarding",
            Self::SignUp => "/(auth)/signup",
            Self::Login => "/(auth)/login",
            Self::Home => "/(tabs)/Home",
            Self::Transactions => "/(tabs)/Transactions",
            Self::Insights => "/(tabs)/Insights",
            Self::Profile => "/(tabs)/Profile",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// What the host should do with its route stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "route", rename_all = "snake_case")]
pub enum NavigationIntent {
    /// Push on top of the current screen.
    Push(Route),
    /// Replace the current stack entry; the user cannot go back.
    Replace(Route),
    Back,
}

impl NavigationIntent {
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Push(route) | Self::Replace(route) => Some(*route),
            Self::Back => None,
        }
    }
}

/// Receiver of navigation intents, implemented by the host UI layer.
pub trait Navigator: Send + Sync {
    fn navigate(&self, intent: NavigationIntent);
}

impl<T: Navigator + ?Sized> Navigator for Arc<T> {
    fn navigate(&self, intent: NavigationIntent) {
        (**self).navigate(intent)
    }
}

/// Navigator that remembers every intent it receives.
///
/// Useful for hosts that drain intents on their own schedule, and for tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    intents: Mutex<Vec<NavigationIntent>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intents(&self) -> Vec<NavigationIntent> {
        self.intents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<NavigationIntent> {
        self.intents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<NavigationIntent> {
        std::mem::take(&mut *self.intents.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, intent: NavigationIntent) {
        tracing::debug!(?intent, "navigation intent");
        self.intents
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(intent);
    }
}
