//! Session data: identity handle, signed-in user and status.

use crate::core::State;
use serde::{Deserialize, Serialize};

/// Opaque handle issued by the identity service for a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    pub id: String,
    pub user_id: String,
}

/// Account as returned by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

/// The signed-in user as the screens see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl User {
    /// First word of the display name, for greetings.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

impl From<Account> for User {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            avatar_url: account.avatar_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SessionStatus {
    Anonymous,
    Authenticating,
    Authenticated,
    /// A remote call failed; holds the message shown to the user.
    Error(String),
}

impl State for SessionStatus {
    fn name(&self) -> &str {
        match self {
            Self::Anonymous => "Anonymous",
            Self::Authenticating => "Authenticating",
            Self::Authenticated => "Authenticated",
            Self::Error(_) => "Error",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Process-wide session value.
///
/// Fields are private: the only ways to build one keep `user` present
/// exactly when the status is `Authenticated`. It serializes for hosts
/// that mirror it into their own view state but is never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    identity: Option<SessionToken>,
    user: Option<User>,
    status: SessionStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            user: None,
            status: SessionStatus::Anonymous,
        }
    }

    /// Session backed by a user the service just confirmed.
    ///
    /// `identity` is `None` when the user was recovered through
    /// `get_account` without a token in hand.
    pub fn authenticated(identity: Option<SessionToken>, user: User) -> Self {
        Self {
            identity,
            user: Some(user),
            status: SessionStatus::Authenticated,
        }
    }

    pub(crate) fn authenticating() -> Self {
        Self {
            identity: None,
            user: None,
            status: SessionStatus::Authenticating,
        }
    }

    pub(crate) fn failed(reason: impl Into<String>) -> Self {
        Self {
            identity: None,
            user: None,
            status: SessionStatus::Error(reason.into()),
        }
    }

    pub fn identity(&self) -> Option<&SessionToken> {
        self.identity.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.status, SessionStatus::Authenticated)
    }
}
