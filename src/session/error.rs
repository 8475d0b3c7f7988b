//! Errors surfaced by the session controller.

use crate::session::identity::{IdentityError, IdentityErrorKind};
use crate::validation::ValidationErrors;
use thiserror::Error;

pub const SIGN_IN_FALLBACK: &str = "Login failed.";
pub const SIGN_UP_FALLBACK: &str = "Signup failed.";
pub const PROFILE_FALLBACK: &str = "Could not load your profile.";

/// Error returned by [`SessionController`](crate::session::SessionController).
///
/// Remote variants carry the message to show: the service's own text when
/// it sent one, otherwise the fallback for the operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    InvalidCredentials { message: String },

    #[error("{message}")]
    EmailAlreadyInUse { message: String },

    #[error("{message}")]
    Network { message: String },

    #[error("{message}")]
    NoSession { message: String },

    #[error("{message}")]
    Service { message: String },

    #[error("A request is already in progress.")]
    Busy,
}

impl AuthError {
    pub(crate) fn remote(err: IdentityError, fallback: &str) -> Self {
        let message = err
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        match err.kind {
            IdentityErrorKind::InvalidCredentials => Self::InvalidCredentials { message },
            IdentityErrorKind::EmailAlreadyInUse => Self::EmailAlreadyInUse { message },
            IdentityErrorKind::Network => Self::Network { message },
            IdentityErrorKind::NoSession => Self::NoSession { message },
            IdentityErrorKind::Service => Self::Service { message },
        }
    }

    /// Failed before any external call was made.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Busy)
    }

    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Text for the alert shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
