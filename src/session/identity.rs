//! Contract for the hosted identity backend.

use crate::session::model::{Account, SessionToken};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Session id the backend understands as "whatever session is current".
pub const CURRENT_SESSION: &str = "current";

/// Coarse classification an identity backend attaches to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityErrorKind {
    InvalidCredentials,
    EmailAlreadyInUse,
    Network,
    NoSession,
    Service,
}

impl fmt::Display for IdentityErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidCredentials => "invalid credentials",
            Self::EmailAlreadyInUse => "email already in use",
            Self::Network => "network error",
            Self::NoSession => "no active session",
            Self::Service => "service error",
        };
        f.write_str(text)
    }
}

/// Failure reported by an [`IdentityService`].
///
/// `message` is the backend's own wording, passed to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct IdentityError {
    pub kind: IdentityErrorKind,
    pub message: Option<String>,
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {message}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl IdentityError {
    pub fn new(kind: IdentityErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Failure without a backend message.
    pub fn bare(kind: IdentityErrorKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

/// Hosted identity backend.
///
/// Every call is attempted exactly once per user action. Implementations
/// decide their own latency and timeouts.
#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    async fn create_session(&self, email: &str, password: &str)
        -> Result<SessionToken, IdentityError>;

    async fn create_account(
        &self,
        unique_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, IdentityError>;

    /// Account behind the current session; fails with `NoSession` when
    /// there is none.
    async fn get_account(&self) -> Result<Account, IdentityError>;

    async fn delete_session(&self, session_id: &str) -> Result<(), IdentityError>;
}

#[async_trait::async_trait]
impl<T: IdentityService + ?Sized> IdentityService for Arc<T> {
    async fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, IdentityError> {
        (**self).create_session(email, password).await
    }

    async fn create_account(
        &self,
        unique_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, IdentityError> {
        (**self)
            .create_account(unique_id, email, password, name)
            .await
    }

    async fn get_account(&self) -> Result<Account, IdentityError> {
        (**self).get_account().await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), IdentityError> {
        (**self).delete_session(session_id).await
    }
}
