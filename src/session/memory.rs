//! In-process implementation of the `IdentityService` contract.
//!
//! Compiled into the library, not just the tests, so a host can run every
//! screen end to end without a hosted backend.

use crate::session::identity::{
    IdentityError, IdentityErrorKind, IdentityService, CURRENT_SESSION,
};
use crate::session::model::{Account, SessionToken};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::trace;
use uuid::Uuid;

/// Minimum password length the in-memory backend accepts on sign-up.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Identity operations, for targeted failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityCall {
    CreateSession,
    CreateAccount,
    GetAccount,
    DeleteSession,
}

/// Number of calls received per operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub create_session: usize,
    pub create_account: usize,
    pub get_account: usize,
    pub delete_session: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.create_session + self.create_account + self.get_account + self.delete_session
    }
}

struct StoredAccount {
    account: Account,
    password: String,
}

#[derive(Default)]
struct Inner {
    accounts: HashMap<String, StoredAccount>,
    current: Option<(SessionToken, String)>,
    offline: bool,
    fail_next: Option<(Option<IdentityCall>, IdentityError)>,
    calls: CallCounts,
}

/// Identity backend holding accounts and one current session in memory.
#[derive(Default)]
pub struct InMemoryIdentityService {
    inner: Mutex<Inner>,
}

impl InMemoryIdentityService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account that can sign in immediately.
    pub fn with_account(self, name: &str, email: &str, password: &str) -> Self {
        {
            let mut inner = self.lock();
            let account = Account {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                email: email.to_string(),
                avatar_url: None,
            };
            inner.accounts.insert(
                normalize(email),
                StoredAccount {
                    account,
                    password: password.to_string(),
                },
            );
        }
        self
    }

    /// While offline every call fails with a network error.
    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    /// Make the next call, whatever it is, fail with `error`.
    pub fn fail_next(&self, error: IdentityError) {
        self.lock().fail_next = Some((None, error));
    }

    /// Make the next call to `call` fail with `error`; other calls pass.
    pub fn fail_call(&self, call: IdentityCall, error: IdentityError) {
        self.lock().fail_next = Some((Some(call), error));
    }

    pub fn calls(&self) -> CallCounts {
        self.lock().calls
    }

    pub fn has_current_session(&self) -> bool {
        self.lock().current.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn check_reachable(&mut self, call: IdentityCall) -> Result<(), IdentityError> {
        let targeted = match &self.fail_next {
            Some((target, _)) => target.map_or(true, |t| t == call),
            None => false,
        };
        if targeted {
            if let Some((_, error)) = self.fail_next.take() {
                return Err(error);
            }
        }
        if self.offline {
            return Err(IdentityError::new(
                IdentityErrorKind::Network,
                "Network request failed",
            ));
        }
        Ok(())
    }
}

fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

#[async_trait::async_trait]
impl IdentityService for InMemoryIdentityService {
    async fn create_session(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, IdentityError> {
        let mut inner = self.lock();
        inner.calls.create_session += 1;
        inner.check_reachable(IdentityCall::CreateSession)?;

        let key = normalize(email);
        let user_id = match inner.accounts.get(&key) {
            Some(stored) if stored.password == password => stored.account.id.clone(),
            _ => {
                return Err(IdentityError::new(
                    IdentityErrorKind::InvalidCredentials,
                    "Invalid credentials. Please check the email and password.",
                ))
            }
        };

        let token = SessionToken {
            id: Uuid::new_v4().simple().to_string(),
            user_id,
        };
        trace!(session = %token.id, "in-memory session created");
        inner.current = Some((token.clone(), key));
        Ok(token)
    }

    async fn create_account(
        &self,
        unique_id: &str,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Account, IdentityError> {
        let mut inner = self.lock();
        inner.calls.create_account += 1;
        inner.check_reachable(IdentityCall::CreateAccount)?;

        let key = normalize(email);
        if inner.accounts.contains_key(&key) {
            return Err(IdentityError::new(
                IdentityErrorKind::EmailAlreadyInUse,
                "A user with the same email already exists.",
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(IdentityError::new(
                IdentityErrorKind::Service,
                format!("Password must be at least {MIN_PASSWORD_LEN} characters long."),
            ));
        }

        let account = Account {
            id: unique_id.to_string(),
            name: name.to_string(),
            email: email.trim().to_string(),
            avatar_url: None,
        };
        inner.accounts.insert(
            key,
            StoredAccount {
                account: account.clone(),
                password: password.to_string(),
            },
        );
        Ok(account)
    }

    async fn get_account(&self) -> Result<Account, IdentityError> {
        let mut inner = self.lock();
        inner.calls.get_account += 1;
        inner.check_reachable(IdentityCall::GetAccount)?;

        let no_session = || IdentityError::new(IdentityErrorKind::NoSession, "No active session.");
        let (_, key) = inner.current.as_ref().ok_or_else(no_session)?;
        inner
            .accounts
            .get(key)
            .map(|stored| stored.account.clone())
            .ok_or_else(no_session)
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), IdentityError> {
        let mut inner = self.lock();
        inner.calls.delete_session += 1;
        inner.check_reachable(IdentityCall::DeleteSession)?;

        let is_current = match &inner.current {
            Some((token, _)) => session_id == CURRENT_SESSION || session_id == token.id,
            None => false,
        };
        if !is_current {
            return Err(IdentityError::new(
                IdentityErrorKind::NoSession,
                "Session not found.",
            ));
        }
        inner.current = None;
        Ok(())
    }
}
