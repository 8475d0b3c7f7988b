//! The single owner of the process-wide [`Session`].
//!
//! Screens get the controller passed to them and read the session through
//! it; nothing else mutates it. Remote calls run without holding the lock,
//! so a slow identity service never blocks readers.

use crate::config::CoreConfig;
use crate::core::{Guard, State, StateHistory, StateTransition};
use crate::navigation::{NavigationIntent, Navigator, Route};
use crate::session::error::{AuthError, PROFILE_FALLBACK, SIGN_IN_FALLBACK, SIGN_UP_FALLBACK};
use crate::session::forms::{SignInForm, SignUpForm};
use crate::session::identity::{IdentityError, IdentityService, CURRENT_SESSION};
use crate::session::model::{Session, SessionStatus, User};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What the profile screen shows while hydrating the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileView {
    #[default]
    Loading,
    Loaded(User),
    Empty,
}

struct ControllerState {
    session: Session,
    history: StateHistory<SessionStatus>,
    /// Session to restore when the user dismisses a remote error.
    revert_to: Option<Session>,
}

impl ControllerState {
    fn move_to(&mut self, next: Session) {
        if next.status() != self.session.status() {
            let from = self.session.status().clone();
            let to = next.status().clone();
            debug!(from = from.name(), to = to.name(), "session transition");
            self.history = self.history.record(StateTransition::now(from, to));
        }
        self.session = next;
    }
}

pub struct SessionController<I, N> {
    identity: I,
    navigator: N,
    state: Mutex<ControllerState>,
    submit_guard: Option<Guard<SessionStatus>>,
}

impl<I: IdentityService, N: Navigator> SessionController<I, N> {
    pub fn new(identity: I, navigator: N) -> Self {
        Self::with_config(identity, navigator, &CoreConfig::default())
    }

    pub fn with_config(identity: I, navigator: N, config: &CoreConfig) -> Self {
        let submit_guard = config.reject_concurrent_submits.then(|| {
            Guard::labeled("not_in_flight", |s: &SessionStatus| {
                !matches!(s, SessionStatus::Authenticating)
            })
        });
        Self {
            identity,
            navigator,
            state: Mutex::new(ControllerState {
                session: Session::anonymous(),
                history: StateHistory::new(),
                revert_to: None,
            }),
            submit_guard,
        }
    }

    pub fn session(&self) -> Session {
        self.lock().session.clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.lock().session.status().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock().session.user().cloned()
    }

    pub fn history(&self) -> StateHistory<SessionStatus> {
        self.lock().history.clone()
    }

    /// `route` if the current session may see it, otherwise `Login`.
    pub fn gate(&self, route: Route) -> Route {
        if route.requires_auth() && !self.is_authenticated() {
            Route::Login
        } else {
            route
        }
    }

    /// Push the gated version of `route` and return where the user ends up.
    pub fn open(&self, route: Route) -> Route {
        let target = self.gate(route);
        self.navigator.navigate(NavigationIntent::Push(target));
        target
    }

    /// Screen to show at launch.
    pub fn start_route(&self) -> Route {
        if self.is_authenticated() {
            Route::Home
        } else {
            Route::Onboarding
        }
    }

    /// Sign in with existing credentials.
    ///
    /// Creates a session and then loads the account behind it. Empty fields
    /// fail before any remote call.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let form = SignInForm::new(email, password);
        form.validate()?;
        self.begin_attempt()?;

        let email = form.email.trim();
        debug!(email, "signing in");
        let result = async {
            let token = self.identity.create_session(email, &form.password).await?;
            let account = self.identity.get_account().await?;
            Ok::<_, IdentityError>(Session::authenticated(Some(token), account.into()))
        }
        .await;

        self.finish_attempt(result, SIGN_IN_FALLBACK, "signed in")
    }

    /// Register a new account and sign straight into it.
    pub async fn sign_up(
        &self,
        full_name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Session, AuthError> {
        let form = SignUpForm::new(full_name, email, password, confirm_password);
        form.validate()?;
        self.begin_attempt()?;

        let email = form.email.trim();
        let unique_id = Uuid::new_v4().to_string();
        debug!(email, account = %unique_id, "signing up");
        let result = async {
            let account = self
                .identity
                .create_account(&unique_id, email, &form.password, form.full_name.trim())
                .await?;
            let token = self.identity.create_session(email, &form.password).await?;
            Ok::<_, IdentityError>(Session::authenticated(Some(token), account.into()))
        }
        .await;

        self.finish_attempt(result, SIGN_UP_FALLBACK, "signed up")
    }

    /// Hydrate the session from whatever the identity service considers
    /// current.
    ///
    /// A failure drops the session back to anonymous and is only logged;
    /// the returned error is for callers that want to branch on it.
    pub async fn fetch_current_user(&self) -> Result<User, AuthError> {
        match self.identity.get_account().await {
            Ok(account) => {
                let user = User::from(account);
                let mut state = self.lock();
                let identity = state.session.identity().cloned();
                state.revert_to = None;
                state.move_to(Session::authenticated(identity, user.clone()));
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "could not fetch current user");
                let mut state = self.lock();
                if !matches!(state.session.status(), SessionStatus::Authenticating) {
                    state.revert_to = None;
                    state.move_to(Session::anonymous());
                }
                Err(AuthError::remote(err, PROFILE_FALLBACK))
            }
        }
    }

    /// [`fetch_current_user`](Self::fetch_current_user) folded into what the
    /// profile screen renders.
    pub async fn load_profile(&self) -> ProfileView {
        match self.fetch_current_user().await {
            Ok(user) => ProfileView::Loaded(user),
            Err(_) => ProfileView::Empty,
        }
    }

    /// End the session locally and send the user to the login screen.
    ///
    /// The remote invalidation is attempted once; its failure is logged and
    /// otherwise ignored.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let session_id = {
            let mut state = self.lock();
            let session_id = state
                .session
                .identity()
                .map(|token| token.id.clone())
                .unwrap_or_else(|| CURRENT_SESSION.to_string());
            state.revert_to = None;
            state.move_to(Session::anonymous());
            session_id
        };
        info!("signed out");
        self.navigator.navigate(NavigationIntent::Replace(Route::Login));

        if let Err(err) = self.identity.delete_session(&session_id).await {
            warn!(error = %err, "remote session invalidation failed");
        }
        Ok(())
    }

    /// Dismiss the error alert and restore the session from before the
    /// failed attempt. Does nothing unless the status is `Error`.
    pub fn acknowledge_error(&self) {
        let mut state = self.lock();
        if state.session.status().is_error() {
            let previous = state.revert_to.take().unwrap_or_default();
            state.move_to(previous);
        }
    }

    fn begin_attempt(&self) -> Result<(), AuthError> {
        let mut state = self.lock();
        if let Some(guard) = &self.submit_guard {
            if !guard.check(state.session.status()) {
                debug!(guard = guard.label(), "submit rejected");
                return Err(AuthError::Busy);
            }
        }
        // A retry from the error alert, or a second request while one is in
        // flight, keeps the session captured by the first attempt.
        let in_attempt = matches!(
            state.session.status(),
            SessionStatus::Authenticating | SessionStatus::Error(_)
        );
        if in_attempt {
            state.revert_to.get_or_insert_with(Session::anonymous);
        } else {
            state.revert_to = Some(state.session.clone());
        }
        state.move_to(Session::authenticating());
        Ok(())
    }

    fn finish_attempt(
        &self,
        result: Result<Session, IdentityError>,
        fallback: &str,
        outcome: &str,
    ) -> Result<Session, AuthError> {
        match result {
            Ok(session) => {
                {
                    let mut state = self.lock();
                    state.revert_to = None;
                    state.move_to(session.clone());
                }
                if let Some(user) = session.user() {
                    info!(user = %user.id, "{outcome}");
                }
                self.navigator.navigate(NavigationIntent::Replace(Route::Home));
                Ok(session)
            }
            Err(err) => {
                let error = AuthError::remote(err, fallback);
                self.lock().move_to(Session::failed(error.user_message()));
                Err(error)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::RecordingNavigator;
    use crate::session::identity::IdentityErrorKind;
    use crate::session::memory::{IdentityCall, InMemoryIdentityService};
    use std::sync::Arc;

    type Controller = SessionController<Arc<InMemoryIdentityService>, Arc<RecordingNavigator>>;

    fn setup() -> (Controller, Arc<InMemoryIdentityService>, Arc<RecordingNavigator>) {
        let identity = Arc::new(
            InMemoryIdentityService::new().with_account("Alex Johnson", "alex@example.com", "Secret123"),
        );
        let nav = Arc::new(RecordingNavigator::new());
        let controller = SessionController::new(Arc::clone(&identity), Arc::clone(&nav));
        (controller, identity, nav)
    }

    #[tokio::test]
    async fn sign_in_success_authenticates_and_navigates_home() {
        let (controller, identity, nav) = setup();

        let session = controller
            .sign_in("  alex@example.com ", "Secret123")
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Alex Johnson"));
        assert!(session.identity().is_some());
        assert_eq!(nav.last(), Some(NavigationIntent::Replace(Route::Home)));
        assert_eq!(identity.calls().create_session, 1);
        assert_eq!(identity.calls().get_account, 1);

        let path: Vec<_> = controller
            .history()
            .get_path()
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(
            path,
            vec![
                SessionStatus::Anonymous,
                SessionStatus::Authenticating,
                SessionStatus::Authenticated
            ]
        );
    }

    #[tokio::test]
    async fn empty_field_fails_without_remote_call() {
        let (controller, identity, nav) = setup();

        let err = controller.sign_in("alex@example.com", "   ").await.unwrap_err();

        assert!(err.is_local());
        assert_eq!(identity.calls().total(), 0);
        assert_eq!(controller.status(), SessionStatus::Anonymous);
        assert!(controller.history().is_empty());
        assert!(nav.intents().is_empty());
    }

    #[tokio::test]
    async fn wrong_password_surfaces_service_message_then_reverts() {
        let (controller, _identity, nav) = setup();

        let err = controller.sign_in("alex@example.com", "wrong").await.unwrap_err();

        assert_eq!(
            err.user_message(),
            "Invalid credentials. Please check the email and password."
        );
        assert!(controller.status().is_error());
        assert!(controller.current_user().is_none());
        assert!(nav.intents().is_empty());

        controller.acknowledge_error();
        assert_eq!(controller.status(), SessionStatus::Anonymous);
    }

    #[tokio::test]
    async fn bare_remote_failure_uses_fallback() {
        let (controller, identity, _nav) = setup();
        identity.fail_next(IdentityError::bare(IdentityErrorKind::Network));

        let err = controller.sign_in("alex@example.com", "Secret123").await.unwrap_err();

        assert!(matches!(err, AuthError::Network { .. }));
        assert_eq!(err.user_message(), "Login failed.");
        assert_eq!(controller.status(), SessionStatus::Error("Login failed.".into()));
    }

    #[tokio::test]
    async fn sign_up_creates_account_and_session() {
        let (controller, identity, nav) = setup();

        let session = controller
            .sign_up(" Sam Lee ", "sam@example.com", "Password1", "Password1")
            .await
            .unwrap();

        assert_eq!(session.user().map(|u| u.name.as_str()), Some("Sam Lee"));
        assert_eq!(identity.calls().create_account, 1);
        assert_eq!(identity.calls().create_session, 1);
        assert!(identity.has_current_session());
        assert_eq!(nav.last(), Some(NavigationIntent::Replace(Route::Home)));
    }

    #[tokio::test]
    async fn sign_up_duplicate_email_fails() {
        let (controller, identity, _nav) = setup();

        let err = controller
            .sign_up("Alex", "alex@example.com", "Password1", "Password1")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::EmailAlreadyInUse { .. }));
        assert_eq!(identity.calls().create_session, 0);
        assert!(!controller.is_authenticated());
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_busy() {
        let (controller, identity, _nav) = setup();
        controller.lock().move_to(Session::authenticating());

        let err = controller.sign_in("alex@example.com", "Secret123").await.unwrap_err();

        assert_eq!(err, AuthError::Busy);
        assert_eq!(identity.calls().total(), 0);
    }

    #[tokio::test]
    async fn guard_can_be_disabled() {
        let identity = Arc::new(
            InMemoryIdentityService::new().with_account("Alex", "alex@example.com", "Secret123"),
        );
        let config = CoreConfig {
            reject_concurrent_submits: false,
            ..CoreConfig::default()
        };
        let controller = SessionController::with_config(
            Arc::clone(&identity),
            RecordingNavigator::new(),
            &config,
        );
        controller.lock().move_to(Session::authenticating());

        assert!(controller.sign_in("alex@example.com", "Secret123").await.is_ok());
        assert_eq!(identity.calls().create_session, 1);
    }

    #[tokio::test]
    async fn sign_out_always_lands_on_login() {
        let (controller, identity, nav) = setup();
        controller.sign_in("alex@example.com", "Secret123").await.unwrap();
        identity.set_offline(true);

        controller.sign_out().await.unwrap();

        assert_eq!(controller.status(), SessionStatus::Anonymous);
        assert_eq!(nav.last(), Some(NavigationIntent::Replace(Route::Login)));
        assert_eq!(identity.calls().delete_session, 1);
    }

    #[tokio::test]
    async fn fetch_current_user_hydrates_or_falls_back() {
        let (controller, identity, _nav) = setup();
        assert_eq!(controller.load_profile().await, ProfileView::Empty);
        assert_eq!(controller.status(), SessionStatus::Anonymous);

        identity
            .create_session("alex@example.com", "Secret123")
            .await
            .unwrap();
        let user = controller.fetch_current_user().await.unwrap();

        assert_eq!(user.first_name(), "Alex");
        assert!(controller.is_authenticated());
        assert_eq!(controller.gate(Route::Insights), Route::Insights);
    }

    #[tokio::test]
    async fn acknowledge_after_failed_fetch_stays_signed_out() {
        let (controller, identity, _nav) = setup();
        controller.sign_in("alex@example.com", "Secret123").await.unwrap();
        controller.sign_in("alex@example.com", "wrong").await.unwrap_err();

        identity.fail_call(
            IdentityCall::GetAccount,
            IdentityError::bare(IdentityErrorKind::Service),
        );
        controller.fetch_current_user().await.unwrap_err();
        assert_eq!(controller.status(), SessionStatus::Anonymous);

        controller.sign_in("alex@example.com", "wrong").await.unwrap_err();
        controller.acknowledge_error();

        assert_eq!(controller.status(), SessionStatus::Anonymous);
        assert!(!controller.is_authenticated());
        assert_eq!(controller.gate(Route::Home), Route::Login);
    }

    #[tokio::test]
    async fn acknowledge_restores_the_session_before_the_failed_attempt() {
        let (controller, _identity, _nav) = setup();
        controller.sign_in("alex@example.com", "Secret123").await.unwrap();

        controller.sign_in("alex@example.com", "wrong").await.unwrap_err();
        controller.sign_in("alex@example.com", "still wrong").await.unwrap_err();
        controller.acknowledge_error();

        assert!(controller.is_authenticated());
        assert_eq!(
            controller.current_user().map(|u| u.email),
            Some("alex@example.com".to_string())
        );
    }

    #[test]
    fn gate_redirects_anonymous_users() {
        let (controller, _identity, nav) = setup();

        assert_eq!(controller.gate(Route::Profile), Route::Login);
        assert_eq!(controller.gate(Route::SignUp), Route::SignUp);
        assert_eq!(controller.open(Route::Home), Route::Login);
        assert_eq!(nav.last(), Some(NavigationIntent::Push(Route::Login)));
        assert_eq!(controller.start_route(), Route::Onboarding);
    }
}
