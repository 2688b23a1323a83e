//! The session store: single owner of the process-wide [`Session`].
//!
//! Every transition replaces the snapshot held by a `tokio::sync::watch`
//! channel, so readers never observe a half-applied change and observers can
//! [`subscribe`](SessionStore::subscribe) to transitions. At most one Loading
//! transition runs at a time; a `login` or `initialize` started while another
//! is in flight is rejected and leaves the state alone. A `logout` during an
//! in-flight transition wins: the transition ends as cancelled and neither
//! the session nor the persisted credential is overwritten.
//!
//! Lifecycle:
//!
//! ```text
//! Uninitialized ──initialize──▶ Loading ──▶ Authenticated | Anonymous
//!      │                                       ▲     │
//!      └──────────login──────▶ Loading ────────┘     │ logout
//!                                                    ▼
//!                                                Anonymous
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};
use validator::Validate;

use classwatch_core::{Permission, Role};
use classwatch_models::{AuthToken, Credentials, MenuGroup, RouteRequirement, User};

use crate::claims;
use crate::guard::{self, Action};
use crate::metrics::{
    track_login_failure, track_login_success, track_logout, track_session_restore,
};
use crate::navigation;
use crate::provider::{AuthProvider, ProviderError};
use crate::session::{Session, SessionStatus};
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStore};

/// Why a login attempt ended in an anonymous session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LoginFailure {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("user profile could not be loaded")]
    ProfileUnavailable,

    #[error("could not reach the authentication service")]
    NetworkError,

    #[error("account is disabled")]
    AccountDisabled,

    /// Another login or initialize is in flight. State was not touched.
    #[error("another sign-in is already in progress")]
    AlreadyInProgress,

    /// A logout happened while the login was in flight.
    #[error("sign-in was cancelled by a logout")]
    Cancelled,
}

impl LoginFailure {
    /// Stable kebab-case tag, used as a metrics label.
    pub const fn reason(self) -> &'static str {
        match self {
            LoginFailure::InvalidCredentials => "invalid-credentials",
            LoginFailure::ProfileUnavailable => "profile-unavailable",
            LoginFailure::NetworkError => "network-error",
            LoginFailure::AccountDisabled => "account-disabled",
            LoginFailure::AlreadyInProgress => "already-in-progress",
            LoginFailure::Cancelled => "cancelled",
        }
    }
}

/// What [`SessionStore::initialize`] found. Callers may ignore it; the
/// resulting state is visible through the store either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Nothing persisted; the session is anonymous.
    NoCredential,
    /// The persisted credential was accepted.
    Restored,
    /// The persisted credential was expired or rejected and has been cleared.
    StaleCredential,
    /// The provider could not be reached; the credential has been cleared.
    NetworkError,
    /// `initialize` already ran, or a login already settled the session.
    AlreadyInitialized,
    /// A login is in flight.
    AlreadyInProgress,
    /// A logout happened while the credential was being validated.
    Cancelled,
}

impl InitOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            InitOutcome::NoCredential => "no-credential",
            InitOutcome::Restored => "restored",
            InitOutcome::StaleCredential => "stale-credential",
            InitOutcome::NetworkError => "network-error",
            InitOutcome::AlreadyInitialized => "already-initialized",
            InitOutcome::AlreadyInProgress => "already-in-progress",
            InitOutcome::Cancelled => "cancelled",
        }
    }
}

pub struct SessionStore<P, S> {
    provider: P,
    storage: S,
    state: watch::Sender<Session>,
    flight: Mutex<()>,
    initialized: AtomicBool,
    /// Bumped by every logout. A transition that began under an older value
    /// may not commit.
    generation: AtomicU64,
}

impl<P, S> SessionStore<P, S>
where
    P: AuthProvider,
    S: KeyValueStore,
{
    /// Creates a store in the Uninitialized state.
    pub fn new(provider: P, storage: S) -> Self {
        let (state, _) = watch::channel(Session::uninitialized());
        Self {
            provider,
            storage,
            state,
            flight: Mutex::new(()),
            initialized: AtomicBool::new(false),
            generation: AtomicU64::new(0),
        }
    }

    /// Restores a persisted credential, if any.
    ///
    /// Only the first call does anything; it also does nothing once a login
    /// has settled the session.
    pub async fn initialize(&self) -> InitOutcome {
        let Ok(_flight) = self.flight.try_lock() else {
            debug!("Initialize rejected, a sign-in is in flight");
            return InitOutcome::AlreadyInProgress;
        };

        if self.initialized.swap(true, Ordering::SeqCst)
            || self.status() != SessionStatus::Uninitialized
        {
            return InitOutcome::AlreadyInitialized;
        }

        let outcome = self.restore().await;
        track_session_restore(outcome.as_str());
        outcome
    }

    async fn restore(&self) -> InitOutcome {
        let generation = self.generation.load(Ordering::SeqCst);
        let raw = match self.storage.get(AUTH_TOKEN_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted credential");
                None
            }
        };

        let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
            debug!("No persisted credential");
            self.discard_credential();
            self.transition(Session::anonymous());
            return InitOutcome::NoCredential;
        };

        let token = AuthToken::new(raw);
        if claims::is_expired(&token) {
            info!("Persisted credential has expired, discarding");
            self.discard_credential();
            self.transition(Session::anonymous());
            return InitOutcome::StaleCredential;
        }

        self.transition(Session::loading());

        match self.resolve_user(&token).await {
            Ok(user) => {
                let (user_id, role) = (user.id, user.role);
                if !self.commit(generation, Session::authenticated(user, token)) {
                    info!("Logged out while restoring the session, dropping credential");
                    return InitOutcome::Cancelled;
                }
                info!(user_id = %user_id, role = %role, "Session restored");
                InitOutcome::Restored
            }
            Err(failure) => {
                info!(reason = failure.reason(), "Persisted credential rejected, discarding");
                self.discard_credential();
                self.transition(Session::anonymous());
                match failure {
                    LoginFailure::NetworkError => InitOutcome::NetworkError,
                    _ => InitOutcome::StaleCredential,
                }
            }
        }
    }

    /// Signs in with `credentials`.
    ///
    /// Every failure except [`LoginFailure::AlreadyInProgress`] leaves the
    /// session Anonymous with no persisted credential. A `logout` while the
    /// login is suspended makes it fail with [`LoginFailure::Cancelled`].
    pub async fn login(&self, credentials: &Credentials) -> Result<User, LoginFailure> {
        let Ok(_flight) = self.flight.try_lock() else {
            debug!(username = %credentials.username, "Login rejected, a sign-in is in flight");
            track_login_failure(LoginFailure::AlreadyInProgress.reason());
            return Err(LoginFailure::AlreadyInProgress);
        };
        self.initialized.store(true, Ordering::SeqCst);
        let generation = self.generation.load(Ordering::SeqCst);

        if credentials.validate().is_err() {
            debug!("Login rejected, blank username or password");
            return self.fail_login(LoginFailure::InvalidCredentials);
        }

        self.transition(Session::loading());
        debug!(username = %credentials.username, "Authenticating");

        let token = match self.provider.authenticate(credentials).await {
            Ok(token) => token,
            Err(e) => {
                debug!(error = %e, "Authentication failed");
                return self.fail_login(authenticate_failure(&e));
            }
        };

        if self.is_superseded(generation) {
            return self.cancel_login();
        }

        if let Err(e) = self.storage.set(AUTH_TOKEN_KEY, token.expose()) {
            // The in-process session is still usable; it just won't survive a restart.
            warn!(error = %e, "Failed to persist credential");
        }

        let user = match self.resolve_user(&token).await {
            Ok(user) => user,
            Err(_) if self.is_superseded(generation) => {
                self.discard_credential();
                return self.cancel_login();
            }
            Err(failure) => return self.fail_login(failure),
        };

        if !self.commit(generation, Session::authenticated(user.clone(), token)) {
            // Nothing else can have persisted a credential while we hold the flight lock.
            self.discard_credential();
            return self.cancel_login();
        }

        info!(user_id = %user.id, role = %user.role, "User logged in");
        track_login_success(user.role.as_str());
        Ok(user)
    }

    /// Signs out. Never fails; persistence errors are logged.
    pub fn logout(&self) {
        let was_authenticated = self.state.borrow().is_authenticated();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.discard_credential();
        self.transition(Session::anonymous());
        self.initialized.store(true, Ordering::SeqCst);

        if was_authenticated {
            info!("User logged out");
        }
        track_logout();
    }

    async fn resolve_user(&self, token: &AuthToken) -> Result<User, LoginFailure> {
        let profile = self
            .provider
            .fetch_profile(token)
            .await
            .map_err(|e| {
                debug!(error = %e, "Profile fetch failed");
                profile_failure(&e)
            })?;

        User::try_from(profile).map_err(|e| {
            warn!(error = %e, "Profile cannot be used for a session");
            LoginFailure::ProfileUnavailable
        })
    }

    fn fail_login(&self, failure: LoginFailure) -> Result<User, LoginFailure> {
        self.discard_credential();
        self.transition(Session::anonymous());
        track_login_failure(failure.reason());
        Err(failure)
    }

    fn cancel_login(&self) -> Result<User, LoginFailure> {
        info!("Logged out while signing in, dropping credential");
        track_login_failure(LoginFailure::Cancelled.reason());
        Err(LoginFailure::Cancelled)
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    /// Publishes `next` unless a logout has happened since `generation` was read.
    ///
    /// The check runs under the channel's write lock, so a logout either
    /// lands before it (and `next` is dropped) or overwrites `next` after.
    fn commit(&self, generation: u64, next: Session) -> bool {
        let to = next.status();
        let committed = self.state.send_if_modified(|current| {
            if self.is_superseded(generation) {
                return false;
            }
            *current = next;
            true
        });
        if committed {
            debug!(to = %to, "Session transition");
        }
        committed
    }

    fn discard_credential(&self) {
        if let Err(e) = self.storage.remove(AUTH_TOKEN_KEY) {
            warn!(error = %e, "Failed to discard persisted credential");
        }
    }

    fn transition(&self, next: Session) {
        let previous = self.state.send_replace(next);
        debug!(from = %previous.status(), to = %self.status(), "Session transition");
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> SessionStatus {
        self.state.borrow().status()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Receives a snapshot after every transition.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.state.borrow().has_permission(permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.state.borrow().has_any_permission(permissions)
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        self.state.borrow().has_all_permissions(permissions)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.state.borrow().has_role(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.state.borrow().has_any_role(roles)
    }

    /// Guard decision for `location` against the current session.
    pub fn decide(&self, requirement: &RouteRequirement, location: &str) -> Action {
        guard::decide(requirement, &self.state.borrow(), location)
    }

    /// Visible subset of `groups` for the current session.
    pub fn filter_menu(&self, groups: &[MenuGroup]) -> Vec<MenuGroup> {
        navigation::filter(groups, &self.state.borrow())
    }
}

fn authenticate_failure(err: &ProviderError) -> LoginFailure {
    match err {
        ProviderError::InvalidCredentials | ProviderError::Unauthorized => {
            LoginFailure::InvalidCredentials
        }
        ProviderError::AccountDisabled => LoginFailure::AccountDisabled,
        ProviderError::Network(_) | ProviderError::UnexpectedResponse(_) => {
            LoginFailure::NetworkError
        }
    }
}

fn profile_failure(err: &ProviderError) -> LoginFailure {
    match err {
        ProviderError::Network(_) => LoginFailure::NetworkError,
        ProviderError::AccountDisabled => LoginFailure::AccountDisabled,
        ProviderError::InvalidCredentials
        | ProviderError::Unauthorized
        | ProviderError::UnexpectedResponse(_) => LoginFailure::ProfileUnavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate_failure_mapping() {
        assert_eq!(
            authenticate_failure(&ProviderError::InvalidCredentials),
            LoginFailure::InvalidCredentials
        );
        assert_eq!(
            authenticate_failure(&ProviderError::AccountDisabled),
            LoginFailure::AccountDisabled
        );
        assert_eq!(
            authenticate_failure(&ProviderError::Network("refused".into())),
            LoginFailure::NetworkError
        );
        assert_eq!(
            authenticate_failure(&ProviderError::UnexpectedResponse("502".into())),
            LoginFailure::NetworkError
        );
    }

    #[test]
    fn test_profile_failure_mapping() {
        assert_eq!(
            profile_failure(&ProviderError::Unauthorized),
            LoginFailure::ProfileUnavailable
        );
        assert_eq!(
            profile_failure(&ProviderError::Network("timeout".into())),
            LoginFailure::NetworkError
        );
        assert_eq!(
            profile_failure(&ProviderError::AccountDisabled),
            LoginFailure::AccountDisabled
        );
    }

    #[test]
    fn test_reasons_are_kebab_case() {
        for failure in [
            LoginFailure::InvalidCredentials,
            LoginFailure::ProfileUnavailable,
            LoginFailure::NetworkError,
            LoginFailure::AccountDisabled,
            LoginFailure::AlreadyInProgress,
            LoginFailure::Cancelled,
        ] {
            let reason = failure.reason();
            assert!(reason.chars().all(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }
}
