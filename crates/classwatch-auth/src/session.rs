//! Immutable session snapshots.
//!
//! A [`Session`] is a value: the [`SessionStore`](crate::store::SessionStore)
//! replaces it wholesale on every transition and hands out clones. The only
//! way to build an authenticated session is [`Session::authenticated`], which
//! resolves permissions through the role map, so a session's permissions are
//! always exactly those of its user's role.

use std::fmt;

use classwatch_core::{Permission, PermissionSet, Role, permissions_for};
use classwatch_models::{AuthToken, User};
use serde::Serialize;

/// Authentication lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Created, `initialize` has not run yet.
    Uninitialized,
    /// Validating a persisted credential or logging in.
    Loading,
    Anonymous,
    Authenticated,
}

impl SessionStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Uninitialized => "uninitialized",
            SessionStatus::Loading => "loading",
            SessionStatus::Anonymous => "anonymous",
            SessionStatus::Authenticated => "authenticated",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the process-wide authentication state.
///
/// `user`, `permissions` and the credential are populated only while
/// `status` is [`SessionStatus::Authenticated`].
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    status: SessionStatus,
    user: Option<User>,
    permissions: PermissionSet,
    credential: Option<AuthToken>,
}

impl Session {
    pub fn uninitialized() -> Self {
        Self::empty(SessionStatus::Uninitialized)
    }

    pub fn loading() -> Self {
        Self::empty(SessionStatus::Loading)
    }

    pub fn anonymous() -> Self {
        Self::empty(SessionStatus::Anonymous)
    }

    pub fn authenticated(user: User, credential: AuthToken) -> Self {
        Self {
            status: SessionStatus::Authenticated,
            permissions: permissions_for(user.role),
            user: Some(user),
            credential: Some(credential),
        }
    }

    fn empty(status: SessionStatus) -> Self {
        Self {
            status,
            user: None,
            permissions: PermissionSet::empty(),
            credential: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn auth_token(&self) -> Option<&AuthToken> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// True while the outcome of a transition is still unknown.
    pub fn is_pending(&self) -> bool {
        matches!(
            self.status,
            SessionStatus::Uninitialized | SessionStatus::Loading
        )
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.is_authenticated() && self.permissions.contains(permission)
    }

    pub fn has_any_permission(&self, permissions: &[Permission]) -> bool {
        self.is_authenticated() && self.permissions.contains_any(permissions)
    }

    pub fn has_all_permissions(&self, permissions: &[Permission]) -> bool {
        self.is_authenticated() && self.permissions.contains_all(permissions)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.is_authenticated() && self.role() == Some(role)
    }

    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.is_authenticated() && self.role().is_some_and(|r| roles.contains(&r))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::uninitialized()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("status", &self.status)
            .field("user", &self.user)
            .field("permissions", &self.permissions.len())
            .field("has_credential", &self.credential.is_some())
            .finish()
    }
}
