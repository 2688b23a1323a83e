//! Route access decisions.
//!
//! [`decide`] turns a route's [`RouteRequirement`] and the current
//! [`Session`] into an [`Action`]. Rules, first match wins:
//!
//! 1. Uninitialized or Loading → [`Action::ShowLoading`]
//! 2. Not authenticated → redirect to `redirect_path`, remembering the location
//! 3. `exempt_role` held → [`Action::Allow`]
//! 4. `required_permission` not held → redirect to `unauthorized_path`
//! 5. `required_role` not held → redirect to `unauthorized_path`
//! 6. Otherwise → [`Action::Allow`]
//!
//! Rules 3–5 are [`satisfies`], which the navigation filter shares so that a
//! menu entry is visible exactly when its target would admit the user.

use classwatch_core::Role;
use classwatch_models::RouteRequirement;
use serde::Serialize;

use crate::session::Session;

/// Outcome of a route guard decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// The session is still settling; render a placeholder.
    ShowLoading,
    /// Navigate elsewhere. `from` is set on login redirects so the user can be
    /// returned after signing in.
    RedirectTo { path: String, from: Option<String> },
    Allow,
}

impl Action {
    pub fn is_allow(&self) -> bool {
        matches!(self, Action::Allow)
    }

    pub fn redirect_path(&self) -> Option<&str> {
        match self {
            Action::RedirectTo { path, .. } => Some(path),
            _ => None,
        }
    }
}

pub fn decide(requirement: &RouteRequirement, session: &Session, location: &str) -> Action {
    if session.is_pending() {
        return Action::ShowLoading;
    }

    if !session.is_authenticated() {
        return Action::RedirectTo {
            path: requirement.redirect_path.clone(),
            from: Some(location.to_string()),
        };
    }

    if satisfies(requirement, session) {
        Action::Allow
    } else {
        Action::RedirectTo {
            path: requirement.unauthorized_path.clone(),
            from: None,
        }
    }
}

/// Whether an authenticated session meets `requirement`.
///
/// Always false for sessions that are not authenticated.
pub fn satisfies(requirement: &RouteRequirement, session: &Session) -> bool {
    if !session.is_authenticated() {
        return false;
    }

    if requirement
        .exempt_role
        .is_some_and(|role| session.has_role(role))
    {
        return true;
    }

    if requirement
        .required_permission
        .is_some_and(|permission| !session.has_permission(permission))
    {
        return false;
    }

    !requirement
        .required_role
        .is_some_and(|role| !session.has_role(role))
}

/// Whether the session's role is listed in `allowed_roles`.
///
/// `None` admits every authenticated role; an empty list admits none.
pub fn role_allowed(allowed_roles: Option<&[Role]>, session: &Session) -> bool {
    match allowed_roles {
        None => session.is_authenticated(),
        Some(roles) => session.has_any_role(roles),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classwatch_core::Permission;
    use classwatch_models::{AuthToken, User};

    fn signed_in(role: Role) -> Session {
        Session::authenticated(User::new(1, "Test User", role), AuthToken::new("tok"))
    }

    #[test]
    fn test_pending_shows_loading() {
        let requirement = RouteRequirement::permission(Permission::StudentView);
        assert_eq!(
            decide(&requirement, &Session::uninitialized(), "/students"),
            Action::ShowLoading
        );
        assert_eq!(
            decide(&requirement, &Session::loading(), "/students"),
            Action::ShowLoading
        );
    }

    #[test]
    fn test_anonymous_redirects_to_login_with_location() {
        let requirement = RouteRequirement::authenticated().with_redirect_path("/signin");
        assert_eq!(
            decide(&requirement, &Session::anonymous(), "/grades?term=2"),
            Action::RedirectTo {
                path: "/signin".to_string(),
                from: Some("/grades?term=2".to_string()),
            }
        );
    }

    #[test]
    fn test_exempt_role_skips_checks() {
        let requirement = RouteRequirement::permission(Permission::UserDelete)
            .with_role(Role::Admin)
            .with_exempt_role(Role::Counselor);

        assert!(decide(&requirement, &signed_in(Role::Counselor), "/users").is_allow());
        assert_eq!(
            decide(&requirement, &signed_in(Role::Teacher), "/users").redirect_path(),
            Some("/unauthorized")
        );
    }

    #[test]
    fn test_permission_and_role_both_required() {
        let requirement = RouteRequirement::permission(Permission::UserView).with_role(Role::Admin);
        assert!(satisfies(&requirement, &signed_in(Role::Admin)));
        assert!(!satisfies(&requirement, &signed_in(Role::Counselor)));
    }

    #[test]
    fn test_denial_uses_custom_unauthorized_path() {
        let requirement =
            RouteRequirement::role(Role::Admin).with_unauthorized_path("/forbidden");
        assert_eq!(
            decide(&requirement, &signed_in(Role::Parent), "/admin"),
            Action::RedirectTo {
                path: "/forbidden".to_string(),
                from: None,
            }
        );
    }

    #[test]
    fn test_role_allowed() {
        let teacher = signed_in(Role::Teacher);
        assert!(role_allowed(None, &teacher));
        assert!(role_allowed(Some(&[Role::Teacher, Role::Admin][..]), &teacher));
        assert!(!role_allowed(Some(&[Role::Admin][..]), &teacher));
        assert!(!role_allowed(Some(&[][..]), &teacher));
        assert!(!role_allowed(None, &Session::anonymous()));
    }

    #[test]
    fn test_action_serializes_tagged() {
        let json = serde_json::to_value(Action::RedirectTo {
            path: "/login".to_string(),
            from: Some("/".to_string()),
        })
        .unwrap();
        assert_eq!(json["action"], "redirect_to");
        assert_eq!(json["path"], "/login");
    }
}
