//! Route requirements and the grouped navigation menu.
//!
//! These types are declared by routing configuration and handed to the guard
//! and the navigation filter; they are immutable once built.
//!
//! Menu entries and routes share [`RouteRequirement`], so a link is shown
//! under exactly the conditions its target route would admit.

use classwatch_core::{Permission, Role};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Access requirement of a protected route or menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequirement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_permission: Option<Permission>,

    /// Role gate for UI-only sections. Prefer `required_permission`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_role: Option<Role>,

    /// Holders of this role skip the permission and role checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exempt_role: Option<Role>,

    /// Where anonymous sessions are sent.
    #[serde(default = "default_login_path")]
    pub redirect_path: String,

    /// Where authenticated sessions lacking access are sent.
    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_unauthorized_path() -> String {
    DEFAULT_UNAUTHORIZED_PATH.to_string()
}

impl Default for RouteRequirement {
    /// Authentication only: any signed-in user is admitted.
    fn default() -> Self {
        Self {
            required_permission: None,
            required_role: None,
            exempt_role: None,
            redirect_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
        }
    }
}

impl RouteRequirement {
    /// Requires a signed-in session and nothing else.
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn permission(permission: Permission) -> Self {
        Self {
            required_permission: Some(permission),
            ..Self::default()
        }
    }

    pub fn role(role: Role) -> Self {
        Self {
            required_role: Some(role),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.required_role = Some(role);
        self
    }

    pub fn with_exempt_role(mut self, role: Role) -> Self {
        self.exempt_role = Some(role);
        self
    }

    pub fn with_redirect_path(mut self, path: impl Into<String>) -> Self {
        self.redirect_path = path.into();
        self
    }

    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }
}

/// A single navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub label: String,
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<RouteRequirement>,

    /// When present, only these roles see the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
}

impl MenuEntry {
    /// An entry visible to every session handed a menu.
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
            requirement: None,
            allowed_roles: None,
        }
    }

    pub fn with_requirement(mut self, requirement: RouteRequirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    pub fn with_allowed_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }
}

/// A titled, ordered group of menu entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl MenuGroup {
    pub fn new(title: impl Into<String>, entries: Vec<MenuEntry>) -> Self {
        Self {
            title: title.into(),
            entries,
        }
    }
}
