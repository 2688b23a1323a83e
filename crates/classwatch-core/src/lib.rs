//! # Classwatch Core
//!
//! The permission catalog for the Classwatch dashboard.
//!
//! This crate is the leaf of the workspace and holds the static access-control
//! vocabulary every other crate speaks:
//!
//! - [`permissions`]: The closed set of [`Permission`] tags, grouped by
//!   [`PermissionArea`], and the immutable [`PermissionSet`]
//! - [`roles`]: The closed set of [`Role`]s and the [`RolePermissionMap`]
//!
//! # Example
//!
//! ```
//! use classwatch_core::{Permission, Role, permissions_for};
//!
//! let teacher = permissions_for(Role::Teacher);
//! assert!(teacher.contains(Permission::StudentView));
//! assert!(!teacher.contains(Permission::UserDelete));
//!
//! // Admin always holds the whole catalog.
//! assert_eq!(permissions_for(Role::Admin).len(), Permission::ALL.len());
//! ```

pub mod permissions;
pub mod roles;

// Re-export commonly used types at crate root
pub use permissions::{Permission, PermissionArea, PermissionSet, UnknownPermission};
pub use roles::{
    Role, RolePermissionMap, UnknownRole, permissions_for, permissions_for_name, role_permissions,
};
