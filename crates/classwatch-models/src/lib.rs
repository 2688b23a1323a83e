//! # Classwatch Models
//!
//! Domain models and wire DTOs shared across the Classwatch crates.
//!
//! - [`ids`]: Strongly-typed ID newtypes
//! - [`users`]: The session [`User`] and the remote [`Profile`] it is built from
//! - [`auth`]: Login [`Credentials`], the token response, and the opaque [`AuthToken`]
//! - [`navigation`]: Route requirements and the grouped menu tree
//!
//! # Example
//!
//! ```
//! use classwatch_core::{Permission, Role};
//! use classwatch_models::navigation::RouteRequirement;
//!
//! let requirement = RouteRequirement::permission(Permission::UserView).with_role(Role::Admin);
//! assert_eq!(requirement.redirect_path, "/login");
//! assert_eq!(requirement.unauthorized_path, "/unauthorized");
//! ```

pub mod auth;
pub mod ids;
pub mod navigation;
pub mod users;

// Re-export commonly used types at crate root
pub use auth::{AuthToken, Credentials, TokenResponse};
pub use ids::UserId;
pub use navigation::{MenuEntry, MenuGroup, RouteRequirement};
pub use users::{AccountStatus, Profile, ProfileError, User};
