//! User domain models and the remote profile DTO.
//!
//! The remote API answers the profile fetch with a [`Profile`]. The session only
//! keeps the three fields authorization needs, as a [`User`].

use classwatch_core::Role;
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// The authenticated user as the session sees it.
///
/// `role` is authoritative for permission resolution; there are no per-user
/// permission overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub display_name: String,
    pub role: Role,
}

impl User {
    pub fn new(id: impl Into<UserId>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
        }
    }
}

/// Account state reported by the remote API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Inactive,
    Suspended,
}

/// Response body of the remote profile fetch (`GET /auth/me`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub username: String,
    pub full_name: String,
    #[serde(default)]
    pub email: Option<String>,
    /// Kept as a string so an unrecognised role is rejected at conversion
    /// rather than failing the whole body.
    pub role: String,
    pub account_status: AccountStatus,
}

/// Reasons a [`Profile`] cannot become a session [`User`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("profile carries unknown role '{0}'")]
    UnknownRole(String),

    #[error("account is {0:?}")]
    AccountNotActive(AccountStatus),
}

impl TryFrom<Profile> for User {
    type Error = ProfileError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        if profile.account_status != AccountStatus::Active {
            return Err(ProfileError::AccountNotActive(profile.account_status));
        }

        let role = profile
            .role
            .parse::<Role>()
            .map_err(|_| ProfileError::UnknownRole(profile.role.clone()))?;

        let display_name = if profile.full_name.trim().is_empty() {
            profile.username
        } else {
            profile.full_name
        };

        Ok(User {
            id: profile.user_id,
            display_name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str, status: AccountStatus) -> Profile {
        Profile {
            user_id: UserId::new(3),
            username: "tran.b".to_string(),
            full_name: "Tran Thi B".to_string(),
            email: Some("tran.b@school.test".to_string()),
            role: role.to_string(),
            account_status: status,
        }
    }

    #[test]
    fn test_profile_converts_to_user() {
        let user = User::try_from(profile("counselor", AccountStatus::Active)).unwrap();
        assert_eq!(user.id, UserId::new(3));
        assert_eq!(user.display_name, "Tran Thi B");
        assert_eq!(user.role, Role::Counselor);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = User::try_from(profile("principal", AccountStatus::Active)).unwrap_err();
        assert_eq!(err, ProfileError::UnknownRole("principal".to_string()));
    }

    #[test]
    fn test_inactive_account_is_rejected() {
        let err = User::try_from(profile("teacher", AccountStatus::Suspended)).unwrap_err();
        assert_eq!(err, ProfileError::AccountNotActive(AccountStatus::Suspended));
    }

    #[test]
    fn test_blank_full_name_falls_back_to_username() {
        let mut p = profile("student", AccountStatus::Active);
        p.full_name = "  ".to_string();
        let user = User::try_from(p).unwrap();
        assert_eq!(user.display_name, "tran.b");
    }

    #[test]
    fn test_profile_deserializes_remote_body() {
        let body = r#"{
            "user_id": 12,
            "username": "admin",
            "full_name": "Admin User",
            "email": "admin@example.com",
            "phone": "0901234567",
            "role": "admin",
            "account_status": "active",
            "created_at": "2025-05-21T22:28:56"
        }"#;
        let profile: Profile = serde_json::from_str(body).unwrap();
        assert_eq!(profile.user_id, UserId::new(12));
        assert_eq!(profile.role, "admin");
        assert_eq!(profile.account_status, AccountStatus::Active);
    }
}
