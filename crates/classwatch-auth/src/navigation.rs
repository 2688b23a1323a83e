//! Menu visibility.

use classwatch_models::{MenuEntry, MenuGroup};

use crate::guard::{role_allowed, satisfies};
use crate::session::Session;

/// Returns the entries of `groups` the session may see.
///
/// An entry survives when its requirement (if any) is satisfied and its
/// `allowed_roles` (if any) lists the user's role. Groups left empty are
/// dropped. Entry and group order is preserved. Non-authenticated sessions
/// see nothing.
pub fn filter(groups: &[MenuGroup], session: &Session) -> Vec<MenuGroup> {
    groups
        .iter()
        .filter_map(|group| {
            let entries: Vec<MenuEntry> = group
                .entries
                .iter()
                .filter(|entry| is_visible(entry, session))
                .cloned()
                .collect();

            (!entries.is_empty()).then(|| MenuGroup {
                title: group.title.clone(),
                entries,
            })
        })
        .collect()
}

pub fn is_visible(entry: &MenuEntry, session: &Session) -> bool {
    let requirement_met = match &entry.requirement {
        Some(requirement) => satisfies(requirement, session),
        None => session.is_authenticated(),
    };

    requirement_met && role_allowed(entry.allowed_roles.as_deref(), session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use classwatch_core::{Permission, Role};
    use classwatch_models::{AuthToken, RouteRequirement, User};

    fn signed_in(role: Role) -> Session {
        Session::authenticated(User::new(1, "Test User", role), AuthToken::new("tok"))
    }

    #[test]
    fn test_entry_without_requirement_visible_when_signed_in() {
        let entry = MenuEntry::new("Help", "/help");
        assert!(is_visible(&entry, &signed_in(Role::Student)));
        assert!(!is_visible(&entry, &Session::anonymous()));
    }

    #[test]
    fn test_allowed_roles_narrow_requirement() {
        let entry = MenuEntry::new("Risk", "/dropout-risk")
            .with_requirement(RouteRequirement::permission(Permission::DropoutRiskView))
            .with_allowed_roles([Role::Counselor]);

        assert!(is_visible(&entry, &signed_in(Role::Counselor)));
        // Teachers hold the permission but are not listed.
        assert!(!is_visible(&entry, &signed_in(Role::Teacher)));
    }

    #[test]
    fn test_empty_groups_dropped() {
        let groups = vec![
            MenuGroup::new(
                "Administration",
                vec![MenuEntry::new("Users", "/users")
                    .with_requirement(RouteRequirement::permission(Permission::UserView))],
            ),
            MenuGroup::new(
                "Overview",
                vec![MenuEntry::new("Dashboard", "/")
                    .with_requirement(RouteRequirement::permission(Permission::DashboardView))],
            ),
        ];

        let visible = filter(&groups, &signed_in(Role::Parent));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].title, "Overview");
    }

    #[test]
    fn test_loading_session_sees_nothing() {
        let groups = vec![MenuGroup::new("Overview", vec![MenuEntry::new("Dashboard", "/")])];
        assert!(filter(&groups, &Session::loading()).is_empty());
    }
}
