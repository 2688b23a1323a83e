//! The dashboard's grouped navigation menu.

use std::fs;
use std::path::Path;

use anyhow::Context;
use classwatch_core::Role;
use classwatch_models::{MenuEntry, MenuGroup};

use crate::router::RouteTable;

/// Builds the default sidebar. Entries take their requirement from the route
/// they link to.
pub fn default_menu(routes: &RouteTable) -> Vec<MenuGroup> {
    let link = |label: &str, target: &str| {
        let entry = MenuEntry::new(label, target);
        match routes.requirement(target) {
            Some(requirement) => entry.with_requirement(requirement.clone()),
            None => entry,
        }
    };

    vec![
        MenuGroup::new("Overview", vec![link("Dashboard", "/")]),
        MenuGroup::new(
            "Academics",
            vec![
                link("Students", "/students"),
                link("Classes", "/classes"),
                link("Subjects", "/subjects"),
                link("Attendance", "/attendance"),
                link("Grades", "/grades"),
            ],
        ),
        MenuGroup::new(
            "Monitoring & Analytics",
            vec![
                link("Disciplinary", "/disciplinary"),
                link("Dropout Risk", "/dropout-risk"),
            ],
        ),
        MenuGroup::new(
            "Reports & Administration",
            vec![
                link("Reports", "/reports"),
                link("Parents", "/parents"),
                link("Users", "/users").with_allowed_roles([Role::Admin]),
            ],
        ),
    ]
}

/// Reads a menu definition: a JSON array of groups.
pub fn load_menu(path: &Path) -> anyhow::Result<Vec<MenuGroup>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read menu file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("invalid menu definition in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::dashboard_routes;
    use classwatch_core::Permission;

    #[test]
    fn test_default_menu_reuses_route_requirements() {
        let routes = dashboard_routes();
        let menu = default_menu(&routes);

        let students = &menu[1].entries[0];
        assert_eq!(students.target, "/students");
        assert_eq!(
            students.requirement.as_ref().and_then(|r| r.required_permission),
            Some(Permission::StudentView)
        );

        let users = &menu[3].entries[2];
        assert_eq!(users.allowed_roles.as_deref(), Some(&[Role::Admin][..]));
        assert_eq!(users.requirement.as_ref(), routes.requirement("/users"));
    }

    #[test]
    fn test_load_menu_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        fs::write(
            &path,
            r#"[{"title":"Overview","entries":[{"label":"Home","target":"/","requirement":{"required_permission":"dashboard-view"}}]}]"#,
        )
        .unwrap();

        let menu = load_menu(&path).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].entries[0].label, "Home");
    }

    #[test]
    fn test_load_menu_missing_file() {
        let err = load_menu(Path::new("/nonexistent/menu.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read menu file"));
    }
}
