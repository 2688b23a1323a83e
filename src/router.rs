//! Dashboard route table.
//!
//! Each protected route carries the [`RouteRequirement`] its guard enforces.
//! Public routes (`/login`, `/unauthorized`) carry none. The menu reuses these
//! requirements so a link is shown exactly when its route would admit the
//! user.

use classwatch_core::{Permission, Role};
use classwatch_models::RouteRequirement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    /// `None` for public routes.
    pub requirement: Option<RouteRequirement>,
}

impl Route {
    pub fn public(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            requirement: None,
        }
    }

    pub fn protected(path: impl Into<String>, requirement: RouteRequirement) -> Self {
        Self {
            path: path.into(),
            requirement: Some(requirement),
        }
    }

    pub fn is_public(&self) -> bool {
        self.requirement.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the route serving `location`.
    ///
    /// Query strings and fragments are ignored. An exact match wins;
    /// otherwise the route with the longest path-segment prefix of `location`.
    pub fn lookup(&self, location: &str) -> Option<&Route> {
        let path = normalize(location);

        if let Some(route) = self.routes.iter().find(|r| r.path == path) {
            return Some(route);
        }

        self.routes
            .iter()
            .filter(|r| is_segment_prefix(&r.path, path))
            .max_by_key(|r| r.path.len())
    }

    /// Requirement of the route registered at exactly `path`.
    pub fn requirement(&self, path: &str) -> Option<&RouteRequirement> {
        self.routes
            .iter()
            .find(|r| r.path == path)
            .and_then(|r| r.requirement.as_ref())
    }
}

fn normalize(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    let path = &location[..end];
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

fn is_segment_prefix(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// The dashboard's routes.
pub fn dashboard_routes() -> RouteTable {
    use Permission as P;

    RouteTable::new(vec![
        Route::public("/login"),
        Route::public("/unauthorized"),
        Route::protected("/", RouteRequirement::permission(P::DashboardView)),
        Route::protected("/students", RouteRequirement::permission(P::StudentView)),
        Route::protected("/students/new", RouteRequirement::permission(P::StudentCreate)),
        Route::protected("/classes", RouteRequirement::permission(P::ClassView)),
        Route::protected("/subjects", RouteRequirement::permission(P::SubjectView)),
        Route::protected("/attendance", RouteRequirement::permission(P::AttendanceView)),
        Route::protected("/grades", RouteRequirement::permission(P::GradeView)),
        Route::protected("/disciplinary", RouteRequirement::permission(P::DisciplinaryView)),
        Route::protected("/dropout-risk", RouteRequirement::permission(P::DropoutRiskView)),
        Route::protected("/parents", RouteRequirement::permission(P::ParentView)),
        Route::protected("/reports", RouteRequirement::permission(P::ReportsView)),
        Route::protected(
            "/users",
            RouteRequirement::permission(P::UserView).with_role(Role::Admin),
        ),
        Route::protected("/admin", RouteRequirement::role(Role::Admin)),
    ])
}
