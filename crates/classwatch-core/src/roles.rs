//! Roles and the role-to-permission map.
//!
//! A user's [`Role`] is the only input to permission resolution: there are no
//! per-user overrides. The [`RolePermissionMap`] is built once, on first use,
//! and never mutated afterwards.
//!
//! | Role | Grants |
//! |------|--------|
//! | admin | the whole catalog |
//! | teacher | classroom work: students, classes, attendance, grades, recording incidents |
//! | counselor | student welfare: disciplinary cases, dropout risk, interventions, reports |
//! | student | own classes, subjects, attendance, grades |
//! | parent | their children's record, attendance, grades |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::permissions::{Permission, PermissionSet};

/// Error returned when a role name is not one of the known roles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Coarse-grained identity classification of a dashboard user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Counselor,
    Student,
    Parent,
}

impl Role {
    pub const ALL: &'static [Role] = &[
        Role::Admin,
        Role::Teacher,
        Role::Counselor,
        Role::Student,
        Role::Parent,
    ];

    /// Wire name of the role, as the remote API spells it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Counselor => "counselor",
            Role::Student => "student",
            Role::Parent => "parent",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Teacher => "Teacher",
            Role::Counselor => "Counselor",
            Role::Student => "Student",
            Role::Parent => "Parent",
        }
    }

    /// The permissions this role resolves to.
    pub fn permissions(self) -> &'static PermissionSet {
        role_permissions().get(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "counselor" => Ok(Role::Counselor),
            "student" => Ok(Role::Student),
            "parent" => Ok(Role::Parent),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

const TEACHER_GRANTS: &[Permission] = &[
    Permission::DashboardView,
    Permission::StudentView,
    Permission::ClassView,
    Permission::SubjectView,
    Permission::AttendanceView,
    Permission::AttendanceCreate,
    Permission::AttendanceEdit,
    Permission::GradeView,
    Permission::GradeEdit,
    Permission::DisciplinaryView,
    Permission::DisciplinaryCreate,
    Permission::DropoutRiskView,
    Permission::ReportsView,
];

const COUNSELOR_GRANTS: &[Permission] = &[
    Permission::DashboardView,
    Permission::StudentView,
    Permission::ClassView,
    Permission::DisciplinaryView,
    Permission::DisciplinaryCreate,
    Permission::DisciplinaryEdit,
    Permission::DropoutRiskView,
    Permission::DropoutRiskEdit,
    Permission::DropoutInterventionManage,
    Permission::ParentView,
    Permission::ReportsView,
    Permission::ReportsExport,
];

const STUDENT_GRANTS: &[Permission] = &[
    Permission::DashboardView,
    Permission::ClassView,
    Permission::SubjectView,
    Permission::AttendanceView,
    Permission::GradeView,
];

const PARENT_GRANTS: &[Permission] = &[
    Permission::DashboardView,
    Permission::StudentView,
    Permission::AttendanceView,
    Permission::GradeView,
];

/// Total mapping from [`Role`] to [`PermissionSet`].
///
/// One field per role, so a new role without an entry does not compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolePermissionMap {
    admin: PermissionSet,
    teacher: PermissionSet,
    counselor: PermissionSet,
    student: PermissionSet,
    parent: PermissionSet,
}

impl RolePermissionMap {
    fn build() -> Self {
        let grant = |perms: &[Permission]| perms.iter().copied().collect::<PermissionSet>();

        Self {
            admin: PermissionSet::all(),
            teacher: grant(TEACHER_GRANTS),
            counselor: grant(COUNSELOR_GRANTS),
            student: grant(STUDENT_GRANTS),
            parent: grant(PARENT_GRANTS),
        }
    }

    pub fn get(&self, role: Role) -> &PermissionSet {
        match role {
            Role::Admin => &self.admin,
            Role::Teacher => &self.teacher,
            Role::Counselor => &self.counselor,
            Role::Student => &self.student,
            Role::Parent => &self.parent,
        }
    }

    /// Looks a role up by its wire name.
    ///
    /// Unknown names resolve to the empty set rather than an error.
    pub fn get_by_name(&self, name: &str) -> PermissionSet {
        name.parse::<Role>()
            .map(|role| self.get(role).clone())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &PermissionSet)> {
        Role::ALL.iter().map(move |role| (*role, self.get(*role)))
    }
}

static ROLE_PERMISSIONS: LazyLock<RolePermissionMap> = LazyLock::new(RolePermissionMap::build);

/// The process-wide role map.
pub fn role_permissions() -> &'static RolePermissionMap {
    &ROLE_PERMISSIONS
}

/// Resolves a role into an owned permission set.
pub fn permissions_for(role: Role) -> PermissionSet {
    role_permissions().get(role).clone()
}

/// Resolves a role name into a permission set, failing closed on unknown names.
pub fn permissions_for_name(name: &str) -> PermissionSet {
    role_permissions().get_by_name(name)
}
