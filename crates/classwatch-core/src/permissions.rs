//! Permission catalog for the Classwatch dashboard.
//!
//! Every capability the dashboard gates is a variant of [`Permission`]. The set
//! is closed: an unknown tag is a parse error at the boundary, never a silent
//! `false` deep inside a check.
//!
//! Tags use the `area-action` form on the wire (`student-view`,
//! `disciplinary-delete`, ...). There is no hierarchy between permissions;
//! `student-edit` does not imply `student-view`.
//!
//! # Example
//!
//! ```
//! use classwatch_core::permissions::{Permission, PermissionArea};
//!
//! let p: Permission = "dropout-risk-view".parse().unwrap();
//! assert_eq!(p, Permission::DropoutRiskView);
//! assert_eq!(p.area(), PermissionArea::DropoutRisk);
//! assert_eq!(p.to_string(), "dropout-risk-view");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Error returned when a permission tag is not part of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);

/// Domain area a permission belongs to.
///
/// Used to group permissions for display; it carries no authorization meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionArea {
    Dashboard,
    Students,
    Classes,
    Subjects,
    Attendance,
    Grades,
    Disciplinary,
    DropoutRisk,
    Parents,
    Users,
    Reports,
}

impl PermissionArea {
    /// Human readable title of the area.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Students => "Student Management",
            Self::Classes => "Class Management",
            Self::Subjects => "Subject Management",
            Self::Attendance => "Attendance Management",
            Self::Grades => "Grade Management",
            Self::Disciplinary => "Disciplinary Management",
            Self::DropoutRisk => "Dropout Risk Management",
            Self::Parents => "Parent Management",
            Self::Users => "User Management",
            Self::Reports => "Reports",
        }
    }
}

/// Declares the [`Permission`] enum together with its wire tags and areas.
macro_rules! define_permissions {
    (
        $(
            $area:ident {
                $( $(#[$meta:meta])* $variant:ident => $tag:literal ),+ $(,)?
            }
        )+
    ) => {
        /// A fine-grained capability tag.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum Permission {
            $( $( $(#[$meta])* #[serde(rename = $tag)] $variant, )+ )+
        }

        impl Permission {
            /// Every permission in the catalog, in declaration order.
            pub const ALL: &'static [Permission] = &[ $( $( Permission::$variant, )+ )+ ];

            /// The wire tag of this permission.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( $( Permission::$variant => $tag, )+ )+
                }
            }

            /// The domain area this permission belongs to.
            pub const fn area(self) -> PermissionArea {
                match self {
                    $( $( Permission::$variant => PermissionArea::$area, )+ )+
                }
            }
        }
    };
}

define_permissions! {
    Dashboard {
        /// View the overview dashboard
        DashboardView => "dashboard-view",
    }
    Students {
        /// View student records
        StudentView => "student-view",
        /// Create student records
        StudentCreate => "student-create",
        /// Edit student records
        StudentEdit => "student-edit",
        /// Delete student records
        StudentDelete => "student-delete",
    }
    Classes {
        /// View classes
        ClassView => "class-view",
        /// Create classes
        ClassCreate => "class-create",
        /// Edit classes
        ClassEdit => "class-edit",
        /// Delete classes
        ClassDelete => "class-delete",
    }
    Subjects {
        /// View subjects
        SubjectView => "subject-view",
        /// Edit subjects and class-subject assignments
        SubjectEdit => "subject-edit",
    }
    Attendance {
        /// View attendance
        AttendanceView => "attendance-view",
        /// Record attendance
        AttendanceCreate => "attendance-create",
        /// Edit recorded attendance
        AttendanceEdit => "attendance-edit",
    }
    Grades {
        /// View grades
        GradeView => "grade-view",
        /// Enter and edit grades
        GradeEdit => "grade-edit",
    }
    Disciplinary {
        /// View disciplinary records
        DisciplinaryView => "disciplinary-view",
        /// Create disciplinary records
        DisciplinaryCreate => "disciplinary-create",
        /// Edit disciplinary records
        DisciplinaryEdit => "disciplinary-edit",
        /// Delete disciplinary records
        DisciplinaryDelete => "disciplinary-delete",
    }
    DropoutRisk {
        /// View dropout-risk predictions and analytics
        DropoutRiskView => "dropout-risk-view",
        /// Request new predictions and edit risk assessments
        DropoutRiskEdit => "dropout-risk-edit",
        /// Manage interventions for at-risk students
        DropoutInterventionManage => "dropout-intervention-manage",
    }
    Parents {
        /// View parent records
        ParentView => "parent-view",
        /// Create parent records
        ParentCreate => "parent-create",
        /// Edit parent records
        ParentEdit => "parent-edit",
        /// Delete parent records
        ParentDelete => "parent-delete",
    }
    Users {
        /// View dashboard user accounts
        UserView => "user-view",
        /// Create dashboard user accounts
        UserCreate => "user-create",
        /// Edit dashboard user accounts
        UserEdit => "user-edit",
        /// Delete dashboard user accounts
        UserDelete => "user-delete",
    }
    Reports {
        /// View reports
        ReportsView => "reports-view",
        /// Export reports
        ReportsExport => "reports-export",
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        Permission::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == tag)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// An immutable set of permissions.
///
/// Sets are built once from the role map and replaced wholesale; there is
/// no `insert`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeSet<Permission>);

impl PermissionSet {
    /// The empty set.
    pub fn empty() -> Self {
        Self(BTreeSet::new())
    }

    /// The whole catalog.
    pub fn all() -> Self {
        Permission::ALL.iter().copied().collect()
    }

    pub fn contains(&self, permission: Permission) -> bool {
        self.0.contains(&permission)
    }

    /// True if every permission in `permissions` is held.
    pub fn contains_all(&self, permissions: &[Permission]) -> bool {
        permissions.iter().all(|p| self.contains(*p))
    }

    /// True if at least one permission in `permissions` is held.
    pub fn contains_any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.contains(*p))
    }

    pub fn is_subset(&self, other: &PermissionSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unique() {
        let tags: BTreeSet<&str> = Permission::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(tags.len(), Permission::ALL.len());
    }

    #[test]
    fn test_parse_every_tag() {
        for permission in Permission::ALL {
            let parsed: Permission = permission.as_str().parse().unwrap();
            assert_eq!(parsed, *permission);
        }
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "students:read".parse::<Permission>().unwrap_err();
        assert_eq!(err, UnknownPermission("students:read".to_string()));
        assert!("".parse::<Permission>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_tag() {
        for permission in Permission::ALL {
            let json = serde_json::to_string(permission).unwrap();
            assert_eq!(json, format!("\"{}\"", permission.as_str()));
        }
    }

    #[test]
    fn test_area_grouping() {
        assert_eq!(Permission::DashboardView.area(), PermissionArea::Dashboard);
        assert_eq!(Permission::ClassEdit.area(), PermissionArea::Classes);
        assert_eq!(
            Permission::DropoutInterventionManage.area(),
            PermissionArea::DropoutRisk
        );
        assert_eq!(Permission::ReportsExport.area(), PermissionArea::Reports);
    }

    #[test]
    fn test_permission_set_queries() {
        let set: PermissionSet = [Permission::StudentView, Permission::ClassView]
            .into_iter()
            .collect();

        assert!(set.contains(Permission::StudentView));
        assert!(!set.contains(Permission::StudentDelete));
        assert!(set.contains_all(&[Permission::StudentView, Permission::ClassView]));
        assert!(!set.contains_all(&[Permission::StudentView, Permission::UserView]));
        assert!(set.contains_any(&[Permission::UserView, Permission::ClassView]));
        assert!(!set.contains_any(&[]));
        assert!(set.is_subset(&PermissionSet::all()));
        assert!(PermissionSet::empty().is_empty());
    }
}
