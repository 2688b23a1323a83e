mod common;

use classwatch_core::{
    Permission, PermissionSet, Role, permissions_for, permissions_for_name, role_permissions,
};
use common::{signed_in, unauthenticated_sessions};

#[test]
fn test_has_permission_matches_role_map_for_every_role_and_permission() {
    for role in Role::ALL {
        let session = signed_in(*role);
        let granted = permissions_for(*role);
        for permission in Permission::ALL {
            assert_eq!(
                session.has_permission(*permission),
                granted.contains(*permission),
                "{} / {}",
                role,
                permission
            );
        }
    }
}

#[test]
fn test_admin_holds_full_universe() {
    assert_eq!(permissions_for(Role::Admin), PermissionSet::all());
    assert_eq!(permissions_for(Role::Admin).len(), Permission::ALL.len());
}

#[test]
fn test_every_role_is_subset_of_admin() {
    let admin = permissions_for(Role::Admin);
    for (role, set) in role_permissions().iter() {
        assert!(set.is_subset(&admin), "{} exceeds admin", role);
    }
}

#[test]
fn test_only_admin_manages_users() {
    for role in Role::ALL.iter().filter(|r| **r != Role::Admin) {
        let set = permissions_for(*role);
        for permission in [
            Permission::UserView,
            Permission::UserCreate,
            Permission::UserEdit,
            Permission::UserDelete,
        ] {
            assert!(!set.contains(permission), "{} holds {}", role, permission);
        }
    }
}

#[test]
fn test_unknown_role_name_fails_closed() {
    assert!(permissions_for_name("principal").is_empty());
    assert!(permissions_for_name("").is_empty());
    assert_eq!(permissions_for_name("Teacher"), permissions_for(Role::Teacher));
}

#[test]
fn test_unauthenticated_sessions_hold_no_permission() {
    for session in unauthenticated_sessions() {
        for permission in Permission::ALL {
            assert!(!session.has_permission(*permission));
        }
        for role in Role::ALL {
            assert!(!session.has_role(*role));
        }
    }
}

#[test]
fn test_wire_tags_round_trip() {
    for permission in Permission::ALL {
        let parsed: Permission = permission.as_str().parse().unwrap();
        assert_eq!(parsed, *permission);
        assert_eq!(
            serde_json::to_string(permission).unwrap(),
            format!("\"{}\"", permission.as_str())
        );
    }
}
