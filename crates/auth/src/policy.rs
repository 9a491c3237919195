//! Admin user-management action policy.
//!
//! The distinguished (seed) admin account is exempt from promotion, demotion
//! and deletion by other admins. The UI omits those controls entirely rather
//! than relying on the backend to reject the request.

use crate::role::Role;
use crate::session::StoredUser;

/// Actions an admin may take on another account.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UserAction {
    PromoteToAdmin,
    DemoteToSeller,
    DeleteAccount,
}

/// The action controls shown for `target` when `acting` is the admin viewing
/// the user list. Pure policy, no IO.
pub fn available_actions(acting: &StoredUser, target: &StoredUser) -> Vec<UserAction> {
    if !acting.role.is_admin() {
        return Vec::new();
    }
    if target.is_original_admin {
        return Vec::new();
    }
    // Admins do not manage their own row from the user list.
    if acting.id == target.id {
        return Vec::new();
    }

    match target.role {
        Role::Seller => vec![UserAction::PromoteToAdmin, UserAction::DeleteAccount],
        Role::Admin => vec![UserAction::DemoteToSeller, UserAction::DeleteAccount],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ampunv_core::UserId;

    fn user(id: i64, role: Role, original: bool) -> StoredUser {
        StoredUser {
            id: UserId::new(id),
            firstname: "A".into(),
            lastname: "B".into(),
            email: format!("u{id}@example.com"),
            role,
            city_id: None,
            is_original_admin: original,
        }
    }

    #[test]
    fn original_admin_has_no_actions_regardless_of_actor() {
        let seed = user(1, Role::Admin, true);
        let other_admin = user(2, Role::Admin, false);
        assert!(available_actions(&other_admin, &seed).is_empty());
    }

    #[test]
    fn seller_target_can_be_promoted_or_deleted() {
        let admin = user(1, Role::Admin, false);
        let seller = user(5, Role::Seller, false);
        assert_eq!(
            available_actions(&admin, &seller),
            vec![UserAction::PromoteToAdmin, UserAction::DeleteAccount]
        );
    }

    #[test]
    fn admin_target_can_be_demoted_or_deleted() {
        let admin = user(1, Role::Admin, false);
        let target = user(6, Role::Admin, false);
        assert_eq!(
            available_actions(&admin, &target),
            vec![UserAction::DemoteToSeller, UserAction::DeleteAccount]
        );
    }

    #[test]
    fn non_admin_actor_sees_nothing() {
        let seller = user(1, Role::Seller, false);
        let target = user(2, Role::Seller, false);
        assert!(available_actions(&seller, &target).is_empty());
    }

    #[test]
    fn actor_does_not_manage_their_own_row() {
        let admin = user(1, Role::Admin, false);
        assert!(available_actions(&admin, &admin).is_empty());
    }
}
