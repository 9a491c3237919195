//! Route gating as a pure decision.
//!
//! The decision (allow / redirect where) is separated from the navigation
//! side effect so it can be tested without any UI. The caller is expected to
//! render a loading placeholder while the check runs and to render nothing
//! once a redirect has been decided.
//!
//! - No IO
//! - No panics

use crate::role::Role;
use crate::session::SessionView;

/// What a protected area requires of the visitor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Any logged-in account (seller or admin).
    Authenticated,
    /// Admin accounts only.
    Admin,
}

/// Where a denied visitor is sent.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Destination {
    Login,
    SellerDashboard,
    AdminHome,
    Catalog,
}

/// Outcome of a gate check.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Redirect(Destination),
}

/// Decide access for a visitor against a protected area.
///
/// Unauthenticated visitors go to login; authenticated visitors of the wrong
/// role go to the default area for their own role.
pub fn decide(session: &SessionView, requirement: RouteRequirement) -> AccessDecision {
    let role = match session {
        SessionView::Anonymous => return AccessDecision::Redirect(Destination::Login),
        SessionView::Authenticated { role } => *role,
    };

    match requirement {
        RouteRequirement::Authenticated => AccessDecision::Allow,
        RouteRequirement::Admin => {
            if role.is_admin() {
                AccessDecision::Allow
            } else {
                AccessDecision::Redirect(Destination::SellerDashboard)
            }
        }
    }
}

/// Default landing area for a logged-in role.
pub fn home_for(role: Role) -> Destination {
    match role {
        Role::Seller => Destination::SellerDashboard,
        Role::Admin => Destination::AdminHome,
    }
}
