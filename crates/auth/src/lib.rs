//! `ampunv-auth` — session storage, roles, and route gating.
//!
//! Authentication itself happens on the backend; this crate holds the
//! persisted identity (token + user record), answers role questions, and
//! makes pure allow/deny/redirect decisions for protected areas.

pub mod gate;
pub mod policy;
pub mod role;
pub mod session;

pub use gate::{AccessDecision, Destination, RouteRequirement, decide};
pub use policy::{UserAction, available_actions};
pub use role::Role;
pub use session::{AuthToken, SessionStore, SessionView, StoredUser};
