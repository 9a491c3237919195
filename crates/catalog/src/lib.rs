//! `ampunv-catalog` — listing projection and moderation state machine.
//!
//! This crate contains deterministic domain logic only (no IO, no HTTP):
//! the client's view of a listing, the legality of moderation transitions,
//! rejection reasons, catalog filtering, and the reference lookup tables.

pub mod filter;
pub mod furniture;
pub mod moderation;
pub mod reference;

pub use filter::CatalogFilter;
pub use furniture::{Furniture, ListingStatus};
pub use moderation::{ModerationAction, ModerationView, RejectionReason};
pub use reference::{City, Color, FurnitureType, Material, ReferenceData};
