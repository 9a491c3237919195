//! `ampunv-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no HTTP, no UI concerns):
//! typed identifiers, the price value object, the domain error model, the
//! key-value storage abstraction, and client-side field validation.

pub mod error;
pub mod id;
pub mod price;
pub mod storage;
pub mod validate;

pub use error::{DomainError, DomainResult};
pub use id::{CityId, ColorId, FurnitureId, FurnitureTypeId, ImageId, MaterialId, UserId};
pub use price::Price;
pub use storage::{InMemoryStore, KeyValueStore};
