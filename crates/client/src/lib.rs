//! `ampunv-client` — the backend gateway and the flows built on top of it.
//!
//! The REST backend is the sole source of truth. Every flow in this crate
//! follows the same contract: validate client-side first, send one request,
//! and only reflect a state change after the backend acknowledges it. On
//! failure the previously displayed state stays intact and the server's
//! message is surfaced verbatim. Nothing retries automatically.

// Gateway traits are consumed generically (never as trait objects), so the
// auto-trait caveat on public async trait methods does not apply here.
#![allow(async_fn_in_trait)]

pub mod account;
pub mod admin;
pub mod checkout;
pub mod dto;
pub mod error;
pub mod gateway;
pub mod http;
pub mod reference_cache;
pub mod seller;
pub mod success;

pub use account::{AccountDeletion, AccountFlow, ProfileEditor};
pub use admin::{AdminDesk, DeleteConfirmation, UserAdminDesk};
pub use checkout::Checkout;
pub use error::ApiError;
pub use gateway::{AuthApi, FurnitureApi, ImageApi, PaymentApi, ReferenceApi, UserApi};
pub use http::HttpGateway;
pub use reference_cache::ReferenceCache;
pub use seller::{CreateListingError, SellerDesk};
pub use success::{PaymentSuccess, complete_purchase};
