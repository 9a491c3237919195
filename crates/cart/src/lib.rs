//! `ampunv-cart` — the buyer's locally persisted shopping cart.
//!
//! Each listing is a unique physical object, so the cart is an ordered set:
//! at most one entry per furniture id, no quantities. State lives in an
//! injected key-value store; every mutation broadcasts a payloadless
//! `CartChanged` signal and interested views re-read through the getters.

pub mod cart;
pub mod notify;

pub use cart::{CART_KEY, CartItem, CartManager};
pub use notify::{CartChanged, CartSubscription};
