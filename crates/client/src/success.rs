//! Payment-success flow.
//!
//! Reached with a payment confirmation token and the purchased listing ids.
//! With a token present the purchased items are removed from the cart and a
//! fixed countdown starts; when it expires the visitor is sent back to the
//! catalog. Without a token nothing is removed and an error is shown.

use ampunv_auth::Destination;
use ampunv_cart::CartManager;
use ampunv_core::FurnitureId;

use crate::error::ApiError;

/// Ticks (seconds) before the automatic redirect to the catalog.
pub const REDIRECT_COUNTDOWN_TICKS: u32 = 10;

/// The success page's state: a countdown toward the catalog redirect.
#[derive(Debug, PartialEq, Eq)]
pub struct PaymentSuccess {
    remaining: u32,
}

impl PaymentSuccess {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// One timer tick. Returns the redirect destination when the countdown
    /// expires.
    pub fn tick(&mut self) -> Option<Destination> {
        if self.remaining <= 1 {
            self.remaining = 0;
            return Some(Destination::Catalog);
        }
        self.remaining -= 1;
        None
    }
}

/// Handle a successful checkout landing.
///
/// The purchased ids are removed from the cart only when the payment
/// confirmation token is present; the listings themselves were marked SOLD
/// server-side by the payment confirmation.
pub fn complete_purchase(
    cart: &CartManager,
    confirmation_token: Option<&str>,
    purchased: &[FurnitureId],
) -> Result<PaymentSuccess, ApiError> {
    let token = confirmation_token
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::validation("missing payment confirmation"))?;

    tracing::debug!(%token, count = purchased.len(), "purchase confirmed; clearing bought items");
    for id in purchased {
        cart.remove(*id);
    }

    Ok(PaymentSuccess {
        remaining: REDIRECT_COUNTDOWN_TICKS,
    })
}
