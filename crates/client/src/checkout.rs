//! Checkout: payment-intent creation with a duplicate-submission guard.
//!
//! Payment-intent creation is not idempotent, so the guard stays raised
//! from the request until the caller reports the hosted payment UI done
//! (`finish`) — a second submission while one is outstanding is refused
//! client-side. Nothing retries automatically.

use ampunv_core::FurnitureId;
use ampunv_core::validate::check_email_shape;

use crate::dto::{PaymentIntentRequest, PaymentIntentResponse};
use crate::error::ApiError;
use crate::gateway::PaymentApi;

#[derive(Debug)]
pub struct Checkout<G> {
    gateway: G,
    in_flight: bool,
}

impl<G: PaymentApi> Checkout<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            in_flight: false,
        }
    }

    /// Submit controls are disabled while this is true.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Create a payment intent for the given listings. On success the guard
    /// stays raised until `finish()`: the hosted payment UI now owns the
    /// flow. On failure the guard drops so the user can explicitly retry.
    pub async fn begin(
        &mut self,
        furniture_ids: Vec<FurnitureId>,
        buyer_email: Option<String>,
    ) -> Result<PaymentIntentResponse, ApiError> {
        if self.in_flight {
            return Err(ApiError::validation("a payment is already in progress"));
        }
        if furniture_ids.is_empty() {
            return Err(ApiError::validation("the cart is empty"));
        }
        if let Some(email) = &buyer_email {
            check_email_shape(email)?;
        }

        self.in_flight = true;
        let request = PaymentIntentRequest {
            furniture_ids,
            buyer_email,
        };
        match self.gateway.create_payment_intent(&request).await {
            Ok(intent) => Ok(intent),
            Err(err) => {
                self.in_flight = false;
                Err(err)
            }
        }
    }

    /// The hosted payment UI completed (either way); allow a new checkout.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}
