//! Client projection of a furniture listing.
//!
//! The backend owns the listing; this type only mirrors the last-fetched
//! state. Transitions are never computed locally — see `moderation`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ampunv_core::{
    CityId, ColorId, DomainError, DomainResult, FurnitureId, FurnitureTypeId, MaterialId, Price,
    UserId,
};

/// Moderation lifecycle of a listing, as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ListingStatus {
    /// Initial state, set by the server on creation.
    Pending,
    /// Publicly visible and purchasable.
    Approved,
    /// Turned down by a moderator; carries a reason.
    Rejected,
    /// Purchased. Terminal for buyer-facing actions.
    Sold,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Pending => "PENDING",
            ListingStatus::Approved => "APPROVED",
            ListingStatus::Rejected => "REJECTED",
            ListingStatus::Sold => "SOLD",
        }
    }

    /// Only approved listings appear in the buyer-facing catalog.
    pub fn is_publicly_visible(&self) -> bool {
        matches!(self, ListingStatus::Approved)
    }
}

impl core::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A furniture listing as last fetched from the backend.
///
/// Reference labels (`*_name`) are denormalized by the backend for display;
/// the ids remain the join keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Furniture {
    pub id: FurnitureId,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub furniture_type_id: FurnitureTypeId,
    #[serde(default)]
    pub furniture_type_name: Option<String>,
    #[serde(default)]
    pub material_id: Option<MaterialId>,
    #[serde(default)]
    pub material_name: Option<String>,
    #[serde(default)]
    pub color_id: Option<ColorId>,
    #[serde(default)]
    pub color_name: Option<String>,
    pub city_id: CityId,
    #[serde(default)]
    pub city_name: Option<String>,
    pub condition: String,
    pub status: ListingStatus,
    /// Present (and non-empty) only when `status` is `Rejected`.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    pub seller_id: UserId,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub primary_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Furniture {
    /// UI-layer convention check: a rejected listing always carries a
    /// non-empty reason, and no other status carries one.
    pub fn check_rejection_invariant(&self) -> DomainResult<()> {
        match (self.status, self.rejection_reason.as_deref()) {
            (ListingStatus::Rejected, Some(reason)) if !reason.trim().is_empty() => Ok(()),
            (ListingStatus::Rejected, _) => Err(DomainError::invariant(format!(
                "rejected listing {} has no rejection reason",
                self.id
            ))),
            (_, Some(_)) => Err(DomainError::invariant(format!(
                "listing {} carries a rejection reason but is {}",
                self.id, self.status
            ))),
            (_, None) => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn listing(id: i64, status: ListingStatus, price_cents: u64) -> Furniture {
        Furniture {
            id: FurnitureId::new(id),
            title: format!("Listing {id}"),
            description: "A fine secondhand piece".into(),
            price: Price::from_cents(price_cents),
            furniture_type_id: FurnitureTypeId::new(1),
            furniture_type_name: Some("Table".into()),
            material_id: Some(MaterialId::new(2)),
            material_name: Some("Oak".into()),
            color_id: None,
            color_name: None,
            city_id: CityId::new(10),
            city_name: Some("Lyon".into()),
            condition: "Good".into(),
            status,
            rejection_reason: match status {
                ListingStatus::Rejected => Some("Insufficient description".into()),
                _ => None,
            },
            seller_id: UserId::new(3),
            seller_name: Some("Ada Martin".into()),
            primary_image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::listing;
    use super::*;

    #[test]
    fn status_labels_match_the_backend() {
        assert_eq!(
            serde_json::to_string(&ListingStatus::Pending).unwrap(),
            "\"PENDING\""
        );
        let parsed: ListingStatus = serde_json::from_str("\"SOLD\"").unwrap();
        assert_eq!(parsed, ListingStatus::Sold);
    }

    #[test]
    fn rejected_listing_with_reason_passes_the_invariant() {
        let f = listing(1, ListingStatus::Rejected, 5000);
        assert!(f.check_rejection_invariant().is_ok());
    }

    #[test]
    fn rejected_listing_without_reason_fails_the_invariant() {
        let mut f = listing(1, ListingStatus::Rejected, 5000);
        f.rejection_reason = Some("   ".into());
        assert!(f.check_rejection_invariant().is_err());
        f.rejection_reason = None;
        assert!(f.check_rejection_invariant().is_err());
    }

    #[test]
    fn non_rejected_listing_must_not_carry_a_reason() {
        let mut f = listing(1, ListingStatus::Approved, 5000);
        f.rejection_reason = Some("stale".into());
        assert!(f.check_rejection_invariant().is_err());
    }

    #[test]
    fn only_approved_listings_are_publicly_visible() {
        assert!(ListingStatus::Approved.is_publicly_visible());
        assert!(!ListingStatus::Pending.is_publicly_visible());
        assert!(!ListingStatus::Sold.is_publicly_visible());
        assert!(!ListingStatus::Rejected.is_publicly_visible());
    }
}
