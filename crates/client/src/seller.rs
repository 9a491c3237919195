//! Seller-side listing management.
//!
//! Listing creation and image upload are two backend calls with different
//! recovery paths when the second fails: the listing exists, so the seller
//! edits it instead of recreating it. The error type keeps the two cases
//! apart and hands back the created listing.

use thiserror::Error;

use ampunv_catalog::{Furniture, ModerationAction};
use ampunv_core::FurnitureId;

use crate::dto::{CreateFurnitureRequest, ImageUpload, UpdateFurnitureRequest};
use crate::error::ApiError;
use crate::gateway::{FurnitureApi, ImageApi};

#[derive(Debug, Error)]
pub enum CreateListingError {
    /// Nothing was created; the seller retries the whole form.
    #[error("the listing could not be created: {0}")]
    CreationFailed(#[source] ApiError),

    /// The listing exists but one image upload failed; the seller recovers
    /// by editing the listing, not by recreating it.
    #[error("the listing was created but image upload failed: {source}")]
    ImagesFailed {
        furniture: Box<Furniture>,
        #[source]
        source: ApiError,
    },
}

/// Seller flows over the furniture and image surfaces.
#[derive(Debug)]
pub struct SellerDesk<G> {
    gateway: G,
}

impl<G: FurnitureApi + ImageApi> SellerDesk<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    pub async fn my_listings(&self) -> Result<Vec<Furniture>, ApiError> {
        self.gateway.my_listings().await
    }

    /// Create the listing, then upload its images in order. Validation runs
    /// before the first request.
    pub async fn create_listing(
        &self,
        form: CreateFurnitureRequest,
        images: Vec<ImageUpload>,
    ) -> Result<Furniture, CreateListingError> {
        form.validate()
            .map_err(|e| CreateListingError::CreationFailed(e.into()))?;

        let furniture = self
            .gateway
            .create(&form)
            .await
            .map_err(CreateListingError::CreationFailed)?;

        for image in &images {
            if let Err(source) = self.gateway.upload_image(furniture.id, image).await {
                tracing::error!(%source, listing = %furniture.id, "image upload failed after creation");
                return Err(CreateListingError::ImagesFailed {
                    furniture: Box::new(furniture),
                    source,
                });
            }
        }

        Ok(furniture)
    }

    /// Edit a rejected listing and resubmit it for moderation. Legal only
    /// from REJECTED; the backend resets the status to PENDING and clears
    /// the rejection reason.
    pub async fn resubmit(
        &self,
        current: &Furniture,
        update: UpdateFurnitureRequest,
    ) -> Result<Furniture, ApiError> {
        ModerationAction::Resubmit.check(current.status)?;
        self.gateway.update(current.id, &update).await
    }

    /// Plain edit of a listing the seller owns (no status change implied).
    pub async fn update_listing(
        &self,
        id: FurnitureId,
        update: UpdateFurnitureRequest,
    ) -> Result<Furniture, ApiError> {
        self.gateway.update(id, &update).await
    }
}
