//! Typed endpoint contract.
//!
//! One trait per backend surface, mirroring how the flows consume them:
//! flows are generic over exactly the surfaces they touch, and tests
//! substitute in-memory fakes.

use ampunv_auth::StoredUser;
use ampunv_catalog::reference::{City, Color, FurnitureType, Material};
use ampunv_catalog::Furniture;
use ampunv_core::{FurnitureId, ImageId, UserId};

use crate::dto::{
    AuthResponse, CreateFurnitureRequest, Image, ImageUpload, ImageUploadResponse, LoginRequest,
    PaymentIntentRequest, PaymentIntentResponse, PublicUserProfile, RegisterRequest,
    StatusUpdateRequest, UpdateFurnitureRequest, UpdatePasswordRequest, UpdateProfileRequest,
};
use crate::error::ApiError;

pub trait AuthApi {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError>;

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError>;

    /// Whether an account with this email already exists.
    async fn check_email(&self, email: &str) -> Result<bool, ApiError>;
}

pub trait FurnitureApi {
    async fn list(&self) -> Result<Vec<Furniture>, ApiError>;

    async fn get(&self, id: FurnitureId) -> Result<Furniture, ApiError>;

    async fn search(&self, keyword: &str) -> Result<Vec<Furniture>, ApiError>;

    /// Listings owned by the authenticated seller.
    async fn my_listings(&self) -> Result<Vec<Furniture>, ApiError>;

    async fn create(&self, req: &CreateFurnitureRequest) -> Result<Furniture, ApiError>;

    async fn update(
        &self,
        id: FurnitureId,
        req: &UpdateFurnitureRequest,
    ) -> Result<Furniture, ApiError>;

    /// Admin-only status change, optionally carrying a rejection reason.
    async fn update_status(
        &self,
        id: FurnitureId,
        req: &StatusUpdateRequest,
    ) -> Result<Furniture, ApiError>;

    /// Irreversible removal of the listing.
    async fn delete(&self, id: FurnitureId) -> Result<(), ApiError>;
}

pub trait ImageApi {
    async fn upload_image(
        &self,
        furniture_id: FurnitureId,
        upload: &ImageUpload,
    ) -> Result<ImageUploadResponse, ApiError>;

    async fn list_images(&self, furniture_id: FurnitureId) -> Result<Vec<Image>, ApiError>;

    async fn set_primary_image(&self, image_id: ImageId) -> Result<(), ApiError>;

    async fn delete_image(&self, image_id: ImageId) -> Result<(), ApiError>;
}

pub trait UserApi {
    async fn list_users(&self) -> Result<Vec<StoredUser>, ApiError>;

    async fn get_user(&self, id: UserId) -> Result<StoredUser, ApiError>;

    async fn public_profile(&self, id: UserId) -> Result<PublicUserProfile, ApiError>;

    async fn my_profile(&self) -> Result<StoredUser, ApiError>;

    async fn promote_to_admin(&self, id: UserId) -> Result<(), ApiError>;

    async fn demote_to_seller(&self, id: UserId) -> Result<(), ApiError>;

    /// Admin-only removal of another account. Irreversible.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;

    async fn update_my_profile(&self, req: &UpdateProfileRequest) -> Result<StoredUser, ApiError>;

    async fn update_my_password(&self, req: &UpdatePasswordRequest) -> Result<(), ApiError>;

    async fn delete_my_account(&self) -> Result<(), ApiError>;
}

pub trait ReferenceApi {
    async fn cities(&self) -> Result<Vec<City>, ApiError>;

    async fn furniture_types(&self) -> Result<Vec<FurnitureType>, ApiError>;

    async fn materials(&self) -> Result<Vec<Material>, ApiError>;

    async fn colors(&self) -> Result<Vec<Color>, ApiError>;
}

pub trait PaymentApi {
    /// Create a payment intent for the given listings; the returned client
    /// secret drives the hosted payment UI. Not idempotent — never retried
    /// automatically.
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, ApiError>;
}
