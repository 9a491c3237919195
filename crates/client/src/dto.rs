//! Request/response shapes for the consumed backend endpoints.
//!
//! Field names follow the backend's camelCase JSON. Forms carrying user
//! input validate themselves before producing a wire request; validation
//! failures never reach the network.

use serde::{Deserialize, Serialize};

use ampunv_auth::{AuthToken, Role, StoredUser};
use ampunv_catalog::ListingStatus;
use ampunv_core::validate::{
    check_email_shape, check_password_complexity, check_password_confirmation, require_non_blank,
};
use ampunv_core::{
    CityId, ColorId, DomainResult, FurnitureId, FurnitureTypeId, ImageId, MaterialId, Price, UserId,
};

// ── auth ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub city_id: CityId,
}

/// The registration form as typed, including the confirmation field that
/// never goes on the wire.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub city_id: CityId,
}

impl RegistrationForm {
    /// All client-side checks; on success, the wire request.
    pub fn validate(self) -> DomainResult<RegisterRequest> {
        require_non_blank("first name", &self.firstname)?;
        require_non_blank("last name", &self.lastname)?;
        check_email_shape(&self.email)?;
        check_password_complexity(&self.password)?;
        check_password_confirmation(&self.password, &self.confirm_password)?;
        Ok(RegisterRequest {
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            password: self.password,
            city_id: self.city_id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub role: Role,
    #[serde(default)]
    pub city_id: Option<CityId>,
    #[serde(default)]
    pub is_original_admin: bool,
}

impl AuthResponse {
    pub fn into_session(self) -> (AuthToken, StoredUser) {
        let user = StoredUser {
            id: self.user_id,
            firstname: self.firstname,
            lastname: self.lastname,
            email: self.email,
            role: self.role,
            city_id: self.city_id,
            is_original_admin: self.is_original_admin,
        };
        (AuthToken::new(self.token), user)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailCheckResponse {
    pub exists: bool,
}

// ── furniture ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFurnitureRequest {
    pub title: String,
    pub description: String,
    pub price: Price,
    pub furniture_type_id: FurnitureTypeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_id: Option<MaterialId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<ColorId>,
    pub city_id: CityId,
    pub condition: String,
}

impl CreateFurnitureRequest {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("title", &self.title)?;
        require_non_blank("description", &self.description)?;
        require_non_blank("condition", &self.condition)?;
        Ok(())
    }
}

/// Partial update; omitted fields keep their server-side values.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFurnitureRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub furniture_type_id: Option<FurnitureTypeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material_id: Option<MaterialId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<ColorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<CityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

/// Admin status change; `reason` accompanies a rejection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub status: ListingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

// ── images ───────────────────────────────────────────────────────────────

/// An image file staged for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    pub is_primary: bool,
    pub display_order: u32,
    pub furniture_id: FurnitureId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub id: ImageId,
    pub url: String,
    pub name: String,
    pub is_primary: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// ── users ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserProfile {
    pub id: UserId,
    pub display_name: String,
    pub city_name: String,
    pub member_since: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub city_id: CityId,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("first name", &self.firstname)?;
        require_non_blank("last name", &self.lastname)?;
        check_email_shape(&self.email)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

// ── payments ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentRequest {
    pub furniture_ids: Vec<FurnitureId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
}

/// The client secret drives the processor's hosted payment UI; it authorizes
/// completing exactly one payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}
