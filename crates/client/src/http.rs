//! HTTP gateway over the REST backend.
//!
//! One `reqwest` client with a fixed timeout. The bearer token is read from
//! the session store per request. A 401 clears the session before the error
//! is returned (forced logout); a 403 is surfaced without touching the
//! session. Backend error bodies are `{ "error": ..., "message": ... }` and
//! the message is carried verbatim when present.

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use ampunv_auth::{SessionStore, StoredUser};
use ampunv_catalog::Furniture;
use ampunv_catalog::reference::{City, Color, FurnitureType, Material};
use ampunv_core::{FurnitureId, ImageId, UserId};

use crate::dto::{
    AuthResponse, CreateFurnitureRequest, EmailCheckResponse, Image, ImageUpload,
    ImageUploadResponse, LoginRequest, PaymentIntentRequest, PaymentIntentResponse,
    PublicUserProfile, RegisterRequest, StatusUpdateRequest, UpdateFurnitureRequest,
    UpdatePasswordRequest, UpdateProfileRequest,
};
use crate::error::ApiError;
use crate::gateway::{AuthApi, FurnitureApi, ImageApi, PaymentApi, ReferenceApi, UserApi};

/// Fixed client-side timeout for every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// `reqwest`-backed implementation of the gateway traits.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token.as_str()),
            None => req,
        }
    }

    /// Send, map transport failures, then map non-success statuses onto the
    /// error taxonomy. `fallback` is the action-specific business message
    /// used when the backend provides none.
    async fn execute(
        &self,
        req: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.authorized(req).send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!(%e, "request timed out");
                ApiError::Timeout
            } else {
                tracing::warn!(%e, "request failed to reach the backend");
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let server_message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        let err = self.error_for(status, server_message, fallback);
        tracing::error!(status = status.as_u16(), %err, "backend request rejected");
        Err(err)
    }

    /// Map a rejected status onto the error taxonomy. A 401 clears the
    /// persisted session (forced logout); a 403 leaves it intact.
    fn error_for(
        &self,
        status: reqwest::StatusCode,
        server_message: Option<String>,
        fallback: &str,
    ) -> ApiError {
        match status.as_u16() {
            401 => {
                tracing::warn!("backend returned 401; clearing session");
                self.session.clear();
                ApiError::Unauthorized
            }
            403 => ApiError::Forbidden(
                server_message.unwrap_or_else(|| "you are not allowed to do this".to_string()),
            ),
            404 => ApiError::NotFound,
            _ => ApiError::business(server_message, fallback),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let response = self.execute(req, fallback).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Network(format!("unreadable response: {e}")))
    }

    async fn fetch_unit(
        &self,
        req: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<(), ApiError> {
        self.execute(req, fallback).await.map(|_| ())
    }
}

impl AuthApi for HttpGateway {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.fetch_json(
            self.http.post(self.url("/api/auth/register")).json(req),
            "registration failed, check that the email is not already in use",
        )
        .await
    }

    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.fetch_json(
            self.http.post(self.url("/api/auth/login")).json(req),
            "login failed, check your credentials",
        )
        .await
    }

    async fn check_email(&self, email: &str) -> Result<bool, ApiError> {
        let resp: EmailCheckResponse = self
            .fetch_json(
                self.http
                    .get(self.url("/api/auth/check-email"))
                    .query(&[("email", email)]),
                "email check failed",
            )
            .await?;
        Ok(resp.exists)
    }
}

impl FurnitureApi for HttpGateway {
    async fn list(&self) -> Result<Vec<Furniture>, ApiError> {
        self.fetch_json(
            self.http.get(self.url("/api/furnitures")),
            "could not load the catalog",
        )
        .await
    }

    async fn get(&self, id: FurnitureId) -> Result<Furniture, ApiError> {
        self.fetch_json(
            self.http.get(self.url(&format!("/api/furnitures/{id}"))),
            "could not load the listing",
        )
        .await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Furniture>, ApiError> {
        self.fetch_json(
            self.http
                .get(self.url("/api/furnitures/search"))
                .query(&[("keyword", keyword)]),
            "search failed",
        )
        .await
    }

    async fn my_listings(&self) -> Result<Vec<Furniture>, ApiError> {
        self.fetch_json(
            self.http.get(self.url("/api/furnitures/my-furnitures")),
            "could not load your listings",
        )
        .await
    }

    async fn create(&self, req: &CreateFurnitureRequest) -> Result<Furniture, ApiError> {
        self.fetch_json(
            self.http.post(self.url("/api/furnitures")).json(req),
            "the listing could not be created",
        )
        .await
    }

    async fn update(
        &self,
        id: FurnitureId,
        req: &UpdateFurnitureRequest,
    ) -> Result<Furniture, ApiError> {
        self.fetch_json(
            self.http
                .put(self.url(&format!("/api/furnitures/{id}")))
                .json(req),
            "the listing could not be updated",
        )
        .await
    }

    async fn update_status(
        &self,
        id: FurnitureId,
        req: &StatusUpdateRequest,
    ) -> Result<Furniture, ApiError> {
        self.fetch_json(
            self.http
                .put(self.url(&format!("/api/admin/furnitures/{id}")))
                .json(req),
            "the status could not be updated",
        )
        .await
    }

    async fn delete(&self, id: FurnitureId) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http
                .delete(self.url(&format!("/api/admin/furnitures/{id}"))),
            "the listing could not be deleted",
        )
        .await
    }
}

impl ImageApi for HttpGateway {
    async fn upload_image(
        &self,
        furniture_id: FurnitureId,
        upload: &ImageUpload,
    ) -> Result<ImageUploadResponse, ApiError> {
        let part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.filename.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| ApiError::validation(format!("unusable image content type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        self.fetch_json(
            self.http
                .post(self.url(&format!("/api/furnitures/{furniture_id}/images")))
                .multipart(form),
            "the image could not be uploaded",
        )
        .await
    }

    async fn list_images(&self, furniture_id: FurnitureId) -> Result<Vec<Image>, ApiError> {
        self.fetch_json(
            self.http
                .get(self.url(&format!("/api/furnitures/{furniture_id}/images"))),
            "could not load the images",
        )
        .await
    }

    async fn set_primary_image(&self, image_id: ImageId) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http
                .put(self.url(&format!("/api/images/{image_id}/primary"))),
            "the primary image could not be changed",
        )
        .await
    }

    async fn delete_image(&self, image_id: ImageId) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http.delete(self.url(&format!("/api/images/{image_id}"))),
            "the image could not be deleted",
        )
        .await
    }
}

impl UserApi for HttpGateway {
    async fn list_users(&self) -> Result<Vec<StoredUser>, ApiError> {
        self.fetch_json(self.http.get(self.url("/api/users")), "could not load users")
            .await
    }

    async fn get_user(&self, id: UserId) -> Result<StoredUser, ApiError> {
        self.fetch_json(
            self.http.get(self.url(&format!("/api/users/{id}"))),
            "could not load the user",
        )
        .await
    }

    async fn public_profile(&self, id: UserId) -> Result<PublicUserProfile, ApiError> {
        self.fetch_json(
            self.http.get(self.url(&format!("/api/users/{id}/public"))),
            "could not load the seller profile",
        )
        .await
    }

    async fn my_profile(&self) -> Result<StoredUser, ApiError> {
        self.fetch_json(
            self.http.get(self.url("/api/users/myprofile")),
            "could not load your profile",
        )
        .await
    }

    async fn promote_to_admin(&self, id: UserId) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http
                .post(self.url(&format!("/api/admin/users/{id}/promote"))),
            "the user could not be promoted",
        )
        .await
    }

    async fn demote_to_seller(&self, id: UserId) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http
                .post(self.url(&format!("/api/admin/users/{id}/demote"))),
            "the user could not be demoted",
        )
        .await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http.delete(self.url(&format!("/api/admin/users/{id}"))),
            "the user could not be deleted",
        )
        .await
    }

    async fn update_my_profile(&self, req: &UpdateProfileRequest) -> Result<StoredUser, ApiError> {
        self.fetch_json(
            self.http.put(self.url("/api/users/myprofile")).json(req),
            "your profile could not be updated",
        )
        .await
    }

    async fn update_my_password(&self, req: &UpdatePasswordRequest) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http
                .put(self.url("/api/users/myprofile/password"))
                .json(req),
            "your password could not be changed",
        )
        .await
    }

    async fn delete_my_account(&self) -> Result<(), ApiError> {
        self.fetch_unit(
            self.http.delete(self.url("/api/users/myprofile")),
            "your account could not be deleted",
        )
        .await
    }
}

impl ReferenceApi for HttpGateway {
    async fn cities(&self) -> Result<Vec<City>, ApiError> {
        self.fetch_json(self.http.get(self.url("/api/cities")), "could not load cities")
            .await
    }

    async fn furniture_types(&self) -> Result<Vec<FurnitureType>, ApiError> {
        self.fetch_json(
            self.http.get(self.url("/api/reference-data/furniture-types")),
            "could not load furniture types",
        )
        .await
    }

    async fn materials(&self) -> Result<Vec<Material>, ApiError> {
        self.fetch_json(
            self.http.get(self.url("/api/reference-data/materials")),
            "could not load materials",
        )
        .await
    }

    async fn colors(&self) -> Result<Vec<Color>, ApiError> {
        self.fetch_json(
            self.http.get(self.url("/api/reference-data/colors")),
            "could not load colors",
        )
        .await
    }
}

impl PaymentApi for HttpGateway {
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<PaymentIntentResponse, ApiError> {
        self.fetch_json(
            self.http
                .post(self.url("/api/payments/create-intent"))
                .json(req),
            "the payment could not be initiated",
        )
        .await
    }
}
