//! Admin moderation desk.
//!
//! The desk holds the last-fetched listing set and sends one backend call
//! per action. Local state is never hand-patched: after every action —
//! successful or failed — the authoritative list is re-fetched, because
//! other admins may have acted concurrently. Action legality and side data
//! are validated before anything goes on the wire.

use ampunv_auth::{StoredUser, UserAction, available_actions};
use ampunv_catalog::{Furniture, ListingStatus, ModerationAction, RejectionReason};
use ampunv_core::{FurnitureId, UserId};

use crate::dto::StatusUpdateRequest;
use crate::error::ApiError;
use crate::gateway::{FurnitureApi, UserApi};

/// Handle produced by `begin_delete`; deletion only happens once the caller
/// passes it to `confirm_delete`. Dropping it cancels.
#[derive(Debug)]
pub struct DeleteConfirmation {
    id: FurnitureId,
    title: String,
}

impl DeleteConfirmation {
    pub fn listing_id(&self) -> FurnitureId {
        self.id
    }

    /// Shown in the confirmation prompt.
    pub fn listing_title(&self) -> &str {
        &self.title
    }
}

/// Moderation view over all listings, admin side.
#[derive(Debug)]
pub struct AdminDesk<G> {
    gateway: G,
    listings: Vec<Furniture>,
}

impl<G: FurnitureApi> AdminDesk<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            listings: Vec::new(),
        }
    }

    /// The last-fetched authoritative listing set.
    pub fn listings(&self) -> &[Furniture] {
        &self.listings
    }

    pub fn listing(&self, id: FurnitureId) -> Option<&Furniture> {
        self.listings.iter().find(|l| l.id == id)
    }

    /// Replace the local view with the backend's.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.listings = self.gateway.list().await?;
        Ok(())
    }

    /// PENDING → APPROVED.
    pub async fn approve(&mut self, id: FurnitureId) -> Result<(), ApiError> {
        self.act(id, ModerationAction::Approve).await
    }

    /// PENDING → REJECTED. The reason is validated before any network call;
    /// a blank "other" reason never leaves the client.
    pub async fn reject(&mut self, id: FurnitureId, reason: RejectionReason) -> Result<(), ApiError> {
        self.act(id, ModerationAction::Reject(reason)).await
    }

    /// Admin override to PENDING, APPROVED or SOLD from any state.
    pub async fn override_status(
        &mut self,
        id: FurnitureId,
        target: ListingStatus,
    ) -> Result<(), ApiError> {
        self.act(id, ModerationAction::Override(target)).await
    }

    /// First step of deletion: capture what is about to be removed.
    pub fn begin_delete(&self, id: FurnitureId) -> Result<DeleteConfirmation, ApiError> {
        let listing = self.listing(id).ok_or(ApiError::NotFound)?;
        Ok(DeleteConfirmation {
            id,
            title: listing.title.clone(),
        })
    }

    /// Second step: the user confirmed; issue the irreversible request.
    pub async fn confirm_delete(
        &mut self,
        confirmation: DeleteConfirmation,
    ) -> Result<(), ApiError> {
        let result = self.gateway.delete(confirmation.id).await;
        self.refetch_after_action().await;
        result
    }

    async fn act(&mut self, id: FurnitureId, action: ModerationAction) -> Result<(), ApiError> {
        let current = self.listing(id).ok_or(ApiError::NotFound)?.status;
        action.check(current)?;

        let request = StatusUpdateRequest {
            status: action.target(),
            reason: match &action {
                ModerationAction::Reject(reason) => Some(reason.as_text().to_string()),
                _ => None,
            },
        };

        let result = self.gateway.update_status(id, &request).await.map(|_| ());
        self.refetch_after_action().await;
        result
    }

    /// Best-effort authoritative re-fetch; a failure here keeps the previous
    /// view and is only logged (the action's own result is what surfaces).
    async fn refetch_after_action(&mut self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(%err, "re-fetch after admin action failed; keeping previous view");
        }
    }
}

/// Admin view over user accounts: promote/demote, gated by the
/// distinguished-admin policy before any request is issued.
#[derive(Debug)]
pub struct UserAdminDesk<G> {
    gateway: G,
    acting: StoredUser,
    users: Vec<StoredUser>,
}

impl<G: UserApi> UserAdminDesk<G> {
    pub fn new(gateway: G, acting: StoredUser) -> Self {
        Self {
            gateway,
            acting,
            users: Vec::new(),
        }
    }

    pub fn users(&self) -> &[StoredUser] {
        &self.users
    }

    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        self.users = self.gateway.list_users().await?;
        Ok(())
    }

    /// The controls to render for one row.
    pub fn actions_for(&self, target: &StoredUser) -> Vec<UserAction> {
        available_actions(&self.acting, target)
    }

    pub async fn promote(&mut self, id: UserId) -> Result<(), ApiError> {
        self.check_allowed(id, UserAction::PromoteToAdmin)?;
        let result = self.gateway.promote_to_admin(id).await;
        self.refetch_after_action().await;
        result
    }

    pub async fn demote(&mut self, id: UserId) -> Result<(), ApiError> {
        self.check_allowed(id, UserAction::DemoteToSeller)?;
        let result = self.gateway.demote_to_seller(id).await;
        self.refetch_after_action().await;
        result
    }

    /// Irreversible removal of another account, gated by the same policy as
    /// the rendered controls.
    pub async fn delete(&mut self, id: UserId) -> Result<(), ApiError> {
        self.check_allowed(id, UserAction::DeleteAccount)?;
        let result = self.gateway.delete_user(id).await;
        self.refetch_after_action().await;
        result
    }

    fn check_allowed(&self, id: UserId, action: UserAction) -> Result<(), ApiError> {
        let target = self
            .users
            .iter()
            .find(|u| u.id == id)
            .ok_or(ApiError::NotFound)?;
        if self.actions_for(target).contains(&action) {
            Ok(())
        } else {
            Err(ApiError::validation(
                "this action is not available for this account",
            ))
        }
    }

    async fn refetch_after_action(&mut self) {
        if let Err(err) = self.refresh().await {
            tracing::warn!(%err, "re-fetch after user action failed; keeping previous view");
        }
    }
}
