//! Moderation state machine, client side.
//!
//! The backend is the sole authority on listing status. The client keeps a
//! `ModerationView` per listing: the last status a successful fetch reported,
//! plus the transition currently awaiting the backend's answer (if any).
//! `displayed()` always returns the last known server state — the display
//! never shows a transition the server has not confirmed.
//!
//! Transition legality and side-data validation run **before** any network
//! call; an illegal or incomplete action never leaves the client.

use serde::{Deserialize, Serialize};

use ampunv_core::{DomainError, DomainResult};

use crate::furniture::ListingStatus;

/// Reason attached to a reject action: a fixed canned set plus free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    PoorPhotoQuality,
    InsufficientDescription,
    PriceOffMarket,
    ConditionNotCompliant,
    MissingInformation,
    /// Free text; must be non-blank.
    Other(String),
}

impl RejectionReason {
    /// The canned choices offered by the reject dialog, in display order.
    pub const CANNED: [RejectionReason; 5] = [
        RejectionReason::PoorPhotoQuality,
        RejectionReason::InsufficientDescription,
        RejectionReason::PriceOffMarket,
        RejectionReason::ConditionNotCompliant,
        RejectionReason::MissingInformation,
    ];

    /// The string sent to (and stored by) the backend.
    pub fn as_text(&self) -> &str {
        match self {
            RejectionReason::PoorPhotoQuality => "Poor photo quality",
            RejectionReason::InsufficientDescription => "Insufficient description",
            RejectionReason::PriceOffMarket => "Price not in line with the market",
            RejectionReason::ConditionNotCompliant => "Condition does not match the listing terms",
            RejectionReason::MissingInformation => "Missing information",
            RejectionReason::Other(text) => text,
        }
    }

    /// A reject request is never sent without a usable reason.
    pub fn validate(&self) -> DomainResult<()> {
        match self {
            RejectionReason::Other(text) if text.trim().is_empty() => Err(
                DomainError::validation("a rejection reason must be selected or entered"),
            ),
            _ => Ok(()),
        }
    }
}

/// A transition request this client can send to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationAction {
    /// PENDING → APPROVED (moderator).
    Approve,
    /// PENDING → REJECTED with a reason (moderator).
    Reject(RejectionReason),
    /// any → {PENDING, APPROVED, SOLD} (admin override).
    Override(ListingStatus),
    /// REJECTED → PENDING with updated fields (seller edit-and-resubmit).
    Resubmit,
    /// APPROVED → SOLD, driven by payment confirmation.
    MarkSold,
}

impl ModerationAction {
    /// The status the action targets, for bookkeeping of the pending
    /// transition. Never applied locally without server confirmation.
    pub fn target(&self) -> ListingStatus {
        match self {
            ModerationAction::Approve => ListingStatus::Approved,
            ModerationAction::Reject(_) => ListingStatus::Rejected,
            ModerationAction::Override(target) => *target,
            ModerationAction::Resubmit => ListingStatus::Pending,
            ModerationAction::MarkSold => ListingStatus::Sold,
        }
    }

    /// Check legality from `current` and validate required side data.
    pub fn check(&self, current: ListingStatus) -> DomainResult<()> {
        match self {
            ModerationAction::Approve => expect_from(current, ListingStatus::Pending, "approve"),
            ModerationAction::Reject(reason) => {
                reason.validate()?;
                expect_from(current, ListingStatus::Pending, "reject")
            }
            ModerationAction::Override(target) => match target {
                ListingStatus::Rejected => Err(DomainError::validation(
                    "rejection goes through the reject action so a reason is captured",
                )),
                _ => Ok(()),
            },
            ModerationAction::Resubmit => {
                expect_from(current, ListingStatus::Rejected, "resubmit")
            }
            ModerationAction::MarkSold => {
                expect_from(current, ListingStatus::Approved, "mark sold")
            }
        }
    }
}

fn expect_from(current: ListingStatus, wanted: ListingStatus, action: &str) -> DomainResult<()> {
    if current == wanted {
        Ok(())
    } else {
        Err(DomainError::illegal_transition(format!(
            "cannot {action} a {current} listing"
        )))
    }
}

/// Last known server state + the transition awaiting confirmation.
///
/// This is the per-listing holder for views that track one listing at a
/// time (a detail page, a row with its own spinner). List-shaped views like
/// the admin desk instead re-fetch the whole listing set after each action
/// and read legality off the fetched status directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationView {
    last_known: ListingStatus,
    pending: Option<ModerationAction>,
}

impl ModerationView {
    pub fn new(last_known: ListingStatus) -> Self {
        Self {
            last_known,
            pending: None,
        }
    }

    /// The status to display. Always the server-confirmed one.
    pub fn displayed(&self) -> ListingStatus {
        self.last_known
    }

    pub fn pending(&self) -> Option<&ModerationAction> {
        self.pending.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Validate and record a transition request before it is sent.
    ///
    /// Rejected while another request is in flight, so the same action cannot
    /// be submitted twice.
    pub fn begin(&mut self, action: ModerationAction) -> DomainResult<()> {
        if self.pending.is_some() {
            return Err(DomainError::AlreadyInProgress);
        }
        action.check(self.last_known)?;
        self.pending = Some(action);
        Ok(())
    }

    /// The backend answered; adopt whatever status it reports.
    pub fn complete(&mut self, server_status: ListingStatus) {
        self.last_known = server_status;
        self.pending = None;
    }

    /// The request failed; the displayed status stays as last fetched.
    pub fn fail(&mut self) {
        self.pending = None;
    }

    /// A fresh fetch overwrites the projection unconditionally.
    pub fn refresh(&mut self, fetched: ListingStatus) {
        self.last_known = fetched;
    }
}
