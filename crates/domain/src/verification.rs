//! User verification request entity.

use chrono::{DateTime, Utc};
use common::{EntityId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actor::{Actor, Role};
use crate::entity::{DomainEvent, Entity};
use crate::value_objects::PhotoRef;

/// The three identity document slots collected during farmer signup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDocuments {
    /// Front side of the national ID card.
    pub id_front: Option<PhotoRef>,

    /// Back side of the national ID card.
    pub id_back: Option<PhotoRef>,

    /// Selfie holding the ID card.
    pub selfie: Option<PhotoRef>,
}

impl IdentityDocuments {
    /// Creates a complete document set.
    pub fn new(id_front: PhotoRef, id_back: PhotoRef, selfie: PhotoRef) -> Self {
        Self {
            id_front: Some(id_front),
            id_back: Some(id_back),
            selfie: Some(selfie),
        }
    }

    /// Returns true if all three slots are filled.
    pub fn is_complete(&self) -> bool {
        self.id_front.is_some() && self.id_back.is_some() && self.selfie.is_some()
    }
}

/// The state of a user verification request.
///
/// `Pending → { Approved, Rejected }`, admin decided; both outcomes are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VerificationState {
    /// Awaiting admin review.
    #[default]
    Pending,

    /// Approved; the user may act under the requested role (terminal state).
    Approved,

    /// Rejected by an admin (terminal state).
    Rejected,
}

impl VerificationState {
    /// Returns true if an admin can decide the request in this state.
    pub fn can_decide(&self) -> bool {
        matches!(self, VerificationState::Pending)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            VerificationState::Approved | VerificationState::Rejected
        )
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationState::Pending => "Pending",
            VerificationState::Approved => "Approved",
            VerificationState::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for VerificationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events that can occur on a verification request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum VerificationEvent {
    /// A signup completed and the documents were submitted for review.
    VerificationSubmitted(VerificationSubmittedData),

    /// Admin approved the user.
    VerificationApproved(VerificationDecidedData),

    /// Admin rejected the user.
    VerificationRejected(VerificationRejectedData),
}

impl DomainEvent for VerificationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            VerificationEvent::VerificationSubmitted(_) => "VerificationSubmitted",
            VerificationEvent::VerificationApproved(_) => "VerificationApproved",
            VerificationEvent::VerificationRejected(_) => "VerificationRejected",
        }
    }
}

/// Data for VerificationSubmitted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSubmittedData {
    pub request_id: EntityId,
    pub user_id: UserId,
    pub requested_role: Role,
    pub documents: IdentityDocuments,
    pub submitted_at: DateTime<Utc>,
}

/// Data for VerificationApproved event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationDecidedData {
    pub decided_at: DateTime<Utc>,
    pub decided_by: UserId,
}

/// Data for VerificationRejected event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRejectedData {
    pub decided_at: DateTime<Utc>,
    pub decided_by: UserId,
    pub reason: String,
}

/// Errors that can occur during verification operations.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Request is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: VerificationState,
        action: &'static str,
    },

    /// The acting role may not invoke this transition.
    #[error("Role {role} may not {action}")]
    UnauthorizedRole { role: Role, action: &'static str },

    /// The requested role cannot be self-registered.
    #[error("Role {role} cannot be requested at signup")]
    RoleNotRegistrable { role: Role },

    /// Not all document slots are filled.
    #[error("All three identity documents are required")]
    DocumentsIncomplete,

    /// Request is already submitted.
    #[error("Verification already submitted")]
    AlreadySubmitted,
}

/// A pending user awaiting admin approval of their identity documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationRequest {
    id: Option<EntityId>,
    user_id: Option<UserId>,
    requested_role: Option<Role>,
    documents: IdentityDocuments,
    state: VerificationState,
    rejection_reason: Option<String>,
}

impl Entity for VerificationRequest {
    type Event = VerificationEvent;
    type Error = VerificationError;

    fn entity_type() -> &'static str {
        "VerificationRequest"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            VerificationEvent::VerificationSubmitted(data) => {
                self.id = Some(data.request_id);
                self.user_id = Some(data.user_id);
                self.requested_role = Some(data.requested_role);
                self.documents = data.documents;
                self.state = VerificationState::Pending;
            }
            VerificationEvent::VerificationApproved(_) => {
                self.state = VerificationState::Approved;
            }
            VerificationEvent::VerificationRejected(data) => {
                self.state = VerificationState::Rejected;
                self.rejection_reason = Some(data.reason);
            }
        }
    }
}

// Query methods
impl VerificationRequest {
    /// Returns the user awaiting verification.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Returns the role the user signed up for.
    pub fn requested_role(&self) -> Option<Role> {
        self.requested_role
    }

    /// Returns the submitted documents.
    pub fn documents(&self) -> &IdentityDocuments {
        &self.documents
    }

    /// Returns the current state.
    pub fn state(&self) -> VerificationState {
        self.state
    }

    /// Returns the rejection reason, if rejected.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }
}

// Command methods (return events)
impl VerificationRequest {
    /// Submits a completed signup for admin review.
    ///
    /// All three document slots must be filled; the signup wizard gates
    /// this before completion, so an incomplete set here is a caller bug,
    /// not a user mistake.
    pub fn submit(
        &self,
        request_id: EntityId,
        user_id: UserId,
        requested_role: Role,
        documents: IdentityDocuments,
    ) -> Result<Vec<VerificationEvent>, VerificationError> {
        if self.id.is_some() {
            return Err(VerificationError::AlreadySubmitted);
        }

        if !requested_role.is_registrable() {
            return Err(VerificationError::RoleNotRegistrable {
                role: requested_role,
            });
        }

        if !documents.is_complete() {
            return Err(VerificationError::DocumentsIncomplete);
        }

        Ok(vec![VerificationEvent::VerificationSubmitted(
            VerificationSubmittedData {
                request_id,
                user_id,
                requested_role,
                documents,
                submitted_at: Utc::now(),
            },
        )])
    }

    /// Approves the user. Admin only.
    pub fn approve(&self, actor: Actor) -> Result<Vec<VerificationEvent>, VerificationError> {
        self.check_decidable(actor, "approve")?;

        Ok(vec![VerificationEvent::VerificationApproved(
            VerificationDecidedData {
                decided_at: Utc::now(),
                decided_by: actor.user_id,
            },
        )])
    }

    /// Rejects the user. Admin only.
    pub fn reject(
        &self,
        actor: Actor,
        reason: impl Into<String>,
    ) -> Result<Vec<VerificationEvent>, VerificationError> {
        self.check_decidable(actor, "reject")?;

        Ok(vec![VerificationEvent::VerificationRejected(
            VerificationRejectedData {
                decided_at: Utc::now(),
                decided_by: actor.user_id,
                reason: reason.into(),
            },
        )])
    }

    fn check_decidable(&self, actor: Actor, action: &'static str) -> Result<(), VerificationError> {
        if actor.role != Role::Admin {
            return Err(VerificationError::UnauthorizedRole {
                role: actor.role,
                action,
            });
        }
        if !self.state.can_decide() {
            return Err(VerificationError::InvalidStateTransition {
                current_state: self.state,
                action,
            });
        }
        Ok(())
    }
}
