//! Crop listing entity: moderation and close lifecycle.

use chrono::{DateTime, Utc};
use common::{EntityId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actor::{Actor, Role};
use crate::entity::{DomainEvent, Entity};
use crate::value_objects::Money;

/// The state of a crop listing.
///
/// State transitions:
/// ```text
/// PendingReview ──┬──► Listed ──► Closed
///                 └──► Rejected
/// ```
///
/// Admins accept or reject a submitted listing; the farmer may close a
/// listed one. `Rejected` and `Closed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ListingState {
    /// Submitted by a farmer, awaiting admin moderation.
    #[default]
    PendingReview,

    /// Approved and visible to buyers.
    Listed,

    /// Rejected by an admin (terminal state).
    Rejected,

    /// Closed by the farmer, irreversibly (terminal state).
    Closed,
}

impl ListingState {
    /// Returns true if the listing can be moderated in this state.
    pub fn can_moderate(&self) -> bool {
        matches!(self, ListingState::PendingReview)
    }

    /// Returns true if the listing can be closed in this state.
    pub fn can_close(&self) -> bool {
        matches!(self, ListingState::Listed)
    }

    /// Returns true if buyers can order against the listing.
    pub fn is_purchasable(&self) -> bool {
        matches!(self, ListingState::Listed)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ListingState::Rejected | ListingState::Closed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingState::PendingReview => "PendingReview",
            ListingState::Listed => "Listed",
            ListingState::Rejected => "Rejected",
            ListingState::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for ListingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events that can occur on a crop listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ListingEvent {
    /// Farmer submitted the listing for moderation.
    ListingSubmitted(ListingSubmittedData),

    /// Admin accepted the listing; it is now visible to buyers.
    ListingAccepted(ListingModeratedData),

    /// Admin rejected the listing.
    ListingRejected(ListingRejectedData),

    /// Farmer closed the listing.
    ListingClosed(ListingClosedData),
}

impl DomainEvent for ListingEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ListingEvent::ListingSubmitted(_) => "ListingSubmitted",
            ListingEvent::ListingAccepted(_) => "ListingAccepted",
            ListingEvent::ListingRejected(_) => "ListingRejected",
            ListingEvent::ListingClosed(_) => "ListingClosed",
        }
    }
}

/// Data for ListingSubmitted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingSubmittedData {
    pub listing_id: EntityId,
    pub farmer_id: UserId,
    pub crop_name: String,
    pub quantity_kg: u32,
    pub price_per_kg: Money,
    pub submitted_at: DateTime<Utc>,
}

/// Data for ListingAccepted event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingModeratedData {
    pub moderated_at: DateTime<Utc>,
    pub moderated_by: UserId,
}

/// Data for ListingRejected event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingRejectedData {
    pub moderated_at: DateTime<Utc>,
    pub moderated_by: UserId,
    pub reason: String,
}

/// Data for ListingClosed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingClosedData {
    pub closed_at: DateTime<Utc>,
}

/// Errors that can occur during listing operations.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Listing is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: ListingState,
        action: &'static str,
    },

    /// The acting role may not invoke this transition.
    #[error("Role {role} may not {action}")]
    UnauthorizedRole { role: Role, action: &'static str },

    /// The actor is not the farmer who owns this listing.
    #[error("Only the owning farmer may {action}")]
    NotOwner { action: &'static str },

    /// Listing is already submitted.
    #[error("Listing already submitted")]
    AlreadySubmitted,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity_kg} kg (must be greater than 0)")]
    InvalidQuantity { quantity_kg: u32 },

    /// Invalid price.
    #[error("Invalid price: {price} (must be greater than 0)")]
    InvalidPrice { price: i64 },
}

/// A farmer's crop offering.
///
/// Payload fields are immutable after submission; only the status moves,
/// through moderation and the farmer's close action.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Listing {
    id: Option<EntityId>,
    farmer_id: Option<UserId>,
    crop_name: String,
    quantity_kg: u32,
    price_per_kg: Money,
    state: ListingState,
    rejection_reason: Option<String>,
}

impl Entity for Listing {
    type Event = ListingEvent;
    type Error = ListingError;

    fn entity_type() -> &'static str {
        "Listing"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            ListingEvent::ListingSubmitted(data) => {
                self.id = Some(data.listing_id);
                self.farmer_id = Some(data.farmer_id);
                self.crop_name = data.crop_name;
                self.quantity_kg = data.quantity_kg;
                self.price_per_kg = data.price_per_kg;
                self.state = ListingState::PendingReview;
            }
            ListingEvent::ListingAccepted(_) => {
                self.state = ListingState::Listed;
            }
            ListingEvent::ListingRejected(data) => {
                self.state = ListingState::Rejected;
                self.rejection_reason = Some(data.reason);
            }
            ListingEvent::ListingClosed(_) => {
                self.state = ListingState::Closed;
            }
        }
    }
}

// Query methods
impl Listing {
    /// Returns the owning farmer.
    pub fn farmer_id(&self) -> Option<UserId> {
        self.farmer_id
    }

    /// Returns the crop name.
    pub fn crop_name(&self) -> &str {
        &self.crop_name
    }

    /// Returns the offered quantity in kilograms.
    pub fn quantity_kg(&self) -> u32 {
        self.quantity_kg
    }

    /// Returns the price per kilogram.
    pub fn price_per_kg(&self) -> Money {
        self.price_per_kg
    }

    /// Returns the current state.
    pub fn state(&self) -> ListingState {
        self.state
    }

    /// Returns the rejection reason, if the listing was rejected.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Returns the total value of the full offered quantity.
    pub fn total_value(&self) -> Money {
        self.price_per_kg.multiply(self.quantity_kg)
    }
}

// Command methods (return events)
impl Listing {
    /// Submits a new crop listing for moderation.
    pub fn submit(
        &self,
        listing_id: EntityId,
        farmer: Actor,
        crop_name: impl Into<String>,
        quantity_kg: u32,
        price_per_kg: Money,
    ) -> Result<Vec<ListingEvent>, ListingError> {
        if self.id.is_some() {
            return Err(ListingError::AlreadySubmitted);
        }

        if farmer.role != Role::Farmer {
            return Err(ListingError::UnauthorizedRole {
                role: farmer.role,
                action: "submit",
            });
        }

        if quantity_kg == 0 {
            return Err(ListingError::InvalidQuantity { quantity_kg });
        }

        if !price_per_kg.is_positive() {
            return Err(ListingError::InvalidPrice {
                price: price_per_kg.piasters(),
            });
        }

        Ok(vec![ListingEvent::ListingSubmitted(ListingSubmittedData {
            listing_id,
            farmer_id: farmer.user_id,
            crop_name: crop_name.into(),
            quantity_kg,
            price_per_kg,
            submitted_at: Utc::now(),
        })])
    }

    /// Accepts the listing. Admin only.
    pub fn accept(&self, actor: Actor) -> Result<Vec<ListingEvent>, ListingError> {
        self.check_admin(actor, "accept")?;

        if !self.state.can_moderate() {
            return Err(ListingError::InvalidStateTransition {
                current_state: self.state,
                action: "accept",
            });
        }

        Ok(vec![ListingEvent::ListingAccepted(ListingModeratedData {
            moderated_at: Utc::now(),
            moderated_by: actor.user_id,
        })])
    }

    /// Rejects the listing. Admin only.
    pub fn reject(
        &self,
        actor: Actor,
        reason: impl Into<String>,
    ) -> Result<Vec<ListingEvent>, ListingError> {
        self.check_admin(actor, "reject")?;

        if !self.state.can_moderate() {
            return Err(ListingError::InvalidStateTransition {
                current_state: self.state,
                action: "reject",
            });
        }

        Ok(vec![ListingEvent::ListingRejected(ListingRejectedData {
            moderated_at: Utc::now(),
            moderated_by: actor.user_id,
            reason: reason.into(),
        })])
    }

    /// Closes the listing, irreversibly. Owning farmer only.
    pub fn close(&self, actor: Actor) -> Result<Vec<ListingEvent>, ListingError> {
        if actor.role != Role::Farmer {
            return Err(ListingError::UnauthorizedRole {
                role: actor.role,
                action: "close",
            });
        }

        if self.farmer_id != Some(actor.user_id) {
            return Err(ListingError::NotOwner { action: "close" });
        }

        if !self.state.can_close() {
            return Err(ListingError::InvalidStateTransition {
                current_state: self.state,
                action: "close",
            });
        }

        Ok(vec![ListingEvent::ListingClosed(ListingClosedData {
            closed_at: Utc::now(),
        })])
    }

    fn check_admin(&self, actor: Actor, action: &'static str) -> Result<(), ListingError> {
        if actor.role != Role::Admin {
            return Err(ListingError::UnauthorizedRole {
                role: actor.role,
                action,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_listing() -> (Listing, Actor) {
        let mut listing = Listing::default();
        let farmer = Actor::farmer(UserId::new());

        let events = listing
            .submit(
                EntityId::new(),
                farmer,
                "Onions",
                200,
                Money::from_piasters(750),
            )
            .unwrap();
        listing.apply_events(events);

        (listing, farmer)
    }

    #[test]
    fn submit_starts_pending_review() {
        let (listing, farmer) = submit_listing();
        assert_eq!(listing.state(), ListingState::PendingReview);
        assert_eq!(listing.farmer_id(), Some(farmer.user_id));
        assert_eq!(listing.crop_name(), "Onions");
        assert_eq!(listing.total_value(), Money::from_piasters(150_000));
    }

    #[test]
    fn submit_by_buyer_fails() {
        let listing = Listing::default();
        let result = listing.submit(
            EntityId::new(),
            Actor::buyer(UserId::new()),
            "Onions",
            10,
            Money::from_piasters(100),
        );
        assert!(matches!(result, Err(ListingError::UnauthorizedRole { .. })));
    }

    #[test]
    fn accept_moves_to_listed() {
        let (mut listing, _) = submit_listing();
        let admin = Actor::admin(UserId::new());

        listing.apply_events(listing.accept(admin).unwrap());
        assert_eq!(listing.state(), ListingState::Listed);
        assert!(listing.state().is_purchasable());
    }

    #[test]
    fn reject_is_terminal() {
        let (mut listing, _) = submit_listing();
        let admin = Actor::admin(UserId::new());

        listing.apply_events(listing.reject(admin, "Blurry photos").unwrap());
        assert_eq!(listing.state(), ListingState::Rejected);
        assert_eq!(listing.rejection_reason(), Some("Blurry photos"));
        assert!(listing.state().is_terminal());

        // No way out of Rejected
        let result = listing.accept(admin);
        assert!(matches!(
            result,
            Err(ListingError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn moderation_requires_admin() {
        let (listing, farmer) = submit_listing();
        assert!(matches!(
            listing.accept(farmer),
            Err(ListingError::UnauthorizedRole { .. })
        ));
        assert!(matches!(
            listing.reject(farmer, "no"),
            Err(ListingError::UnauthorizedRole { .. })
        ));
    }

    #[test]
    fn close_requires_listed_state() {
        let (listing, farmer) = submit_listing();
        let result = listing.close(farmer);
        assert!(matches!(
            result,
            Err(ListingError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn close_is_irreversible() {
        let (mut listing, farmer) = submit_listing();
        let admin = Actor::admin(UserId::new());

        listing.apply_events(listing.accept(admin).unwrap());
        listing.apply_events(listing.close(farmer).unwrap());
        assert_eq!(listing.state(), ListingState::Closed);
        assert!(listing.state().is_terminal());

        let result = listing.close(farmer);
        assert!(matches!(
            result,
            Err(ListingError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn close_by_other_farmer_fails() {
        let (mut listing, _) = submit_listing();
        let admin = Actor::admin(UserId::new());
        listing.apply_events(listing.accept(admin).unwrap());

        let stranger = Actor::farmer(UserId::new());
        assert!(matches!(
            listing.close(stranger),
            Err(ListingError::NotOwner { .. })
        ));
    }
}
