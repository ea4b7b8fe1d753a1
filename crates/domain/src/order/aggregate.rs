//! Order entity implementation.

use common::{EntityId, UserId};
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, Role};
use crate::entity::Entity;
use crate::value_objects::{Money, PhotoRef};

use super::{
    EscrowState, OrderError, OrderEvent, OrderState,
    events::{OrderDeliveredData, OrderPlacedData, OrderShippedData},
};

/// An order placed by a buyer against a crop listing.
///
/// Carries two coupled state machines: the fulfillment lifecycle
/// (pending → shipped → delivered, or pending → cancelled) and the escrow
/// lifecycle of the payment (on hold → released).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier.
    id: Option<EntityId>,

    /// The listing the order was placed against.
    listing_id: Option<EntityId>,

    /// The buyer who placed the order.
    buyer_id: Option<UserId>,

    /// The farmer fulfilling the order.
    farmer_id: Option<UserId>,

    /// Crop name captured at purchase time.
    crop_name: String,

    /// Quantity purchased, in kilograms.
    quantity_kg: u32,

    /// Total amount held in escrow.
    total: Money,

    /// Fulfillment state.
    state: OrderState,

    /// Escrow state of the payment.
    escrow: EscrowState,

    /// Photo proof attached at shipment.
    shipment_photos: Vec<PhotoRef>,

    /// Photo proof attached at delivery confirmation.
    delivery_photos: Vec<PhotoRef>,
}

impl Entity for Order {
    type Event = OrderEvent;
    type Error = OrderError;

    fn entity_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            OrderEvent::OrderPlaced(data) => self.apply_placed(data),
            OrderEvent::OrderShipped(data) => self.apply_shipped(data),
            OrderEvent::OrderDelivered(data) => self.apply_delivered(data),
            OrderEvent::OrderCancelled(_) => {
                self.state = OrderState::Cancelled;
            }
            OrderEvent::PaymentReleased(_) => {
                self.escrow = EscrowState::Released;
            }
        }
    }
}

// Query methods
impl Order {
    /// Returns the listing this order was placed against.
    pub fn listing_id(&self) -> Option<EntityId> {
        self.listing_id
    }

    /// Returns the buyer.
    pub fn buyer_id(&self) -> Option<UserId> {
        self.buyer_id
    }

    /// Returns the farmer.
    pub fn farmer_id(&self) -> Option<UserId> {
        self.farmer_id
    }

    /// Returns the crop name.
    pub fn crop_name(&self) -> &str {
        &self.crop_name
    }

    /// Returns the purchased quantity in kilograms.
    pub fn quantity_kg(&self) -> u32 {
        self.quantity_kg
    }

    /// Returns the escrowed total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns the fulfillment state.
    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Returns the escrow state.
    pub fn escrow(&self) -> EscrowState {
        self.escrow
    }

    /// Returns the shipment photo proof.
    pub fn shipment_photos(&self) -> &[PhotoRef] {
        &self.shipment_photos
    }

    /// Returns the delivery photo proof.
    pub fn delivery_photos(&self) -> &[PhotoRef] {
        &self.delivery_photos
    }

    /// Returns true if the order is in a terminal fulfillment state.
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

// Command methods (return events)
impl Order {
    /// Places a new order against a listing. Payment goes on escrow.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &self,
        order_id: EntityId,
        listing_id: EntityId,
        buyer: Actor,
        farmer_id: UserId,
        crop_name: impl Into<String>,
        quantity_kg: u32,
        total: Money,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        if self.id.is_some() {
            return Err(OrderError::AlreadyPlaced);
        }

        if buyer.role != Role::Buyer {
            return Err(OrderError::UnauthorizedRole {
                role: buyer.role,
                action: "place",
            });
        }

        if quantity_kg == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity_kg,
            });
        }

        if !total.is_positive() {
            return Err(OrderError::InvalidTotal {
                total: total.piasters(),
            });
        }

        Ok(vec![OrderEvent::order_placed(
            order_id,
            listing_id,
            buyer.user_id,
            farmer_id,
            crop_name,
            quantity_kg,
            total,
        )])
    }

    /// Ships the order. Farmer only; requires at least one photo.
    pub fn ship(&self, actor: Actor, photos: Vec<PhotoRef>) -> Result<Vec<OrderEvent>, OrderError> {
        self.check_owner(actor, Role::Farmer, self.farmer_id, "ship")?;

        if photos.is_empty() {
            return Err(OrderError::PhotosRequired { action: "ship" });
        }

        if !self.state.can_ship() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.state,
                action: "ship",
            });
        }

        Ok(vec![OrderEvent::order_shipped(photos)])
    }

    /// Confirms delivery. Buyer only; requires at least one photo.
    pub fn deliver(
        &self,
        actor: Actor,
        photos: Vec<PhotoRef>,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.check_owner(actor, Role::Buyer, self.buyer_id, "deliver")?;

        if photos.is_empty() {
            return Err(OrderError::PhotosRequired { action: "deliver" });
        }

        if !self.state.can_deliver() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.state,
                action: "deliver",
            });
        }

        Ok(vec![OrderEvent::order_delivered(photos)])
    }

    /// Cancels the order. Buyer only; only before shipment.
    pub fn cancel(
        &self,
        actor: Actor,
        reason: impl Into<String>,
    ) -> Result<Vec<OrderEvent>, OrderError> {
        self.check_owner(actor, Role::Buyer, self.buyer_id, "cancel")?;

        if !self.state.can_cancel() {
            return Err(OrderError::InvalidStateTransition {
                current_state: self.state,
                action: "cancel",
            });
        }

        Ok(vec![OrderEvent::order_cancelled(reason)])
    }

    /// Releases the escrowed payment to the farmer. Admin only.
    pub fn release_payment(&self, actor: Actor) -> Result<Vec<OrderEvent>, OrderError> {
        if actor.role != Role::Admin {
            return Err(OrderError::UnauthorizedRole {
                role: actor.role,
                action: "release payment",
            });
        }

        if !self.escrow.can_release() {
            return Err(OrderError::EscrowAlreadyReleased);
        }

        Ok(vec![OrderEvent::payment_released(actor.user_id)])
    }

    fn check_owner(
        &self,
        actor: Actor,
        required: Role,
        owner: Option<UserId>,
        action: &'static str,
    ) -> Result<(), OrderError> {
        if actor.role != required {
            return Err(OrderError::UnauthorizedRole {
                role: actor.role,
                action,
            });
        }
        if owner != Some(actor.user_id) {
            return Err(OrderError::NotOwner { action });
        }
        Ok(())
    }
}

// Apply event helpers
impl Order {
    fn apply_placed(&mut self, data: OrderPlacedData) {
        self.id = Some(data.order_id);
        self.listing_id = Some(data.listing_id);
        self.buyer_id = Some(data.buyer_id);
        self.farmer_id = Some(data.farmer_id);
        self.crop_name = data.crop_name;
        self.quantity_kg = data.quantity_kg;
        self.total = data.total;
        self.state = OrderState::Pending;
        self.escrow = EscrowState::OnHold;
    }

    fn apply_shipped(&mut self, data: OrderShippedData) {
        self.state = OrderState::Shipped;
        self.shipment_photos = data.photos;
    }

    fn apply_delivered(&mut self, data: OrderDeliveredData) {
        self.state = OrderState::Delivered;
        self.delivery_photos = data.photos;
    }
}
