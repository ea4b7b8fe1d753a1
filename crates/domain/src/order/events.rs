//! Order domain events.

use chrono::{DateTime, Utc};
use common::{EntityId, UserId};
use serde::{Deserialize, Serialize};

use crate::entity::DomainEvent;
use crate::value_objects::{Money, PhotoRef};

/// Events that can occur on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    /// Order was placed by a buyer; payment moved to escrow.
    OrderPlaced(OrderPlacedData),

    /// Farmer shipped the crops with photo proof.
    OrderShipped(OrderShippedData),

    /// Buyer confirmed delivery with photo proof.
    OrderDelivered(OrderDeliveredData),

    /// Buyer cancelled the order before shipment.
    OrderCancelled(OrderCancelledData),

    /// Admin released the escrowed payment to the farmer.
    PaymentReleased(PaymentReleasedData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "OrderPlaced",
            OrderEvent::OrderShipped(_) => "OrderShipped",
            OrderEvent::OrderDelivered(_) => "OrderDelivered",
            OrderEvent::OrderCancelled(_) => "OrderCancelled",
            OrderEvent::PaymentReleased(_) => "PaymentReleased",
        }
    }
}

/// Data for OrderPlaced event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlacedData {
    /// The unique order ID.
    pub order_id: EntityId,

    /// The listing the order was placed against.
    pub listing_id: EntityId,

    /// The buyer who placed the order.
    pub buyer_id: UserId,

    /// The farmer fulfilling the order.
    pub farmer_id: UserId,

    /// Crop name at the time of purchase.
    pub crop_name: String,

    /// Quantity purchased, in kilograms.
    pub quantity_kg: u32,

    /// Total amount moved to escrow.
    pub total: Money,

    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
}

/// Data for OrderShipped event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderShippedData {
    /// When the shipment was dispatched.
    pub shipped_at: DateTime<Utc>,

    /// Shipment photo proof, at least one.
    pub photos: Vec<PhotoRef>,
}

/// Data for OrderDelivered event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDeliveredData {
    /// When delivery was confirmed.
    pub delivered_at: DateTime<Utc>,

    /// Delivery photo proof, at least one.
    pub photos: Vec<PhotoRef>,
}

/// Data for OrderCancelled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCancelledData {
    /// When the order was cancelled.
    pub cancelled_at: DateTime<Utc>,

    /// Reason given by the buyer.
    pub reason: String,
}

/// Data for PaymentReleased event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentReleasedData {
    /// When the payment was released.
    pub released_at: DateTime<Utc>,

    /// The admin who released it.
    pub released_by: UserId,
}

// Convenience constructors for events
impl OrderEvent {
    /// Creates an OrderPlaced event.
    #[allow(clippy::too_many_arguments)]
    pub fn order_placed(
        order_id: EntityId,
        listing_id: EntityId,
        buyer_id: UserId,
        farmer_id: UserId,
        crop_name: impl Into<String>,
        quantity_kg: u32,
        total: Money,
    ) -> Self {
        OrderEvent::OrderPlaced(OrderPlacedData {
            order_id,
            listing_id,
            buyer_id,
            farmer_id,
            crop_name: crop_name.into(),
            quantity_kg,
            total,
            placed_at: Utc::now(),
        })
    }

    /// Creates an OrderShipped event.
    pub fn order_shipped(photos: Vec<PhotoRef>) -> Self {
        OrderEvent::OrderShipped(OrderShippedData {
            shipped_at: Utc::now(),
            photos,
        })
    }

    /// Creates an OrderDelivered event.
    pub fn order_delivered(photos: Vec<PhotoRef>) -> Self {
        OrderEvent::OrderDelivered(OrderDeliveredData {
            delivered_at: Utc::now(),
            photos,
        })
    }

    /// Creates an OrderCancelled event.
    pub fn order_cancelled(reason: impl Into<String>) -> Self {
        OrderEvent::OrderCancelled(OrderCancelledData {
            cancelled_at: Utc::now(),
            reason: reason.into(),
        })
    }

    /// Creates a PaymentReleased event.
    pub fn payment_released(released_by: UserId) -> Self {
        OrderEvent::PaymentReleased(PaymentReleasedData {
            released_at: Utc::now(),
            released_by,
        })
    }
}
