//! Order entity and related types.

mod aggregate;
mod events;
mod state;

pub use aggregate::Order;
pub use events::{
    OrderCancelledData, OrderDeliveredData, OrderEvent, OrderPlacedData, OrderShippedData,
    PaymentReleasedData,
};
pub use state::{EscrowState, OrderState};

use thiserror::Error;

use crate::actor::Role;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: OrderState,
        action: &'static str,
    },

    /// The action requires photo proof.
    #[error("Cannot {action} without at least one photo attached")]
    PhotosRequired { action: &'static str },

    /// The acting role may not invoke this transition.
    #[error("Role {role} may not {action}")]
    UnauthorizedRole { role: Role, action: &'static str },

    /// The actor is not the party this order belongs to.
    #[error("Only the owning party may {action}")]
    NotOwner { action: &'static str },

    /// The escrowed payment was already released.
    #[error("Escrowed payment already released")]
    EscrowAlreadyReleased,

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity_kg} kg (must be greater than 0)")]
    InvalidQuantity { quantity_kg: u32 },

    /// Invalid total amount.
    #[error("Invalid total: {total} (must be greater than 0)")]
    InvalidTotal { total: i64 },

    /// Order is already placed.
    #[error("Order already placed")]
    AlreadyPlaced,
}
