//! Order and escrow state machines.

use serde::{Deserialize, Serialize};

/// The state of an order in its fulfillment lifecycle.
///
/// State transitions:
/// ```text
/// Pending ──► Shipped ──► Delivered
///    │
///    └──► Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderState {
    /// Order has been placed, awaiting shipment.
    #[default]
    Pending,

    /// Farmer has shipped the crops with photo proof.
    Shipped,

    /// Buyer has confirmed delivery with photo proof (terminal state).
    Delivered,

    /// Buyer cancelled before shipment (terminal state).
    Cancelled,
}

impl OrderState {
    /// Returns true if the order can be shipped in this state.
    pub fn can_ship(&self) -> bool {
        matches!(self, OrderState::Pending)
    }

    /// Returns true if delivery can be confirmed in this state.
    pub fn can_deliver(&self) -> bool {
        matches!(self, OrderState::Shipped)
    }

    /// Returns true if the order can be cancelled in this state.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderState::Pending)
    }

    /// Returns true if this is a terminal state (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Delivered | OrderState::Cancelled)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Pending => "Pending",
            OrderState::Shipped => "Shipped",
            OrderState::Delivered => "Delivered",
            OrderState::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for OrderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The state of an order's escrowed payment.
///
/// Payment is held on escrow from the moment the order is placed until an
/// admin releases it to the farmer. `Released` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EscrowState {
    /// Payment held pending admin review.
    #[default]
    OnHold,

    /// Payment released to the farmer (terminal state).
    Released,
}

impl EscrowState {
    /// Returns true if the payment can be released in this state.
    pub fn can_release(&self) -> bool {
        matches!(self, EscrowState::OnHold)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            EscrowState::OnHold => "OnHold",
            EscrowState::Released => "Released",
        }
    }
}

impl std::fmt::Display for EscrowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_pending() {
        assert_eq!(OrderState::default(), OrderState::Pending);
    }

    #[test]
    fn pending_can_ship() {
        assert!(OrderState::Pending.can_ship());
        assert!(!OrderState::Shipped.can_ship());
        assert!(!OrderState::Delivered.can_ship());
        assert!(!OrderState::Cancelled.can_ship());
    }

    #[test]
    fn shipped_can_deliver() {
        assert!(!OrderState::Pending.can_deliver());
        assert!(OrderState::Shipped.can_deliver());
        assert!(!OrderState::Delivered.can_deliver());
        assert!(!OrderState::Cancelled.can_deliver());
    }

    #[test]
    fn cancel_only_from_pending() {
        assert!(OrderState::Pending.can_cancel());
        assert!(!OrderState::Shipped.can_cancel());
        assert!(!OrderState::Delivered.can_cancel());
        assert!(!OrderState::Cancelled.can_cancel());
    }

    #[test]
    fn terminal_states() {
        assert!(!OrderState::Pending.is_terminal());
        assert!(!OrderState::Shipped.is_terminal());
        assert!(OrderState::Delivered.is_terminal());
        assert!(OrderState::Cancelled.is_terminal());
    }

    #[test]
    fn escrow_default_is_on_hold() {
        assert_eq!(EscrowState::default(), EscrowState::OnHold);
    }

    #[test]
    fn escrow_release_only_from_on_hold() {
        assert!(EscrowState::OnHold.can_release());
        assert!(!EscrowState::Released.can_release());
    }

    #[test]
    fn display() {
        assert_eq!(OrderState::Pending.to_string(), "Pending");
        assert_eq!(OrderState::Shipped.to_string(), "Shipped");
        assert_eq!(OrderState::Delivered.to_string(), "Delivered");
        assert_eq!(OrderState::Cancelled.to_string(), "Cancelled");
        assert_eq!(EscrowState::OnHold.to_string(), "OnHold");
        assert_eq!(EscrowState::Released.to_string(), "Released");
    }

    #[test]
    fn serialization_roundtrip() {
        let state = OrderState::Shipped;
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: OrderState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
