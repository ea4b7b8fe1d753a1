//! Marketplace session layer.
//!
//! Sits between the domain entities and the HTTP surface:
//! - [`Market`] as the in-memory registry holding every entity
//! - Role desks ([`FarmerDesk`], [`BuyerDesk`], [`AdminDesk`]) exposing
//!   exactly the actions each role may take
//! - Wizard flows ([`SignupFlow`], [`CheckoutFlow`]) driving the
//!   multi-step forms to their terminal actions
//! - [`NotificationCenter`] collecting the bilingual toasts every action
//!   surfaces

pub mod desk;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod notify;
pub mod registry;

pub use desk::{AdminDesk, BuyerDesk, FarmerDesk};
pub use error::MarketError;
pub use flows::{CheckoutFlow, OrderConfirmation, ProductPayload, SignupFlow, SignupOutcome};
pub use gateway::{PaymentGateway, PaymentReceipt, SimulatedPaymentGateway};
pub use notify::{Lang, MessageKey, NotificationCenter, Toast, ToastLevel};
pub use registry::Market;
