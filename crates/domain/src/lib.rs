//! Domain layer for the souq marketplace.
//!
//! This crate provides the core domain logic:
//! - Entity and DomainEvent traits for state-machine-driven entities
//! - Order, Listing, Withdrawal, and VerificationRequest lifecycles
//! - The generic linear wizard controller with per-step validators
//! - Canonical signup and checkout wizard flows

pub mod actor;
pub mod entity;
pub mod error;
pub mod listing;
pub mod order;
pub mod value_objects;
pub mod verification;
pub mod withdrawal;
pub mod wizard;

pub use actor::{Actor, Role};
pub use entity::{DomainEvent, Entity};
pub use error::DomainError;
pub use listing::{Listing, ListingError, ListingEvent, ListingState};
pub use order::{EscrowState, Order, OrderError, OrderEvent, OrderState};
pub use value_objects::{Money, PhotoRef, Wallet, WalletError};
pub use verification::{
    IdentityDocuments, VerificationError, VerificationEvent, VerificationRequest,
    VerificationState,
};
pub use withdrawal::{Withdrawal, WithdrawalError, WithdrawalEvent, WithdrawalState};
pub use wizard::{
    Advance, FieldMap, FieldValue, Retreat, SessionCheckpoint, StepDefinition, StepValidator,
    WizardSession, flows, validators,
};
