//! Wizard flow orchestration.
//!
//! Two call sites instantiate the wizard controller: signup (separate
//! navigable pages, draft-checkpointed) and checkout (one in-memory
//! session carrying a product payload). Each flow owns its session and
//! runs the terminal action when the wizard completes.

mod checkout;
mod signup;

pub use checkout::{CheckoutFlow, OrderConfirmation, ProductPayload};
pub use signup::{SignupFlow, SignupOutcome};
