//! Per-role desks.
//!
//! Each desk exposes exactly the actions its role may take and the views
//! it renders from. Actor gating itself lives on the entities; the desks
//! wire actions to the registry and surface the toast for each outcome.

mod admin;
mod buyer;
mod farmer;

pub use admin::AdminDesk;
pub use buyer::BuyerDesk;
pub use farmer::FarmerDesk;

use domain::{DomainError, OrderError};

use crate::error::MarketError;
use crate::notify::MessageKey;

/// Picks the error toast for a rejected action.
fn error_toast_key(error: &MarketError) -> MessageKey {
    match error {
        MarketError::Domain(DomainError::Order(OrderError::PhotosRequired { .. })) => {
            MessageKey::PhotosMissing
        }
        _ => MessageKey::ActionNotAllowed,
    }
}
