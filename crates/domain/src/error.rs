//! Domain error types.

use draft_store::DraftStoreError;
use thiserror::Error;

use crate::listing::ListingError;
use crate::order::OrderError;
use crate::verification::VerificationError;
use crate::withdrawal::WithdrawalError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in an order.
    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    /// An error occurred in a crop listing.
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    /// An error occurred in a withdrawal request.
    #[error("Withdrawal error: {0}")]
    Withdrawal(#[from] WithdrawalError),

    /// An error occurred in a verification request.
    #[error("Verification error: {0}")]
    Verification(#[from] VerificationError),

    /// An error occurred in the draft store.
    #[error("Draft store error: {0}")]
    DraftStore(#[from] DraftStoreError),

    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {entity_id}")]
    EntityNotFound {
        entity_type: &'static str,
        entity_id: String,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
