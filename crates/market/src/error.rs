//! Market layer error types.

use common::EntityId;
use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the market session layer.
#[derive(Debug, Error)]
pub enum MarketError {
    /// A domain rule rejected the action.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The referenced entity does not exist.
    #[error("{entity_type} {entity_id} not found")]
    NotFound {
        entity_type: &'static str,
        entity_id: EntityId,
    },

    /// A flow's terminal action ran before its wizard completed.
    #[error("The {flow} wizard has not completed")]
    WizardIncomplete { flow: &'static str },

    /// A completed wizard is missing a field its terminal action needs.
    #[error("Completed wizard is missing field '{key}'")]
    MissingField { key: &'static str },

    /// The listing cannot be purchased in its current state.
    #[error("Listing {listing_id} is not open for purchase")]
    ListingNotPurchasable { listing_id: EntityId },

    /// A wallet operation failed.
    #[error("Wallet error: {0}")]
    Wallet(#[from] domain::WalletError),

    /// The payment gateway reported a failure.
    #[error("Payment error: {0}")]
    Gateway(#[from] crate::gateway::GatewayError),
}

impl From<domain::OrderError> for MarketError {
    fn from(e: domain::OrderError) -> Self {
        MarketError::Domain(DomainError::Order(e))
    }
}

impl From<domain::ListingError> for MarketError {
    fn from(e: domain::ListingError) -> Self {
        MarketError::Domain(DomainError::Listing(e))
    }
}

impl From<domain::WithdrawalError> for MarketError {
    fn from(e: domain::WithdrawalError) -> Self {
        MarketError::Domain(DomainError::Withdrawal(e))
    }
}

impl From<domain::VerificationError> for MarketError {
    fn from(e: domain::VerificationError) -> Self {
        MarketError::Domain(DomainError::Verification(e))
    }
}

impl From<draft_store::DraftStoreError> for MarketError {
    fn from(e: draft_store::DraftStoreError) -> Self {
        MarketError::Domain(DomainError::DraftStore(e))
    }
}
