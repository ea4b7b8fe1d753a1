//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{
    DomainError, ListingError, OrderError, VerificationError, WithdrawalError,
};
use market::MarketError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The current wizard step's validator returned false; forward
    /// navigation stays disabled. Mirrors the disabled-control semantics
    /// of the client.
    ValidationBlocked { step: &'static str },
    /// Market layer error.
    Market(MarketError),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ValidationBlocked { step } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Step '{step}' is not valid yet"),
            ),
            ApiError::Market(err) => market_error_to_response(err),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn market_error_to_response(err: MarketError) -> (StatusCode, String) {
    let status = match &err {
        MarketError::NotFound { .. } => StatusCode::NOT_FOUND,
        MarketError::ListingNotPurchasable { .. } => StatusCode::CONFLICT,
        MarketError::Wallet(_) => StatusCode::UNPROCESSABLE_ENTITY,
        MarketError::Gateway(_) => StatusCode::BAD_GATEWAY,
        // Flow misuse: terminal actions only run after the wizard
        // completed, so reaching these over HTTP is a server bug.
        MarketError::WizardIncomplete { .. } | MarketError::MissingField { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        MarketError::Domain(domain_err) => domain_error_status(domain_err),
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "internal server error");
    }
    (status, err.to_string())
}

fn domain_error_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Order(e) => match e {
            OrderError::UnauthorizedRole { .. } | OrderError::NotOwner { .. } => {
                StatusCode::FORBIDDEN
            }
            OrderError::InvalidStateTransition { .. }
            | OrderError::EscrowAlreadyReleased
            | OrderError::AlreadyPlaced => StatusCode::CONFLICT,
            OrderError::PhotosRequired { .. }
            | OrderError::InvalidQuantity { .. }
            | OrderError::InvalidTotal { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        },
        DomainError::Listing(e) => match e {
            ListingError::UnauthorizedRole { .. } | ListingError::NotOwner { .. } => {
                StatusCode::FORBIDDEN
            }
            ListingError::InvalidStateTransition { .. } | ListingError::AlreadySubmitted => {
                StatusCode::CONFLICT
            }
            ListingError::InvalidQuantity { .. } | ListingError::InvalidPrice { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        },
        DomainError::Withdrawal(e) => match e {
            WithdrawalError::UnauthorizedRole { .. } => StatusCode::FORBIDDEN,
            WithdrawalError::InvalidStateTransition { .. } | WithdrawalError::AlreadyRequested => {
                StatusCode::CONFLICT
            }
            WithdrawalError::InsufficientBalance { .. }
            | WithdrawalError::InvalidAmount { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        },
        DomainError::Verification(e) => match e {
            VerificationError::UnauthorizedRole { .. } => StatusCode::FORBIDDEN,
            VerificationError::InvalidStateTransition { .. }
            | VerificationError::AlreadySubmitted => StatusCode::CONFLICT,
            VerificationError::DocumentsIncomplete
            | VerificationError::RoleNotRegistrable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        },
        DomainError::EntityNotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::DraftStore(_) | DomainError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<MarketError> for ApiError {
    fn from(err: MarketError) -> Self {
        ApiError::Market(err)
    }
}
