//! Admin moderation endpoints.
//!
//! Each decision moves the entity to a terminal state, so the pending
//! queue returned by the matching GET no longer contains it.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::{Entity, VerificationRequest};
use market::AdminDesk;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

use super::listings::ListingResponse;
use super::orders::OrderResponse;
use super::wallet::WithdrawalResponse;
use super::{parse_entity_id, parse_user_id, resolve_lang};

#[derive(Serialize)]
pub struct VerificationResponse {
    pub id: String,
    pub user_id: String,
    pub requested_role: String,
    pub documents_complete: bool,
    pub state: String,
}

impl From<&VerificationRequest> for VerificationResponse {
    fn from(request: &VerificationRequest) -> Self {
        Self {
            id: request.id().map(|id| id.to_string()).unwrap_or_default(),
            user_id: request
                .user_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            requested_role: request
                .requested_role()
                .map(|r| r.to_string())
                .unwrap_or_default(),
            documents_complete: request.documents().is_complete(),
            state: request.state().to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct DecisionRequest {
    pub admin_id: String,
    /// Required by reject endpoints, ignored by approve/accept.
    pub reason: Option<String>,
    pub lang: Option<String>,
}

impl DecisionRequest {
    fn reason(&self) -> String {
        self.reason.clone().unwrap_or_default()
    }
}

fn desk(state: &AppState, req: &DecisionRequest) -> Result<AdminDesk, ApiError> {
    let admin_id = parse_user_id(&req.admin_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    Ok(AdminDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        admin_id,
        lang,
    ))
}

// -- Queues --

/// GET /admin/listings — the listing moderation queue.
pub async fn pending_listings(State(state): State<Arc<AppState>>) -> Json<Vec<ListingResponse>> {
    let listings = state.market.pending_listings().await;
    Json(listings.iter().map(ListingResponse::from).collect())
}

/// GET /admin/verifications — the user verification queue.
pub async fn pending_verifications(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<VerificationResponse>> {
    let requests = state.market.pending_verifications().await;
    Json(requests.iter().map(VerificationResponse::from).collect())
}

/// GET /admin/withdrawals — the withdrawal queue.
pub async fn pending_withdrawals(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<WithdrawalResponse>> {
    let withdrawals = state.market.pending_withdrawals().await;
    Json(withdrawals.iter().map(WithdrawalResponse::from).collect())
}

/// GET /admin/escrow — orders whose payment is still on hold.
pub async fn on_hold_orders(State(state): State<Arc<AppState>>) -> Json<Vec<OrderResponse>> {
    let orders = state.market.on_hold_orders().await;
    Json(orders.iter().map(OrderResponse::from).collect())
}

// -- Listing moderation --

/// POST /admin/listings/{id}/accept
#[tracing::instrument(skip(state, req))]
pub async fn accept_listing(
    State(state): State<Arc<AppState>>,
    Path(listing_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<ListingResponse>, ApiError> {
    let listing_id = parse_entity_id(&listing_id)?;
    let listing = desk(&state, &req)?.accept_listing(listing_id).await?;
    Ok(Json(ListingResponse::from(&listing)))
}

/// POST /admin/listings/{id}/reject
#[tracing::instrument(skip(state, req))]
pub async fn reject_listing(
    State(state): State<Arc<AppState>>,
    Path(listing_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<ListingResponse>, ApiError> {
    let listing_id = parse_entity_id(&listing_id)?;
    let listing = desk(&state, &req)?
        .reject_listing(listing_id, req.reason())
        .await?;
    Ok(Json(ListingResponse::from(&listing)))
}

// -- User verification --

/// POST /admin/verifications/{id}/approve
#[tracing::instrument(skip(state, req))]
pub async fn approve_verification(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<VerificationResponse>, ApiError> {
    let request_id = parse_entity_id(&request_id)?;
    let request = desk(&state, &req)?.approve_verification(request_id).await?;
    Ok(Json(VerificationResponse::from(&request)))
}

/// POST /admin/verifications/{id}/reject
#[tracing::instrument(skip(state, req))]
pub async fn reject_verification(
    State(state): State<Arc<AppState>>,
    Path(request_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<VerificationResponse>, ApiError> {
    let request_id = parse_entity_id(&request_id)?;
    let request = desk(&state, &req)?
        .reject_verification(request_id, req.reason())
        .await?;
    Ok(Json(VerificationResponse::from(&request)))
}

// -- Withdrawals --

/// POST /admin/withdrawals/{id}/approve
#[tracing::instrument(skip(state, req))]
pub async fn approve_withdrawal(
    State(state): State<Arc<AppState>>,
    Path(withdrawal_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<WithdrawalResponse>, ApiError> {
    let withdrawal_id = parse_entity_id(&withdrawal_id)?;
    let withdrawal = desk(&state, &req)?.approve_withdrawal(withdrawal_id).await?;
    Ok(Json(WithdrawalResponse::from(&withdrawal)))
}

/// POST /admin/withdrawals/{id}/reject
#[tracing::instrument(skip(state, req))]
pub async fn reject_withdrawal(
    State(state): State<Arc<AppState>>,
    Path(withdrawal_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<WithdrawalResponse>, ApiError> {
    let withdrawal_id = parse_entity_id(&withdrawal_id)?;
    let withdrawal = desk(&state, &req)?
        .reject_withdrawal(withdrawal_id, req.reason())
        .await?;
    Ok(Json(WithdrawalResponse::from(&withdrawal)))
}

// -- Escrow --

/// POST /admin/orders/{id}/release — release an escrowed payment.
#[tracing::instrument(skip(state, req))]
pub async fn release_payment(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(req): Json<DecisionRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_entity_id(&order_id)?;
    let order = desk(&state, &req)?.release_payment(order_id).await?;
    Ok(Json(OrderResponse::from(&order)))
}
