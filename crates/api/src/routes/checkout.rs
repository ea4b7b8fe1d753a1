//! Checkout wizard endpoints.
//!
//! Checkout is one in-memory session per started flow; nothing survives a
//! restart. The product payload travels with the session and the order
//! confirmation is returned from the final advance.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::EntityId;
use domain::{Advance, FieldValue, Retreat};
use market::{CheckoutFlow, ProductPayload};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_entity_id, parse_user_id, resolve_lang};

#[derive(Deserialize)]
pub struct StartCheckoutRequest {
    pub buyer_id: String,
    pub listing_id: String,
    pub quantity_kg: u32,
    /// Session language override (`en` or `ar`).
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct CheckoutStateResponse {
    pub checkout_id: String,
    pub step: &'static str,
    pub step_index: usize,
    pub step_valid: bool,
    pub crop_name: String,
    pub quantity_kg: u32,
    pub total_piasters: i64,
}

#[derive(Deserialize)]
pub struct UpdateFieldRequest {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceResponse {
    Moved {
        step: &'static str,
    },
    /// The wizard completed and the order was placed; the confirmation
    /// payload is passed forward to the success screen.
    Completed {
        order_id: String,
        total_piasters: i64,
        payment_method: String,
        payment_reference: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RetreatResponse {
    Moved { step: &'static str },
    Abandoned,
}

fn state_response(checkout_id: EntityId, flow: &CheckoutFlow) -> CheckoutStateResponse {
    let session = flow.session();
    let product = flow.product();
    CheckoutStateResponse {
        checkout_id: checkout_id.to_string(),
        step: session.current_step().name,
        step_index: session.current_index(),
        step_valid: session.is_step_valid(session.current_index()),
        crop_name: product.crop_name.clone(),
        quantity_kg: product.quantity_kg,
        total_piasters: product.total().piasters(),
    }
}

/// POST /checkout/start — begin a checkout against an open listing.
#[tracing::instrument(skip(state, req))]
pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartCheckoutRequest>,
) -> Result<Json<CheckoutStateResponse>, ApiError> {
    let buyer_id = parse_user_id(&req.buyer_id)?;
    let listing_id = parse_entity_id(&req.listing_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);

    let listing = state
        .market
        .listing(listing_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Listing {listing_id} not found")))?;
    let product = ProductPayload::from_listing(&listing, req.quantity_kg)?;

    let flow = CheckoutFlow::start(product, buyer_id, lang, state.notifications.clone());
    let checkout_id = EntityId::new();

    let response = state_response(checkout_id, &flow);
    state.checkouts.write().await.insert(checkout_id, flow);
    Ok(Json(response))
}

/// POST /checkout/{id}/fields — merge one field into the wizard data.
pub async fn update_field(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<CheckoutStateResponse>, ApiError> {
    let checkout_id = parse_entity_id(&checkout_id)?;
    let mut checkouts = state.checkouts.write().await;
    let flow = checkouts
        .get_mut(&checkout_id)
        .ok_or_else(|| ApiError::NotFound(format!("No checkout session {checkout_id}")))?;

    flow.update_field(req.field, req.value);
    Ok(Json(state_response(checkout_id, flow)))
}

/// POST /checkout/{id}/advance — attempt forward navigation.
#[tracing::instrument(skip(state))]
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
) -> Result<Json<AdvanceResponse>, ApiError> {
    let checkout_id = parse_entity_id(&checkout_id)?;
    let mut checkouts = state.checkouts.write().await;
    let flow = checkouts
        .get_mut(&checkout_id)
        .ok_or_else(|| ApiError::NotFound(format!("No checkout session {checkout_id}")))?;

    match flow.advance() {
        Advance::Blocked => Err(ApiError::ValidationBlocked {
            step: flow.session().current_step().name,
        }),
        Advance::Moved => Ok(Json(AdvanceResponse::Moved {
            step: flow.session().current_step().name,
        })),
        Advance::Completed => {
            let confirmation = flow.finish(&state.market, &state.gateway).await?;
            checkouts.remove(&checkout_id);

            Ok(Json(AdvanceResponse::Completed {
                order_id: confirmation.order_id.to_string(),
                total_piasters: confirmation.total.piasters(),
                payment_method: confirmation.payment_method,
                payment_reference: confirmation.payment_reference,
            }))
        }
    }
}

/// POST /checkout/{id}/retreat — step back, abandoning from step 0.
#[tracing::instrument(skip(state))]
pub async fn retreat(
    State(state): State<Arc<AppState>>,
    Path(checkout_id): Path<String>,
) -> Result<Json<RetreatResponse>, ApiError> {
    let checkout_id = parse_entity_id(&checkout_id)?;
    let mut checkouts = state.checkouts.write().await;
    let flow = checkouts
        .get_mut(&checkout_id)
        .ok_or_else(|| ApiError::NotFound(format!("No checkout session {checkout_id}")))?;

    match flow.retreat() {
        Retreat::Moved => Ok(Json(RetreatResponse::Moved {
            step: flow.session().current_step().name,
        })),
        Retreat::Abandoned => {
            checkouts.remove(&checkout_id);
            Ok(Json(RetreatResponse::Abandoned))
        }
    }
}
