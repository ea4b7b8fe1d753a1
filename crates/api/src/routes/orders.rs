//! Order fulfillment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use domain::{Entity, Order, PhotoRef};
use market::{BuyerDesk, FarmerDesk};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_entity_id, parse_user_id, resolve_lang};

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub listing_id: String,
    pub buyer_id: String,
    pub farmer_id: String,
    pub crop_name: String,
    pub quantity_kg: u32,
    pub total_piasters: i64,
    pub state: String,
    pub escrow: String,
    pub shipment_photos: Vec<String>,
    pub delivery_photos: Vec<String>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().map(|id| id.to_string()).unwrap_or_default(),
            listing_id: order
                .listing_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            buyer_id: order
                .buyer_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            farmer_id: order
                .farmer_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            crop_name: order.crop_name().to_string(),
            quantity_kg: order.quantity_kg(),
            total_piasters: order.total().piasters(),
            state: order.state().to_string(),
            escrow: order.escrow().to_string(),
            shipment_photos: order
                .shipment_photos()
                .iter()
                .map(|p| p.to_string())
                .collect(),
            delivery_photos: order
                .delivery_photos()
                .iter()
                .map(|p| p.to_string())
                .collect(),
        }
    }
}

#[derive(Deserialize)]
pub struct ShipOrderRequest {
    pub farmer_id: String,
    pub photos: Vec<String>,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct DeliverOrderRequest {
    pub buyer_id: String,
    pub photos: Vec<String>,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct CancelOrderRequest {
    pub buyer_id: String,
    pub reason: String,
    pub lang: Option<String>,
}

fn photo_refs(raw: Vec<String>) -> Vec<PhotoRef> {
    raw.into_iter().map(PhotoRef::from).collect()
}

/// GET /orders/{id} — load an order by id.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_entity_id(&order_id)?;
    let order = state
        .market
        .order(order_id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Order {order_id} not found")))?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /orders/{id}/ship — farmer ships with photo proof.
#[tracing::instrument(skip(state, req))]
pub async fn ship(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(req): Json<ShipOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_entity_id(&order_id)?;
    let farmer_id = parse_user_id(&req.farmer_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    let desk = FarmerDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        farmer_id,
        lang,
    );

    let order = desk.ship_order(order_id, photo_refs(req.photos)).await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /orders/{id}/deliver — buyer confirms delivery with photo proof.
#[tracing::instrument(skip(state, req))]
pub async fn deliver(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(req): Json<DeliverOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_entity_id(&order_id)?;
    let buyer_id = parse_user_id(&req.buyer_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    let desk = BuyerDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        buyer_id,
        lang,
    );

    let order = desk
        .confirm_delivery(order_id, photo_refs(req.photos))
        .await?;
    Ok(Json(OrderResponse::from(&order)))
}

/// POST /orders/{id}/cancel — buyer cancels a pending order.
#[tracing::instrument(skip(state, req))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Path(order_id): Path<String>,
    Json(req): Json<CancelOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order_id = parse_entity_id(&order_id)?;
    let buyer_id = parse_user_id(&req.buyer_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    let desk = BuyerDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        buyer_id,
        lang,
    );

    let order = desk.cancel_order(order_id, req.reason).await?;
    Ok(Json(OrderResponse::from(&order)))
}
