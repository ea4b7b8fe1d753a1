//! Crop listing endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{Entity, Listing, Money};
use market::FarmerDesk;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_entity_id, parse_user_id, resolve_lang};

#[derive(Serialize)]
pub struct ListingResponse {
    pub id: String,
    pub farmer_id: String,
    pub crop_name: String,
    pub quantity_kg: u32,
    pub price_per_kg_piasters: i64,
    pub state: String,
}

impl From<&Listing> for ListingResponse {
    fn from(listing: &Listing) -> Self {
        Self {
            id: listing.id().map(|id| id.to_string()).unwrap_or_default(),
            farmer_id: listing
                .farmer_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            crop_name: listing.crop_name().to_string(),
            quantity_kg: listing.quantity_kg(),
            price_per_kg_piasters: listing.price_per_kg().piasters(),
            state: listing.state().to_string(),
        }
    }
}

#[derive(Deserialize)]
pub struct SubmitListingRequest {
    pub farmer_id: String,
    pub crop_name: String,
    pub quantity_kg: u32,
    pub price_per_kg_piasters: i64,
    pub lang: Option<String>,
}

#[derive(Deserialize)]
pub struct CloseListingRequest {
    pub farmer_id: String,
    pub lang: Option<String>,
}

/// GET /listings — listings open for purchase.
pub async fn browse(State(state): State<Arc<AppState>>) -> Json<Vec<ListingResponse>> {
    let listings = state.market.open_listings().await;
    Json(listings.iter().map(ListingResponse::from).collect())
}

/// POST /listings — farmer submits a listing for moderation.
#[tracing::instrument(skip(state, req))]
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitListingRequest>,
) -> Result<(StatusCode, Json<ListingResponse>), ApiError> {
    let farmer_id = parse_user_id(&req.farmer_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    let desk = FarmerDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        farmer_id,
        lang,
    );

    let listing = desk
        .submit_listing(
            req.crop_name,
            req.quantity_kg,
            Money::from_piasters(req.price_per_kg_piasters),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ListingResponse::from(&listing))))
}

/// POST /listings/{id}/close — farmer closes a listed offering.
#[tracing::instrument(skip(state, req))]
pub async fn close(
    State(state): State<Arc<AppState>>,
    Path(listing_id): Path<String>,
    Json(req): Json<CloseListingRequest>,
) -> Result<Json<ListingResponse>, ApiError> {
    let listing_id = parse_entity_id(&listing_id)?;
    let farmer_id = parse_user_id(&req.farmer_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    let desk = FarmerDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        farmer_id,
        lang,
    );

    let listing = desk.close_listing(listing_id).await?;
    Ok(Json(ListingResponse::from(&listing)))
}
