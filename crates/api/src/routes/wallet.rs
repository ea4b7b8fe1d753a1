//! Wallet and withdrawal endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{Entity, Money, Withdrawal};
use market::FarmerDesk;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_user_id, resolve_lang};

#[derive(Serialize)]
pub struct WithdrawalResponse {
    pub id: String,
    pub farmer_id: String,
    pub amount_piasters: i64,
    pub state: String,
}

impl From<&Withdrawal> for WithdrawalResponse {
    fn from(withdrawal: &Withdrawal) -> Self {
        Self {
            id: withdrawal.id().map(|id| id.to_string()).unwrap_or_default(),
            farmer_id: withdrawal
                .farmer_id()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            amount_piasters: withdrawal.amount().piasters(),
            state: withdrawal.state().to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct WalletResponse {
    pub balance_piasters: i64,
}

#[derive(Deserialize)]
pub struct RequestWithdrawalRequest {
    pub farmer_id: String,
    pub amount_piasters: i64,
    pub lang: Option<String>,
}

/// GET /wallet/{user_id} — a farmer's wallet balance.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<WalletResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let wallet = state.market.wallet_of(user_id).await;
    Ok(Json(WalletResponse {
        balance_piasters: wallet.balance().piasters(),
    }))
}

/// POST /withdrawals — farmer requests a withdrawal.
#[tracing::instrument(skip(state, req))]
pub async fn request(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RequestWithdrawalRequest>,
) -> Result<(StatusCode, Json<WithdrawalResponse>), ApiError> {
    let farmer_id = parse_user_id(&req.farmer_id)?;
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);
    let desk = FarmerDesk::new(
        state.market.clone(),
        state.notifications.clone(),
        farmer_id,
        lang,
    );

    let withdrawal = desk
        .request_withdrawal(Money::from_piasters(req.amount_piasters))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(WithdrawalResponse::from(&withdrawal)),
    ))
}
