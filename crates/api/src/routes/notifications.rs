//! Toast notification endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use market::Toast;

use crate::state::AppState;

/// GET /notifications — drain the toasts surfaced since the last poll.
pub async fn drain(State(state): State<Arc<AppState>>) -> Json<Vec<Toast>> {
    Json(state.notifications.drain().await)
}
