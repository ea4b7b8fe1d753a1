//! Signup wizard endpoints.
//!
//! The signup wizard spans separate navigable pages; each advance
//! checkpoints a draft keyed by the user, so a client can drop the
//! connection, come back, and POST /signup/start again to resume.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::UserId;
use domain::{Advance, FieldValue, Retreat};
use market::SignupFlow;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

use super::{parse_user_id, resolve_lang};

#[derive(Deserialize)]
pub struct StartSignupRequest {
    /// Resume an existing session, or omit to register a new user.
    pub user_id: Option<String>,
    /// Session language override (`en` or `ar`).
    pub lang: Option<String>,
}

#[derive(Serialize)]
pub struct SignupStateResponse {
    pub user_id: String,
    pub step: &'static str,
    pub step_index: usize,
    pub steps: Vec<&'static str>,
    pub step_valid: bool,
}

#[derive(Deserialize)]
pub struct UpdateFieldRequest {
    pub field: String,
    pub value: FieldValue,
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceResponse {
    /// Moved to the next step.
    Moved { step: &'static str },
    /// The wizard completed; the client navigates to the
    /// verification-sent screen with the email as a query parameter.
    Completed {
        email: String,
        role: &'static str,
        verification_id: Option<String>,
        next: String,
    },
}

#[derive(Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RetreatResponse {
    Moved { step: &'static str },
    Abandoned,
}

fn state_response(user_id: UserId, flow: &SignupFlow<draft_store::InMemoryDraftStore>) -> SignupStateResponse {
    let session = flow.session();
    SignupStateResponse {
        user_id: user_id.to_string(),
        step: session.current_step().name,
        step_index: session.current_index(),
        steps: session.steps().iter().map(|s| s.name).collect(),
        step_valid: session.is_step_valid(session.current_index()),
    }
}

/// POST /signup/start — begin or resume a signup session.
#[tracing::instrument(skip(state, req))]
pub async fn start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartSignupRequest>,
) -> Result<Json<SignupStateResponse>, ApiError> {
    let user_id = match req.user_id.as_deref() {
        Some(raw) => parse_user_id(raw)?,
        None => UserId::new(),
    };
    let lang = resolve_lang(req.lang.as_deref(), state.default_lang);

    let flow = SignupFlow::start(
        state.draft_store.clone(),
        user_id,
        lang,
        state.notifications.clone(),
    )
    .await?;

    let response = state_response(user_id, &flow);
    state.signups.write().await.insert(user_id, flow);
    Ok(Json(response))
}

/// POST /signup/{user_id}/fields — merge one field into the wizard data.
pub async fn update_field(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateFieldRequest>,
) -> Result<Json<SignupStateResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let mut signups = state.signups.write().await;
    let flow = signups
        .get_mut(&user_id)
        .ok_or_else(|| ApiError::NotFound(format!("No signup session for {user_id}")))?;

    flow.update_field(req.field, req.value);
    Ok(Json(state_response(user_id, flow)))
}

/// POST /signup/{user_id}/advance — attempt forward navigation.
#[tracing::instrument(skip(state))]
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<AdvanceResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let mut signups = state.signups.write().await;
    let flow = signups
        .get_mut(&user_id)
        .ok_or_else(|| ApiError::NotFound(format!("No signup session for {user_id}")))?;

    match flow.advance().await? {
        Advance::Blocked => Err(ApiError::ValidationBlocked {
            step: flow.session().current_step().name,
        }),
        Advance::Moved => Ok(Json(AdvanceResponse::Moved {
            step: flow.session().current_step().name,
        })),
        Advance::Completed => {
            let outcome = flow.finish(&state.market).await?;
            signups.remove(&user_id);

            let next = format!("/signup/verification-sent?email={}", outcome.email);
            Ok(Json(AdvanceResponse::Completed {
                email: outcome.email,
                role: outcome.role.as_str(),
                verification_id: outcome.verification_id.map(|id| id.to_string()),
                next,
            }))
        }
    }
}

/// POST /signup/{user_id}/retreat — step back, abandoning from step 0.
#[tracing::instrument(skip(state))]
pub async fn retreat(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<RetreatResponse>, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let mut signups = state.signups.write().await;
    let flow = signups
        .get_mut(&user_id)
        .ok_or_else(|| ApiError::NotFound(format!("No signup session for {user_id}")))?;

    match flow.retreat().await? {
        Retreat::Moved => Ok(Json(RetreatResponse::Moved {
            step: flow.session().current_step().name,
        })),
        Retreat::Abandoned => {
            signups.remove(&user_id);
            Ok(Json(RetreatResponse::Abandoned))
        }
    }
}
