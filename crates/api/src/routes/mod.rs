//! HTTP route handlers.

pub mod admin;
pub mod checkout;
pub mod health;
pub mod listings;
pub mod metrics;
pub mod notifications;
pub mod orders;
pub mod signup;
pub mod wallet;

use common::{EntityId, UserId};
use market::Lang;

use crate::error::ApiError;

/// Parses a user id from a path or body string.
pub(crate) fn parse_user_id(s: &str) -> Result<UserId, ApiError> {
    let uuid = uuid::Uuid::parse_str(s)
        .map_err(|e| ApiError::BadRequest(format!("Invalid user id: {e}")))?;
    Ok(UserId::from_uuid(uuid))
}

/// Parses an entity id from a path or body string.
pub(crate) fn parse_entity_id(s: &str) -> Result<EntityId, ApiError> {
    let uuid = uuid::Uuid::parse_str(s)
        .map_err(|e| ApiError::BadRequest(format!("Invalid id: {e}")))?;
    Ok(EntityId::from_uuid(uuid))
}

/// Resolves the session language from an optional request override.
pub(crate) fn resolve_lang(requested: Option<&str>, default: Lang) -> Lang {
    requested.map(Lang::parse).unwrap_or(default)
}
