use chrono::{DateTime, Utc};
use common::UserId;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Result;

/// Key under which a draft is stored.
///
/// Keys are scoped strings. Each wizard flow that checkpoints has one
/// well-known scope, so a reload of the same flow for the same user finds
/// its draft again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftKey(String);

impl DraftKey {
    /// Creates a key from a raw string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The signup wizard draft key for a user session.
    pub fn signup(user_id: UserId) -> Self {
        Self(format!("signup/{user_id}"))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DraftKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DraftKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DraftKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A checkpointed snapshot of in-progress wizard data.
///
/// The state is stored as JSON so the store does not need to know the
/// concrete session type being checkpointed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    /// The key this draft is stored under.
    pub key: DraftKey,

    /// The serialized wizard session state.
    pub state: serde_json::Value,

    /// When the draft was saved.
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    /// Creates a draft from a raw JSON state.
    pub fn new(key: DraftKey, state: serde_json::Value) -> Self {
        Self {
            key,
            state,
            saved_at: Utc::now(),
        }
    }

    /// Creates a draft by serializing the given state.
    pub fn from_state<T: Serialize>(key: DraftKey, state: &T) -> Result<Self> {
        Ok(Self {
            key,
            state: serde_json::to_value(state)?,
            saved_at: Utc::now(),
        })
    }

    /// Deserializes the draft back into a concrete state type.
    pub fn restore<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(self.state.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestState {
        step: usize,
        name: String,
    }

    #[test]
    fn signup_key_is_scoped_per_user() {
        let user = UserId::new();
        let key = DraftKey::signup(user);
        assert!(key.as_str().starts_with("signup/"));
        assert!(key.as_str().contains(&user.to_string()));
    }

    #[test]
    fn draft_from_state_roundtrip() {
        let state = TestState {
            step: 2,
            name: "Amina".to_string(),
        };
        let draft = Draft::from_state(DraftKey::new("test"), &state).unwrap();
        let restored: TestState = draft.restore().unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn restore_wrong_shape_fails() {
        let draft = Draft::new(DraftKey::new("test"), serde_json::json!({"other": true}));
        let result: Result<TestState> = draft.restore();
        assert!(result.is_err());
    }
}
