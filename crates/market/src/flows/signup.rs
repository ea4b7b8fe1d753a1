//! Signup wizard flow.
//!
//! Signup spans separate navigable pages, so the session checkpoints to
//! the draft store after every successful advance and rehydrates from the
//! draft on the next page load. Completion produces either an immediately
//! usable buyer profile or a farmer verification request queued for the
//! admin desk; either way the draft is cleared.

use common::{EntityId, UserId};
use domain::{
    Advance, FieldValue, IdentityDocuments, Retreat, Role, SessionCheckpoint, WizardSession,
    flows as wizard_flows,
    validators::keys,
};
use draft_store::{DraftKey, DraftStore};

use crate::error::MarketError;
use crate::notify::{Lang, MessageKey, NotificationCenter, Toast};
use crate::registry::Market;

/// Result of a completed signup.
#[derive(Debug, Clone)]
pub struct SignupOutcome {
    /// The newly registered user.
    pub user_id: UserId,

    /// The role they signed up for.
    pub role: Role,

    /// Registered email, handed to the verification-sent screen.
    pub email: String,

    /// The verification request queued for admin review (farmers only).
    pub verification_id: Option<EntityId>,
}

/// Drives the signup wizard for one user session.
pub struct SignupFlow<S: DraftStore> {
    store: S,
    key: DraftKey,
    user_id: UserId,
    session: WizardSession,
    lang: Lang,
    notifications: NotificationCenter,
}

impl<S: DraftStore> SignupFlow<S> {
    /// Starts (or resumes) a signup for the user session.
    ///
    /// If a draft exists under the user's signup key, the session picks
    /// up exactly where the last page load left off.
    pub async fn start(
        store: S,
        user_id: UserId,
        lang: Lang,
        notifications: NotificationCenter,
    ) -> Result<Self, MarketError> {
        let key = DraftKey::signup(user_id);

        let session = match store.load(&key).await? {
            Some(draft) => {
                let checkpoint: SessionCheckpoint = draft.restore()?;
                let steps = wizard_flows::signup_steps_for(&checkpoint.data);
                tracing::debug!(%key, "resuming signup from draft");
                WizardSession::from_checkpoint(steps, checkpoint)
            }
            None => WizardSession::new(wizard_flows::signup_steps(None)),
        };

        Ok(Self {
            store,
            key,
            user_id,
            session,
            lang,
            notifications,
        })
    }

    /// Returns the user this flow registers.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the underlying wizard session.
    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Merges a field value into the wizard data.
    ///
    /// Choosing a role rebuilds the step list: farmers get the three
    /// document sub-steps appended, buyers do not.
    pub fn update_field(&mut self, field: impl Into<String>, value: FieldValue) {
        let field = field.into();
        let is_role = field == keys::ROLE;
        self.session.update_field(field, value);

        if is_role {
            let checkpoint = self.session.to_checkpoint();
            let steps = wizard_flows::signup_steps_for(&checkpoint.data);
            self.session = WizardSession::from_checkpoint(steps, checkpoint);
        }
    }

    /// Attempts to advance, checkpointing the draft on success.
    pub async fn advance(&mut self) -> Result<Advance, MarketError> {
        let outcome = self.session.advance();
        if outcome == Advance::Moved {
            self.session
                .checkpoint(&self.store, self.key.clone())
                .await?;
        }
        Ok(outcome)
    }

    /// Moves back one step, abandoning (and discarding the draft) from
    /// the first.
    pub async fn retreat(&mut self) -> Result<Retreat, MarketError> {
        let outcome = self.session.retreat();
        if outcome == Retreat::Abandoned {
            self.store.clear(&self.key).await?;
        }
        Ok(outcome)
    }

    /// Explicitly abandons the flow and discards the draft.
    pub async fn abandon(&self) -> Result<(), MarketError> {
        self.store.clear(&self.key).await?;
        Ok(())
    }

    /// Runs the terminal action of a completed wizard.
    ///
    /// Farmers get a verification request queued for the admin desk;
    /// buyers are usable immediately. The draft is cleared either way.
    #[tracing::instrument(skip(self, market), fields(user = %self.user_id))]
    pub async fn finish(&self, market: &Market) -> Result<SignupOutcome, MarketError> {
        if !self.session.is_complete() {
            return Err(MarketError::WizardIncomplete { flow: "signup" });
        }

        let data = self.session.data();
        let role = data
            .text(keys::ROLE)
            .and_then(Role::parse)
            .ok_or(MarketError::MissingField { key: keys::ROLE })?;
        let email = data
            .text(keys::EMAIL)
            .ok_or(MarketError::MissingField { key: keys::EMAIL })?
            .to_string();

        let verification_id = if role == Role::Farmer {
            let documents = IdentityDocuments {
                id_front: data.file(keys::ID_FRONT).cloned(),
                id_back: data.file(keys::ID_BACK).cloned(),
                selfie: data.file(keys::SELFIE).cloned(),
            };

            let request_id = EntityId::new();
            let user_id = self.user_id;
            market
                .create_verification(|v| v.submit(request_id, user_id, role, documents))
                .await?;
            Some(request_id)
        } else {
            None
        };

        self.store.clear(&self.key).await?;
        metrics::counter!("signup_completions_total", "role" => role.as_str()).increment(1);
        self.notifications
            .push(Toast::success(MessageKey::SignupComplete, self.lang))
            .await;

        Ok(SignupOutcome {
            user_id: self.user_id,
            role,
            email,
            verification_id,
        })
    }
}
