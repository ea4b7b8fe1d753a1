//! The generic linear wizard controller.

use draft_store::{Draft, DraftKey, DraftStore, DraftStoreError};
use serde::{Deserialize, Serialize};

use super::fields::{FieldMap, FieldValue};
use super::step::StepDefinition;

/// Outcome of a forward navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The current step was invalid; index and data are unchanged.
    ///
    /// This is gating, not an error: the UI disables the control, so an
    /// attempt against an invalid step is simply a no-op.
    Blocked,

    /// Moved to the next step.
    Moved,

    /// The last step was valid; the wizard is complete.
    Completed,
}

/// Outcome of a backward navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    /// Moved to the previous step.
    Moved,

    /// Already on the first step; the flow is abandoned (the caller
    /// closes the wizard and discards any draft).
    Abandoned,
}

/// Serializable snapshot of a session's progress, checkpointed to the
/// draft store. Step definitions are code, not data; they are rebuilt
/// from the flow on resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    /// Index of the step the user is on.
    pub current_index: usize,

    /// All field data accumulated so far.
    pub data: FieldMap,
}

/// A multi-step linear form flow with per-step validation gating.
///
/// Holds the current step index and the field data aggregate. Data is
/// never reset on navigation, and the session can only sit on step N when
/// steps 0..N-1 validated at the time they were advanced past.
#[derive(Debug, Clone)]
pub struct WizardSession {
    steps: Vec<StepDefinition>,
    current_index: usize,
    data: FieldMap,
    completed: bool,
}

impl WizardSession {
    /// Creates a session positioned on the first step.
    ///
    /// A wizard needs at least one step; an empty step list is a caller
    /// bug and the session would have nothing to render.
    pub fn new(steps: Vec<StepDefinition>) -> Self {
        debug_assert!(!steps.is_empty(), "wizard needs at least one step");
        Self {
            steps,
            current_index: 0,
            data: FieldMap::new(),
            completed: false,
        }
    }

    /// Rebuilds a session from a checkpoint and the flow's step list.
    ///
    /// The index is clamped into range in case the flow definition
    /// shrank between checkpoint and resume.
    pub fn from_checkpoint(steps: Vec<StepDefinition>, checkpoint: SessionCheckpoint) -> Self {
        let last = steps.len().saturating_sub(1);
        Self {
            current_index: checkpoint.current_index.min(last),
            data: checkpoint.data,
            steps,
            completed: false,
        }
    }

    /// Returns the current step index.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Returns the step the user is on.
    pub fn current_step(&self) -> &StepDefinition {
        &self.steps[self.current_index]
    }

    /// Returns all steps of the flow.
    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    /// Returns the accumulated field data.
    pub fn data(&self) -> &FieldMap {
        &self.data
    }

    /// Returns true if the wizard reached its terminal state.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Evaluates the validator of the step at `index`.
    ///
    /// Out-of-range indexes are simply invalid. Validation is evaluated
    /// on demand, never cached.
    pub fn is_step_valid(&self, index: usize) -> bool {
        self.steps
            .get(index)
            .is_some_and(|step| step.is_valid(&self.data))
    }

    /// Merges a field value into the data aggregate.
    ///
    /// Pure merge, last-write-wins, no validation side effect.
    pub fn update_field(&mut self, key: impl Into<String>, value: FieldValue) {
        self.data.set(key, value);
    }

    /// Attempts to move to the next step.
    ///
    /// Requires the current step to validate; otherwise this is a no-op
    /// returning [`Advance::Blocked`]. On the last step a successful
    /// advance completes the wizard instead of moving.
    pub fn advance(&mut self) -> Advance {
        if self.completed {
            return Advance::Completed;
        }

        if !self.is_step_valid(self.current_index) {
            return Advance::Blocked;
        }

        if self.current_index + 1 < self.steps.len() {
            self.current_index += 1;
            Advance::Moved
        } else {
            self.completed = true;
            Advance::Completed
        }
    }

    /// Moves to the previous step, or abandons from the first.
    ///
    /// Never fails and never decrements below 0.
    pub fn retreat(&mut self) -> Retreat {
        if self.current_index > 0 {
            self.current_index -= 1;
            Retreat::Moved
        } else {
            Retreat::Abandoned
        }
    }

    /// Returns the serializable progress snapshot.
    pub fn to_checkpoint(&self) -> SessionCheckpoint {
        SessionCheckpoint {
            current_index: self.current_index,
            data: self.data.clone(),
        }
    }

    /// Checkpoints the session to the draft store under the key.
    pub async fn checkpoint<S: DraftStore + ?Sized>(
        &self,
        store: &S,
        key: DraftKey,
    ) -> Result<(), DraftStoreError> {
        let draft = Draft::from_state(key, &self.to_checkpoint())?;
        store.save(draft).await
    }

    /// Resumes a session from the draft store, if a draft exists.
    pub async fn resume<S: DraftStore + ?Sized>(
        store: &S,
        key: &DraftKey,
        steps: Vec<StepDefinition>,
    ) -> Result<Option<Self>, DraftStoreError> {
        let Some(draft) = store.load(key).await? else {
            return Ok(None);
        };
        let checkpoint: SessionCheckpoint = draft.restore()?;
        Ok(Some(Self::from_checkpoint(steps, checkpoint)))
    }
}
