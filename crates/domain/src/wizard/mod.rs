//! The generic linear wizard controller and its canonical flows.
//!
//! One abstraction drives signup and checkout: an ordered list of
//! [`StepDefinition`]s, a [`FieldMap`] accumulated across steps, and a
//! [`WizardSession`] exposing advance/retreat/update_field. Validation
//! failures never raise errors; they gate forward navigation only.

mod fields;
mod session;
mod step;

pub mod flows;
pub mod validators;

pub use fields::{FieldMap, FieldValue};
pub use session::{Advance, Retreat, SessionCheckpoint, WizardSession};
pub use step::{StepDefinition, StepValidator};
