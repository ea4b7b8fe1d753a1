//! Wizard step definitions.

use super::fields::FieldMap;

/// Pure predicate deciding whether forward navigation is allowed off a step.
///
/// Validators never raise errors and are re-evaluated lazily on every
/// check; nothing is cached.
pub type StepValidator = fn(&FieldMap) -> bool;

/// One step of a linear wizard flow.
#[derive(Debug, Clone, Copy)]
pub struct StepDefinition {
    /// Step name, stable across the flow (used in routes and messages).
    pub name: &'static str,

    /// Predicate gating forward navigation off this step.
    pub validator: StepValidator,
}

impl StepDefinition {
    /// Creates a step definition.
    pub fn new(name: &'static str, validator: StepValidator) -> Self {
        Self { name, validator }
    }

    /// Evaluates the step's validator against the accumulated data.
    pub fn is_valid(&self, data: &FieldMap) -> bool {
        (self.validator)(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::fields::FieldValue;

    fn requires_name(data: &FieldMap) -> bool {
        data.has_text("name")
    }

    #[test]
    fn step_evaluates_its_validator() {
        let step = StepDefinition::new("intro", requires_name);
        let mut data = FieldMap::new();

        assert!(!step.is_valid(&data));
        data.set("name", FieldValue::text("Omar"));
        assert!(step.is_valid(&data));
    }
}
