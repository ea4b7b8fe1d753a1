//! Canonical step lists for the signup and checkout wizards.

use crate::actor::Role;

use super::fields::FieldMap;
use super::step::StepDefinition;
use super::validators;

/// Step names for the signup flow.
pub mod signup {
    pub const ROLE: &str = "role";
    pub const BASIC_INFO: &str = "basic-info";
    pub const LOCATION: &str = "location";
    pub const ID_FRONT: &str = "documents/id-front";
    pub const ID_BACK: &str = "documents/id-back";
    pub const SELFIE: &str = "documents/selfie";
}

/// Step names for the checkout flow.
pub mod checkout {
    pub const ORDER_INFO: &str = "order-info";
    pub const DELIVERY_ADDRESS: &str = "delivery-address";
    pub const PAYMENT: &str = "payment";
    pub const CONFIRMATION: &str = "confirmation";
}

/// Builds the signup step list for a chosen role.
///
/// Farmers append the three identity document sub-steps; buyers finish
/// after the location step. `None` (role not chosen yet) yields the base
/// steps, which is all a session can reach before the role validator
/// passes anyway.
pub fn signup_steps(role: Option<Role>) -> Vec<StepDefinition> {
    let mut steps = vec![
        StepDefinition::new(signup::ROLE, validators::signup_role),
        StepDefinition::new(signup::BASIC_INFO, validators::signup_basic_info),
        StepDefinition::new(signup::LOCATION, validators::signup_location),
    ];

    if role == Some(Role::Farmer) {
        steps.push(StepDefinition::new(
            signup::ID_FRONT,
            validators::document_id_front,
        ));
        steps.push(StepDefinition::new(
            signup::ID_BACK,
            validators::document_id_back,
        ));
        steps.push(StepDefinition::new(
            signup::SELFIE,
            validators::document_selfie,
        ));
    }

    steps
}

/// Builds the signup step list matching the role recorded in the data.
///
/// Used when resuming from a draft: the step list must match what the
/// checkpointed session was navigating.
pub fn signup_steps_for(data: &FieldMap) -> Vec<StepDefinition> {
    signup_steps(data.text(validators::keys::ROLE).and_then(Role::parse))
}

/// Builds the 4-step checkout flow.
pub fn checkout_steps() -> Vec<StepDefinition> {
    vec![
        StepDefinition::new(checkout::ORDER_INFO, validators::checkout_order_info),
        StepDefinition::new(
            checkout::DELIVERY_ADDRESS,
            validators::checkout_delivery_address,
        ),
        StepDefinition::new(checkout::PAYMENT, validators::checkout_payment),
        StepDefinition::new(checkout::CONFIRMATION, validators::checkout_confirmation),
    ]
}
