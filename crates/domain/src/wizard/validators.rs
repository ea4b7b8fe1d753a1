//! Per-step validators for the canonical wizard flows.
//!
//! Validators are deliberately superficial: non-empty checks and equality
//! only, no format validation. A failing validator never raises; it only
//! disables forward navigation.

use crate::actor::Role;

use super::fields::FieldMap;

/// Well-known wizard field keys.
pub mod keys {
    pub const ROLE: &str = "role";

    pub const FULL_NAME: &str = "full_name";
    pub const PHONE: &str = "phone";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";

    pub const GOVERNORATE: &str = "governorate";
    pub const ADDRESS: &str = "address";

    pub const ID_FRONT: &str = "id_front";
    pub const ID_BACK: &str = "id_back";
    pub const SELFIE: &str = "selfie";

    pub const PHONE_NUMBER: &str = "phone_number";
    pub const CITY: &str = "city";

    pub const PAYMENT_METHOD: &str = "payment_method";
    pub const CARD_NUMBER: &str = "card_number";
    pub const EXPIRY_DATE: &str = "expiry_date";
    pub const CVV: &str = "cvv";
    pub const CARDHOLDER_NAME: &str = "cardholder_name";
}

/// Payment method values accepted by the checkout payment step.
pub mod payment_methods {
    pub const CASH_ON_DELIVERY: &str = "cash_on_delivery";
    pub const CREDIT_CARD: &str = "credit_card";
}

/// Signup "role": valid iff the chosen role is farmer or buyer.
pub fn signup_role(data: &FieldMap) -> bool {
    data.text(keys::ROLE)
        .and_then(Role::parse)
        .is_some_and(|role| role.is_registrable())
}

/// Signup "basic info": all identity fields non-empty and passwords match.
pub fn signup_basic_info(data: &FieldMap) -> bool {
    data.has_text(keys::FULL_NAME)
        && data.has_text(keys::PHONE)
        && data.has_text(keys::EMAIL)
        && data.has_text(keys::PASSWORD)
        && data.text(keys::PASSWORD) == data.text(keys::CONFIRM_PASSWORD)
}

/// Signup "location": governorate and address non-empty.
pub fn signup_location(data: &FieldMap) -> bool {
    data.has_text(keys::GOVERNORATE) && data.has_text(keys::ADDRESS)
}

/// Signup document sub-step: ID card front uploaded.
pub fn document_id_front(data: &FieldMap) -> bool {
    data.has_file(keys::ID_FRONT)
}

/// Signup document sub-step: ID card back uploaded.
pub fn document_id_back(data: &FieldMap) -> bool {
    data.has_file(keys::ID_BACK)
}

/// Signup document sub-step: selfie uploaded.
pub fn document_selfie(data: &FieldMap) -> bool {
    data.has_file(keys::SELFIE)
}

/// All three document slots filled.
pub fn documents_complete(data: &FieldMap) -> bool {
    document_id_front(data) && document_id_back(data) && document_selfie(data)
}

/// Checkout "order info": read-only review step, always valid.
pub fn checkout_order_info(_data: &FieldMap) -> bool {
    true
}

/// Checkout "delivery address": recipient fields non-empty.
pub fn checkout_delivery_address(data: &FieldMap) -> bool {
    data.has_text(keys::FULL_NAME)
        && data.has_text(keys::PHONE_NUMBER)
        && data.has_text(keys::ADDRESS)
        && data.has_text(keys::CITY)
}

/// Checkout "payment": cash on delivery is always valid; credit card
/// requires the card fields non-empty. No Luhn or format checks.
pub fn checkout_payment(data: &FieldMap) -> bool {
    match data.text(keys::PAYMENT_METHOD) {
        Some(payment_methods::CASH_ON_DELIVERY) => true,
        Some(payment_methods::CREDIT_CARD) => {
            data.has_text(keys::CARD_NUMBER)
                && data.has_text(keys::EXPIRY_DATE)
                && data.has_text(keys::CVV)
                && data.has_text(keys::CARDHOLDER_NAME)
        }
        _ => false,
    }
}

/// Checkout "confirmation": read-only review step, always valid.
pub fn checkout_confirmation(_data: &FieldMap) -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::fields::FieldValue;

    fn map(entries: &[(&str, &str)]) -> FieldMap {
        let mut data = FieldMap::new();
        for (key, value) in entries {
            data.set(*key, FieldValue::text(*value));
        }
        data
    }

    #[test]
    fn role_accepts_farmer_and_buyer_only() {
        assert!(signup_role(&map(&[(keys::ROLE, "farmer")])));
        assert!(signup_role(&map(&[(keys::ROLE, "buyer")])));
        assert!(!signup_role(&map(&[(keys::ROLE, "admin")])));
        assert!(!signup_role(&map(&[(keys::ROLE, "merchant")])));
        assert!(!signup_role(&FieldMap::new()));
    }

    #[test]
    fn basic_info_requires_all_fields_and_matching_passwords() {
        let complete = map(&[
            (keys::FULL_NAME, "Amina Hassan"),
            (keys::PHONE, "01001234567"),
            (keys::EMAIL, "amina@example.com"),
            (keys::PASSWORD, "secret"),
            (keys::CONFIRM_PASSWORD, "secret"),
        ]);
        assert!(signup_basic_info(&complete));

        let mut mismatched = complete.clone();
        mismatched.set(keys::CONFIRM_PASSWORD, FieldValue::text("other"));
        assert!(!signup_basic_info(&mismatched));

        let mut empty_phone = complete.clone();
        empty_phone.set(keys::PHONE, FieldValue::text(""));
        assert!(!signup_basic_info(&empty_phone));
    }

    #[test]
    fn basic_info_missing_confirmation_is_invalid() {
        let data = map(&[
            (keys::FULL_NAME, "Amina Hassan"),
            (keys::PHONE, "01001234567"),
            (keys::EMAIL, "amina@example.com"),
            (keys::PASSWORD, "secret"),
        ]);
        assert!(!signup_basic_info(&data));
    }

    #[test]
    fn location_requires_governorate_and_address() {
        assert!(signup_location(&map(&[
            (keys::GOVERNORATE, "Minya"),
            (keys::ADDRESS, "12 Canal St"),
        ])));
        assert!(!signup_location(&map(&[(keys::GOVERNORATE, "Minya")])));
        assert!(!signup_location(&map(&[(keys::ADDRESS, "12 Canal St")])));
    }

    #[test]
    fn document_steps_require_their_slot() {
        let mut data = FieldMap::new();
        assert!(!document_id_front(&data));
        assert!(!documents_complete(&data));

        data.set(keys::ID_FRONT, FieldValue::file("uploads/front.jpg"));
        data.set(keys::ID_BACK, FieldValue::file("uploads/back.jpg"));
        assert!(document_id_front(&data));
        assert!(document_id_back(&data));
        assert!(!documents_complete(&data));

        data.set(keys::SELFIE, FieldValue::file("uploads/selfie.jpg"));
        assert!(documents_complete(&data));
    }

    #[test]
    fn text_in_a_file_slot_does_not_count() {
        let data = map(&[(keys::SELFIE, "uploads/selfie.jpg")]);
        assert!(!document_selfie(&data));
    }

    #[test]
    fn delivery_address_requires_all_fields() {
        let complete = map(&[
            (keys::FULL_NAME, "Omar Said"),
            (keys::PHONE_NUMBER, "01009876543"),
            (keys::ADDRESS, "5 Nile Rd"),
            (keys::CITY, "Giza"),
        ]);
        assert!(checkout_delivery_address(&complete));

        let mut no_city = complete.clone();
        no_city.set(keys::CITY, FieldValue::text(" "));
        assert!(!checkout_delivery_address(&no_city));
    }

    #[test]
    fn cash_on_delivery_is_always_valid() {
        let data = map(&[(keys::PAYMENT_METHOD, payment_methods::CASH_ON_DELIVERY)]);
        assert!(checkout_payment(&data));
    }

    #[test]
    fn credit_card_requires_card_fields() {
        let mut data = map(&[
            (keys::PAYMENT_METHOD, payment_methods::CREDIT_CARD),
            (keys::EXPIRY_DATE, "12/27"),
            (keys::CVV, "123"),
            (keys::CARDHOLDER_NAME, "OMAR SAID"),
        ]);
        // Empty card number blocks the step
        assert!(!checkout_payment(&data));

        data.set(keys::CARD_NUMBER, FieldValue::text("4111111111111111"));
        assert!(checkout_payment(&data));
    }

    #[test]
    fn credit_card_skips_format_validation() {
        // Deliberately superficial: any non-empty text passes
        let data = map(&[
            (keys::PAYMENT_METHOD, payment_methods::CREDIT_CARD),
            (keys::CARD_NUMBER, "not-a-card"),
            (keys::EXPIRY_DATE, "whenever"),
            (keys::CVV, "x"),
            (keys::CARDHOLDER_NAME, "y"),
        ]);
        assert!(checkout_payment(&data));
    }

    #[test]
    fn unknown_payment_method_is_invalid() {
        assert!(!checkout_payment(&map(&[(keys::PAYMENT_METHOD, "barter")])));
        assert!(!checkout_payment(&FieldMap::new()));
    }

    #[test]
    fn review_steps_are_always_valid() {
        assert!(checkout_order_info(&FieldMap::new()));
        assert!(checkout_confirmation(&FieldMap::new()));
    }
}
