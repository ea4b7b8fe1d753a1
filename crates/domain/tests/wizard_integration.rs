//! Integration tests for the wizard flows.
//!
//! These tests drive the signup and checkout wizards end to end,
//! including draft checkpointing across a simulated reload.

use domain::{
    Advance, FieldValue, Retreat, Role, WizardSession,
    flows::{self, checkout, signup},
    validators::{keys, payment_methods},
};
use draft_store::{DraftKey, DraftStore, InMemoryDraftStore};

fn fill_basic_info(session: &mut WizardSession) {
    session.update_field(keys::FULL_NAME, FieldValue::text("Amina Hassan"));
    session.update_field(keys::PHONE, FieldValue::text("01001234567"));
    session.update_field(keys::EMAIL, FieldValue::text("amina@example.com"));
    session.update_field(keys::PASSWORD, FieldValue::text("secret"));
    session.update_field(keys::CONFIRM_PASSWORD, FieldValue::text("secret"));
}

fn fill_location(session: &mut WizardSession) {
    session.update_field(keys::GOVERNORATE, FieldValue::text("Minya"));
    session.update_field(keys::ADDRESS, FieldValue::text("12 Canal St"));
}

mod signup_flow {
    use super::*;

    #[tokio::test]
    async fn farmer_signup_reaches_terminal_state_and_clears_draft() {
        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/session-1");

        let mut session = WizardSession::new(flows::signup_steps(Some(Role::Farmer)));

        // Step: role
        session.update_field(keys::ROLE, FieldValue::text("farmer"));
        assert_eq!(session.advance(), Advance::Moved);
        session.checkpoint(&store, key.clone()).await.unwrap();

        // Step: basic info, matching passwords
        fill_basic_info(&mut session);
        assert_eq!(session.advance(), Advance::Moved);
        session.checkpoint(&store, key.clone()).await.unwrap();

        // Step: location
        fill_location(&mut session);
        assert_eq!(session.advance(), Advance::Moved);

        // Document sub-steps
        session.update_field(keys::ID_FRONT, FieldValue::file("uploads/front.jpg"));
        assert_eq!(session.advance(), Advance::Moved);
        session.update_field(keys::ID_BACK, FieldValue::file("uploads/back.jpg"));
        assert_eq!(session.advance(), Advance::Moved);
        session.update_field(keys::SELFIE, FieldValue::file("uploads/selfie.jpg"));
        assert_eq!(session.advance(), Advance::Completed);
        assert!(session.is_complete());

        // Draft is cleared on completion
        store.clear(&key).await.unwrap();
        assert!(store.load(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn signup_survives_reload_between_pages() {
        let store = InMemoryDraftStore::new();
        let key = DraftKey::new("signup/session-2");

        // First page load: choose role, advance, checkpoint
        let mut session = WizardSession::new(flows::signup_steps(None));
        session.update_field(keys::ROLE, FieldValue::text("farmer"));
        assert_eq!(session.advance(), Advance::Moved);
        session.checkpoint(&store, key.clone()).await.unwrap();
        drop(session);

        // Reload: rebuild the step list from the recorded role
        let draft = store.load(&key).await.unwrap().expect("draft saved");
        let checkpoint: domain::SessionCheckpoint = draft.restore().unwrap();
        let steps = flows::signup_steps_for(&checkpoint.data);
        assert_eq!(steps.len(), 6, "farmer flow includes document steps");

        let resumed = WizardSession::resume(&store, &key, steps)
            .await
            .unwrap()
            .expect("draft should rehydrate");

        assert_eq!(resumed.current_index(), 1);
        assert_eq!(resumed.current_step().name, signup::BASIC_INFO);
        assert_eq!(resumed.data().text(keys::ROLE), Some("farmer"));
    }

    #[test]
    fn mismatched_passwords_block_basic_info() {
        let mut session = WizardSession::new(flows::signup_steps(Some(Role::Buyer)));
        session.update_field(keys::ROLE, FieldValue::text("buyer"));
        session.advance();

        fill_basic_info(&mut session);
        session.update_field(keys::CONFIRM_PASSWORD, FieldValue::text("different"));

        assert_eq!(session.advance(), Advance::Blocked);
        assert_eq!(session.current_step().name, signup::BASIC_INFO);
    }

    #[test]
    fn buyer_signup_completes_after_location() {
        let mut session = WizardSession::new(flows::signup_steps(Some(Role::Buyer)));
        session.update_field(keys::ROLE, FieldValue::text("buyer"));
        session.advance();
        fill_basic_info(&mut session);
        session.advance();
        fill_location(&mut session);

        assert_eq!(session.advance(), Advance::Completed);
    }

    #[test]
    fn retreat_from_role_step_abandons() {
        let mut session = WizardSession::new(flows::signup_steps(None));
        assert_eq!(session.retreat(), Retreat::Abandoned);
        assert_eq!(session.current_index(), 0);
    }
}

mod checkout_flow {
    use super::*;

    fn fill_delivery_address(session: &mut WizardSession) {
        session.update_field(keys::FULL_NAME, FieldValue::text("Omar Said"));
        session.update_field(keys::PHONE_NUMBER, FieldValue::text("01009876543"));
        session.update_field(keys::ADDRESS, FieldValue::text("5 Nile Rd"));
        session.update_field(keys::CITY, FieldValue::text("Giza"));
    }

    #[test]
    fn credit_card_with_empty_card_number_blocks_payment_step() {
        let mut session = WizardSession::new(flows::checkout_steps());

        // Order info is a review step
        assert_eq!(session.advance(), Advance::Moved);

        fill_delivery_address(&mut session);
        assert_eq!(session.advance(), Advance::Moved);
        assert_eq!(session.current_step().name, checkout::PAYMENT);

        session.update_field(
            keys::PAYMENT_METHOD,
            FieldValue::text(payment_methods::CREDIT_CARD),
        );
        session.update_field(keys::EXPIRY_DATE, FieldValue::text("12/27"));
        session.update_field(keys::CVV, FieldValue::text("123"));
        session.update_field(keys::CARDHOLDER_NAME, FieldValue::text("OMAR SAID"));
        // card_number never filled

        assert!(!session.is_step_valid(session.current_index()));
        assert_eq!(session.advance(), Advance::Blocked);
        assert_eq!(session.current_step().name, checkout::PAYMENT);
    }

    #[test]
    fn cash_on_delivery_checkout_completes() {
        let mut session = WizardSession::new(flows::checkout_steps());

        assert_eq!(session.advance(), Advance::Moved);
        fill_delivery_address(&mut session);
        assert_eq!(session.advance(), Advance::Moved);

        session.update_field(
            keys::PAYMENT_METHOD,
            FieldValue::text(payment_methods::CASH_ON_DELIVERY),
        );
        assert_eq!(session.advance(), Advance::Moved);

        // Confirmation review step
        assert_eq!(session.advance(), Advance::Completed);
        assert!(session.is_complete());
    }

    #[test]
    fn data_persists_across_back_navigation() {
        let mut session = WizardSession::new(flows::checkout_steps());
        session.advance();
        fill_delivery_address(&mut session);
        session.advance();

        session.retreat();
        session.retreat();
        assert_eq!(session.current_index(), 0);

        // Nothing was reset; forward navigation revalidates the same data
        assert_eq!(session.advance(), Advance::Moved);
        assert_eq!(session.advance(), Advance::Moved);
        assert_eq!(session.current_step().name, checkout::PAYMENT);
    }
}
