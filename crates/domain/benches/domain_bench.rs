use common::{EntityId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{
    Actor, Entity, FieldValue, Money, Order, PhotoRef, Role, WizardSession, flows,
    validators::keys,
};

fn bench_signup_wizard(c: &mut Criterion) {
    c.bench_function("domain/signup_wizard_complete", |b| {
        b.iter(|| {
            let mut session = WizardSession::new(flows::signup_steps(Some(Role::Farmer)));
            session.update_field(keys::ROLE, FieldValue::text("farmer"));
            session.advance();
            session.update_field(keys::FULL_NAME, FieldValue::text("Amina Hassan"));
            session.update_field(keys::PHONE, FieldValue::text("01001234567"));
            session.update_field(keys::EMAIL, FieldValue::text("amina@example.com"));
            session.update_field(keys::PASSWORD, FieldValue::text("secret"));
            session.update_field(keys::CONFIRM_PASSWORD, FieldValue::text("secret"));
            session.advance();
            session.update_field(keys::GOVERNORATE, FieldValue::text("Minya"));
            session.update_field(keys::ADDRESS, FieldValue::text("12 Canal St"));
            session.advance();
            session.update_field(keys::ID_FRONT, FieldValue::file("uploads/front.jpg"));
            session.advance();
            session.update_field(keys::ID_BACK, FieldValue::file("uploads/back.jpg"));
            session.advance();
            session.update_field(keys::SELFIE, FieldValue::file("uploads/selfie.jpg"));
            session.advance();
            assert!(session.is_complete());
        });
    });
}

fn bench_step_validation(c: &mut Criterion) {
    let mut session = WizardSession::new(flows::checkout_steps());
    session.update_field(keys::FULL_NAME, FieldValue::text("Omar Said"));
    session.update_field(keys::PHONE_NUMBER, FieldValue::text("01009876543"));
    session.update_field(keys::ADDRESS, FieldValue::text("5 Nile Rd"));
    session.update_field(keys::CITY, FieldValue::text("Giza"));

    c.bench_function("domain/checkout_address_validation", |b| {
        b.iter(|| session.is_step_valid(1));
    });
}

fn bench_order_lifecycle(c: &mut Criterion) {
    let farmer = Actor::farmer(UserId::new());
    let buyer = Actor::buyer(UserId::new());
    let admin = Actor::admin(UserId::new());

    c.bench_function("domain/order_full_lifecycle", |b| {
        b.iter(|| {
            let mut order = Order::default();
            order.apply_events(
                order
                    .place(
                        EntityId::new(),
                        EntityId::new(),
                        buyer,
                        farmer.user_id,
                        "Tomatoes",
                        50,
                        Money::from_pounds(500),
                    )
                    .unwrap(),
            );
            order.apply_events(
                order
                    .ship(farmer, vec![PhotoRef::new("uploads/box.jpg")])
                    .unwrap(),
            );
            order.apply_events(
                order
                    .deliver(buyer, vec![PhotoRef::new("uploads/door.jpg")])
                    .unwrap(),
            );
            order.apply_events(order.release_payment(admin).unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_signup_wizard,
    bench_step_validation,
    bench_order_lifecycle
);
criterion_main!(benches);
