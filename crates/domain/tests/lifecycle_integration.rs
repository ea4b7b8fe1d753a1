//! Integration tests for the order-like entity lifecycles.

use common::{EntityId, UserId};
use domain::{
    Actor, Entity, EscrowState, Listing, ListingState, Money, Order, OrderError, OrderState,
    PhotoRef, VerificationRequest, VerificationState, Wallet, Withdrawal, WithdrawalState,
    verification::IdentityDocuments,
};

fn photos() -> Vec<PhotoRef> {
    vec![PhotoRef::new("uploads/proof.jpg")]
}

#[test]
fn listing_moderation_then_purchase_then_fulfillment() {
    let farmer = Actor::farmer(UserId::new());
    let buyer = Actor::buyer(UserId::new());
    let admin = Actor::admin(UserId::new());

    // Farmer submits a listing, admin accepts it
    let mut listing = Listing::default();
    let listing_id = EntityId::new();
    listing.apply_events(
        listing
            .submit(listing_id, farmer, "Tomatoes", 500, Money::from_piasters(900))
            .unwrap(),
    );
    listing.apply_events(listing.accept(admin).unwrap());
    assert_eq!(listing.state(), ListingState::Listed);

    // Buyer places an order against it
    let mut order = Order::default();
    order.apply_events(
        order
            .place(
                EntityId::new(),
                listing_id,
                buyer,
                farmer.user_id,
                listing.crop_name(),
                100,
                listing.price_per_kg().multiply(100),
            )
            .unwrap(),
    );
    assert_eq!(order.state(), OrderState::Pending);
    assert_eq!(order.escrow(), EscrowState::OnHold);

    // Farmer ships, buyer confirms, admin releases escrow
    order.apply_events(order.ship(farmer, photos()).unwrap());
    order.apply_events(order.deliver(buyer, photos()).unwrap());
    order.apply_events(order.release_payment(admin).unwrap());

    assert_eq!(order.state(), OrderState::Delivered);
    assert_eq!(order.escrow(), EscrowState::Released);

    // Farmer closes the listing
    listing.apply_events(listing.close(farmer).unwrap());
    assert_eq!(listing.state(), ListingState::Closed);
}

#[test]
fn photo_gating_holds_on_both_fulfillment_transitions() {
    let farmer = Actor::farmer(UserId::new());
    let buyer = Actor::buyer(UserId::new());

    let mut order = Order::default();
    order.apply_events(
        order
            .place(
                EntityId::new(),
                EntityId::new(),
                buyer,
                farmer.user_id,
                "Mangoes",
                20,
                Money::from_pounds(800),
            )
            .unwrap(),
    );

    // Zero photos: rejected, state unchanged
    assert!(matches!(
        order.ship(farmer, vec![]),
        Err(OrderError::PhotosRequired { .. })
    ));
    assert_eq!(order.state(), OrderState::Pending);

    // One photo: accepted
    order.apply_events(order.ship(farmer, photos()).unwrap());
    assert_eq!(order.state(), OrderState::Shipped);

    assert!(matches!(
        order.deliver(buyer, vec![]),
        Err(OrderError::PhotosRequired { .. })
    ));
    assert_eq!(order.state(), OrderState::Shipped);

    order.apply_events(order.deliver(buyer, photos()).unwrap());
    assert_eq!(order.state(), OrderState::Delivered);
}

#[test]
fn released_escrow_funds_wallet_and_withdrawal() {
    let farmer = Actor::farmer(UserId::new());
    let admin = Actor::admin(UserId::new());

    // Proceeds land in the wallet once escrow is released
    let mut wallet = Wallet::new();
    wallet.credit(Money::from_pounds(900));

    let mut withdrawal = Withdrawal::default();
    withdrawal.apply_events(
        withdrawal
            .request(EntityId::new(), farmer, Money::from_pounds(400), &wallet)
            .unwrap(),
    );
    assert_eq!(withdrawal.state(), WithdrawalState::Pending);

    withdrawal.apply_events(withdrawal.approve(admin).unwrap());
    wallet.debit(withdrawal.amount()).unwrap();

    assert_eq!(withdrawal.state(), WithdrawalState::Approved);
    assert_eq!(wallet.balance(), Money::from_pounds(500));
}

#[test]
fn verification_follows_farmer_signup() {
    let admin = Actor::admin(UserId::new());
    let user_id = UserId::new();

    let mut request = VerificationRequest::default();
    request.apply_events(
        request
            .submit(
                EntityId::new(),
                user_id,
                domain::Role::Farmer,
                IdentityDocuments::new(
                    PhotoRef::new("uploads/front.jpg"),
                    PhotoRef::new("uploads/back.jpg"),
                    PhotoRef::new("uploads/selfie.jpg"),
                ),
            )
            .unwrap(),
    );
    assert_eq!(request.state(), VerificationState::Pending);

    request.apply_events(request.approve(admin).unwrap());
    assert_eq!(request.state(), VerificationState::Approved);
    assert!(request.state().is_terminal());
}
