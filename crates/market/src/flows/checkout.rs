//! Checkout wizard flow.
//!
//! Checkout keeps all four steps in one in-memory session; nothing is
//! checkpointed. The product payload travels with the flow, and the
//! confirmation payload is passed forward to the success screen.

use common::{EntityId, UserId};
use domain::{
    Actor, Advance, Entity, FieldValue, Listing, Money, Retreat, WizardSession,
    flows as wizard_flows, validators::keys,
};

use crate::error::MarketError;
use crate::gateway::PaymentGateway;
use crate::notify::{Lang, MessageKey, NotificationCenter, Toast};
use crate::registry::Market;

/// The product being purchased, carried in memory through the flow.
#[derive(Debug, Clone)]
pub struct ProductPayload {
    /// The listing being purchased from.
    pub listing_id: EntityId,

    /// The farmer fulfilling the order.
    pub farmer_id: UserId,

    /// Crop name shown on the order-info step.
    pub crop_name: String,

    /// Quantity being purchased, in kilograms.
    pub quantity_kg: u32,

    /// Price per kilogram at purchase time.
    pub price_per_kg: Money,
}

impl ProductPayload {
    /// Builds the payload from an open listing.
    pub fn from_listing(listing: &Listing, quantity_kg: u32) -> Result<Self, MarketError> {
        let listing_id = listing.id().ok_or(MarketError::ListingNotPurchasable {
            listing_id: EntityId::default(),
        })?;

        if !listing.state().is_purchasable() {
            return Err(MarketError::ListingNotPurchasable { listing_id });
        }

        let farmer_id = listing
            .farmer_id()
            .ok_or(MarketError::ListingNotPurchasable { listing_id })?;

        Ok(Self {
            listing_id,
            farmer_id,
            crop_name: listing.crop_name().to_string(),
            quantity_kg,
            price_per_kg: listing.price_per_kg(),
        })
    }

    /// The order total.
    pub fn total(&self) -> Money {
        self.price_per_kg.multiply(self.quantity_kg)
    }
}

/// Confirmation payload handed to the success screen.
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    /// The placed order.
    pub order_id: EntityId,

    /// Total moved to escrow.
    pub total: Money,

    /// Chosen payment method.
    pub payment_method: String,

    /// Charge reference from the gateway.
    pub payment_reference: String,
}

/// Drives the 4-step checkout wizard for a buyer.
pub struct CheckoutFlow {
    session: WizardSession,
    product: ProductPayload,
    buyer: Actor,
    lang: Lang,
    notifications: NotificationCenter,
}

impl CheckoutFlow {
    /// Starts a checkout for a buyer and product.
    pub fn start(
        product: ProductPayload,
        buyer_id: UserId,
        lang: Lang,
        notifications: NotificationCenter,
    ) -> Self {
        Self {
            session: WizardSession::new(wizard_flows::checkout_steps()),
            product,
            buyer: Actor::buyer(buyer_id),
            lang,
            notifications,
        }
    }

    /// Returns the underlying wizard session.
    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    /// Returns the product being purchased.
    pub fn product(&self) -> &ProductPayload {
        &self.product
    }

    /// Merges a field value into the wizard data.
    pub fn update_field(&mut self, field: impl Into<String>, value: FieldValue) {
        self.session.update_field(field, value);
    }

    /// Attempts to advance. Nothing is checkpointed; checkout lives and
    /// dies with this session.
    pub fn advance(&mut self) -> Advance {
        self.session.advance()
    }

    /// Moves back one step, or abandons from the first.
    pub fn retreat(&mut self) -> Retreat {
        self.session.retreat()
    }

    /// Runs the terminal action of a completed wizard: charge the buyer
    /// and place the order with its payment on escrow.
    #[tracing::instrument(skip(self, market, gateway), fields(buyer = %self.buyer.user_id))]
    pub async fn finish<G: PaymentGateway>(
        &self,
        market: &Market,
        gateway: &G,
    ) -> Result<OrderConfirmation, MarketError> {
        if !self.session.is_complete() {
            return Err(MarketError::WizardIncomplete { flow: "checkout" });
        }

        let payment_method = self
            .session
            .data()
            .text(keys::PAYMENT_METHOD)
            .ok_or(MarketError::MissingField {
                key: keys::PAYMENT_METHOD,
            })?
            .to_string();

        let total = self.product.total();
        let receipt = gateway.charge(self.buyer.user_id, total).await?;

        let order_id = EntityId::new();
        let buyer = self.buyer;
        let product = self.product.clone();
        market
            .create_order(|o| {
                o.place(
                    order_id,
                    product.listing_id,
                    buyer,
                    product.farmer_id,
                    product.crop_name,
                    product.quantity_kg,
                    total,
                )
            })
            .await?;

        metrics::counter!("checkout_completions_total").increment(1);
        self.notifications
            .push(Toast::success(MessageKey::OrderPlaced, self.lang))
            .await;

        Ok(OrderConfirmation {
            order_id,
            total,
            payment_method,
            payment_reference: receipt.reference,
        })
    }
}
