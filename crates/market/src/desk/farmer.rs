//! Farmer dashboard actions.

use common::{EntityId, UserId};
use domain::{Actor, Listing, Money, Order, PhotoRef, Wallet, Withdrawal};

use crate::error::MarketError;
use crate::notify::{Lang, MessageKey, NotificationCenter, Toast};
use crate::registry::Market;

use super::error_toast_key;

/// Actions and views available to a farmer.
#[derive(Clone)]
pub struct FarmerDesk {
    market: Market,
    notifications: NotificationCenter,
    actor: Actor,
    lang: Lang,
}

impl FarmerDesk {
    /// Creates a desk for a farmer session.
    pub fn new(
        market: Market,
        notifications: NotificationCenter,
        user_id: UserId,
        lang: Lang,
    ) -> Self {
        Self {
            market,
            notifications,
            actor: Actor::farmer(user_id),
            lang,
        }
    }

    /// Submits a new crop listing for moderation.
    #[tracing::instrument(skip(self, crop_name), fields(farmer = %self.actor.user_id))]
    pub async fn submit_listing(
        &self,
        crop_name: impl Into<String>,
        quantity_kg: u32,
        price_per_kg: Money,
    ) -> Result<Listing, MarketError> {
        let actor = self.actor;
        let listing_id = EntityId::new();
        let crop_name = crop_name.into();

        let result = self
            .market
            .create_listing(|l| l.submit(listing_id, actor, crop_name, quantity_kg, price_per_kg))
            .await;
        self.toast(&result, MessageKey::ListingSubmitted).await;
        result
    }

    /// Closes one of the farmer's listed offerings, irreversibly.
    #[tracing::instrument(skip(self))]
    pub async fn close_listing(&self, listing_id: EntityId) -> Result<Listing, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_listing(listing_id, |l| l.close(actor))
            .await;
        self.toast(&result, MessageKey::ListingClosed).await;
        result
    }

    /// Ships an order with photo proof attached.
    #[tracing::instrument(skip(self, photos))]
    pub async fn ship_order(
        &self,
        order_id: EntityId,
        photos: Vec<PhotoRef>,
    ) -> Result<Order, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_order(order_id, |o| o.ship(actor, photos))
            .await;
        self.toast(&result, MessageKey::OrderShipped).await;
        result
    }

    /// Requests a withdrawal of released proceeds.
    #[tracing::instrument(skip(self))]
    pub async fn request_withdrawal(&self, amount: Money) -> Result<Withdrawal, MarketError> {
        let actor = self.actor;
        let withdrawal_id = EntityId::new();
        let wallet = self.market.wallet_of(actor.user_id).await;

        let result = self
            .market
            .create_withdrawal(|w| w.request(withdrawal_id, actor, amount, &wallet))
            .await;
        self.toast(&result, MessageKey::WithdrawalRequested).await;
        result
    }

    /// The farmer's listings.
    pub async fn my_listings(&self) -> Vec<Listing> {
        self.market.listings_for_farmer(self.actor.user_id).await
    }

    /// Orders placed against the farmer's listings.
    pub async fn incoming_orders(&self) -> Vec<Order> {
        self.market.orders_for_farmer(self.actor.user_id).await
    }

    /// The farmer's wallet.
    pub async fn wallet(&self) -> Wallet {
        self.market.wallet_of(self.actor.user_id).await
    }

    async fn toast<T>(&self, result: &Result<T, MarketError>, success: MessageKey) {
        let toast = match result {
            Ok(_) => Toast::success(success, self.lang),
            Err(e) => Toast::error(error_toast_key(e), self.lang),
        };
        self.notifications.push(toast).await;
    }
}
