//! Buyer dashboard actions.

use common::{EntityId, UserId};
use domain::{Actor, Listing, Order, PhotoRef};

use crate::error::MarketError;
use crate::notify::{Lang, MessageKey, NotificationCenter, Toast};
use crate::registry::Market;

use super::error_toast_key;

/// Actions and views available to a buyer.
#[derive(Clone)]
pub struct BuyerDesk {
    market: Market,
    notifications: NotificationCenter,
    actor: Actor,
    lang: Lang,
}

impl BuyerDesk {
    /// Creates a desk for a buyer session.
    pub fn new(
        market: Market,
        notifications: NotificationCenter,
        user_id: UserId,
        lang: Lang,
    ) -> Self {
        Self {
            market,
            notifications,
            actor: Actor::buyer(user_id),
            lang,
        }
    }

    /// Returns the acting buyer.
    pub fn actor(&self) -> Actor {
        self.actor
    }

    /// Listings open for purchase.
    pub async fn browse_listings(&self) -> Vec<Listing> {
        self.market.open_listings().await
    }

    /// Confirms delivery of a shipped order with photo proof.
    #[tracing::instrument(skip(self, photos))]
    pub async fn confirm_delivery(
        &self,
        order_id: EntityId,
        photos: Vec<PhotoRef>,
    ) -> Result<Order, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_order(order_id, |o| o.deliver(actor, photos))
            .await;
        self.toast(&result, MessageKey::OrderDelivered).await;
        result
    }

    /// Cancels a pending order.
    #[tracing::instrument(skip(self, reason))]
    pub async fn cancel_order(
        &self,
        order_id: EntityId,
        reason: impl Into<String>,
    ) -> Result<Order, MarketError> {
        let actor = self.actor;
        let reason = reason.into();
        let result = self
            .market
            .execute_order(order_id, |o| o.cancel(actor, reason))
            .await;
        self.toast(&result, MessageKey::OrderCancelled).await;
        result
    }

    /// Orders the buyer has placed.
    pub async fn my_orders(&self) -> Vec<Order> {
        self.market.orders_for_buyer(self.actor.user_id).await
    }

    async fn toast<T>(&self, result: &Result<T, MarketError>, success: MessageKey) {
        let toast = match result {
            Ok(_) => Toast::success(success, self.lang),
            Err(e) => Toast::error(error_toast_key(e), self.lang),
        };
        self.notifications.push(toast).await;
    }
}
