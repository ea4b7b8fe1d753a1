//! Admin moderation desk.
//!
//! Four pending queues (listings, user verifications, withdrawals, and
//! the escrow view) with accept/reject/release actions. Deciding a queued
//! item moves its entity to a terminal state, which removes it from the
//! queue on the next read.

use common::{EntityId, UserId};
use domain::{Actor, Listing, Order, VerificationRequest, Withdrawal};

use crate::error::MarketError;
use crate::notify::{Lang, MessageKey, NotificationCenter, Toast};
use crate::registry::Market;

use super::error_toast_key;

/// Actions and views available to an admin.
#[derive(Clone)]
pub struct AdminDesk {
    market: Market,
    notifications: NotificationCenter,
    actor: Actor,
    lang: Lang,
}

impl AdminDesk {
    /// Creates a desk for an admin session.
    pub fn new(
        market: Market,
        notifications: NotificationCenter,
        user_id: UserId,
        lang: Lang,
    ) -> Self {
        Self {
            market,
            notifications,
            actor: Actor::admin(user_id),
            lang,
        }
    }

    // -- Listing moderation --

    /// The listing moderation queue.
    pub async fn pending_listings(&self) -> Vec<Listing> {
        self.market.pending_listings().await
    }

    /// Accepts a pending listing, making it visible to buyers.
    #[tracing::instrument(skip(self))]
    pub async fn accept_listing(&self, listing_id: EntityId) -> Result<Listing, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_listing(listing_id, |l| l.accept(actor))
            .await;
        self.toast(&result, MessageKey::ListingAccepted).await;
        result
    }

    /// Rejects a pending listing.
    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_listing(
        &self,
        listing_id: EntityId,
        reason: impl Into<String>,
    ) -> Result<Listing, MarketError> {
        let actor = self.actor;
        let reason = reason.into();
        let result = self
            .market
            .execute_listing(listing_id, |l| l.reject(actor, reason))
            .await;
        self.toast(&result, MessageKey::ListingRejected).await;
        result
    }

    // -- User verification --

    /// The user verification queue.
    pub async fn pending_verifications(&self) -> Vec<VerificationRequest> {
        self.market.pending_verifications().await
    }

    /// Approves a pending user.
    #[tracing::instrument(skip(self))]
    pub async fn approve_verification(
        &self,
        request_id: EntityId,
    ) -> Result<VerificationRequest, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_verification(request_id, |v| v.approve(actor))
            .await;
        self.toast(&result, MessageKey::UserApproved).await;
        result
    }

    /// Rejects a pending user.
    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_verification(
        &self,
        request_id: EntityId,
        reason: impl Into<String>,
    ) -> Result<VerificationRequest, MarketError> {
        let actor = self.actor;
        let reason = reason.into();
        let result = self
            .market
            .execute_verification(request_id, |v| v.reject(actor, reason))
            .await;
        self.toast(&result, MessageKey::UserRejected).await;
        result
    }

    // -- Withdrawals --

    /// The withdrawal queue.
    pub async fn pending_withdrawals(&self) -> Vec<Withdrawal> {
        self.market.pending_withdrawals().await
    }

    /// Approves a withdrawal and debits the farmer's wallet.
    #[tracing::instrument(skip(self))]
    pub async fn approve_withdrawal(
        &self,
        withdrawal_id: EntityId,
    ) -> Result<Withdrawal, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_withdrawal(withdrawal_id, |w| w.approve(actor))
            .await;

        if let Ok(withdrawal) = &result
            && let Some(farmer_id) = withdrawal.farmer_id()
        {
            self.market
                .debit_wallet(farmer_id, withdrawal.amount())
                .await?;
        }

        self.toast(&result, MessageKey::WithdrawalApproved).await;
        result
    }

    /// Rejects a withdrawal; the wallet is untouched.
    #[tracing::instrument(skip(self, reason))]
    pub async fn reject_withdrawal(
        &self,
        withdrawal_id: EntityId,
        reason: impl Into<String>,
    ) -> Result<Withdrawal, MarketError> {
        let actor = self.actor;
        let reason = reason.into();
        let result = self
            .market
            .execute_withdrawal(withdrawal_id, |w| w.reject(actor, reason))
            .await;
        self.toast(&result, MessageKey::WithdrawalRejected).await;
        result
    }

    // -- Escrow --

    /// The escrow view: orders whose payment is still on hold.
    pub async fn on_hold_orders(&self) -> Vec<Order> {
        self.market.on_hold_orders().await
    }

    /// Releases an escrowed payment and credits the farmer's wallet.
    #[tracing::instrument(skip(self))]
    pub async fn release_payment(&self, order_id: EntityId) -> Result<Order, MarketError> {
        let actor = self.actor;
        let result = self
            .market
            .execute_order(order_id, |o| o.release_payment(actor))
            .await;

        if let Ok(order) = &result
            && let Some(farmer_id) = order.farmer_id()
        {
            self.market.credit_wallet(farmer_id, order.total()).await;
        }

        self.toast(&result, MessageKey::PaymentReleased).await;
        result
    }

    async fn toast<T>(&self, result: &Result<T, MarketError>, success: MessageKey) {
        let toast = match result {
            Ok(_) => Toast::success(success, self.lang),
            Err(e) => Toast::error(error_toast_key(e), self.lang),
        };
        self.notifications.push(toast).await;
    }
}
