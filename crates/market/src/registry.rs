//! The in-memory marketplace registry.
//!
//! One logical user context acts at a time, so the registry is a set of
//! entity maps behind async locks. Commands follow the domain discipline:
//! run the entity's command method, record the emitted events, fold them
//! back into the stored entity.

use std::collections::HashMap;
use std::sync::Arc;

use common::{EntityId, UserId};
use domain::{
    DomainEvent, Entity, Listing, ListingEvent, ListingError, ListingState, Money, Order,
    OrderError, OrderEvent, VerificationError, VerificationEvent, VerificationRequest,
    VerificationState, Wallet, Withdrawal, WithdrawalError, WithdrawalEvent, WithdrawalState,
};
use tokio::sync::RwLock;

use crate::error::MarketError;

/// Central registry of marketplace entities and wallets.
#[derive(Clone, Default)]
pub struct Market {
    orders: Arc<RwLock<HashMap<EntityId, Order>>>,
    listings: Arc<RwLock<HashMap<EntityId, Listing>>>,
    withdrawals: Arc<RwLock<HashMap<EntityId, Withdrawal>>>,
    verifications: Arc<RwLock<HashMap<EntityId, VerificationRequest>>>,
    wallets: Arc<RwLock<HashMap<UserId, Wallet>>>,
}

fn record_events<E: DomainEvent>(entity_type: &'static str, events: &[E]) {
    for event in events {
        metrics::counter!(
            "market_transitions_total",
            "entity" => entity_type,
            "event" => event.event_type(),
        )
        .increment(1);
        tracing::info!(entity_type, event = event.event_type(), "transition applied");
    }
}

impl Market {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

// Orders
impl Market {
    /// Creates an order by running a command against a fresh entity.
    ///
    /// # Panics
    ///
    /// Panics if the command succeeds without initializing the entity.
    pub async fn create_order<F>(&self, command_fn: F) -> Result<Order, MarketError>
    where
        F: FnOnce(&Order) -> Result<Vec<OrderEvent>, OrderError>,
    {
        let mut order = Order::default();
        let events = command_fn(&order)?;
        record_events(Order::entity_type(), &events);
        order.apply_events(events);

        let id = order.id().expect("creation command must assign an id");
        self.orders.write().await.insert(id, order.clone());
        Ok(order)
    }

    /// Runs a command against a stored order and folds the events back in.
    pub async fn execute_order<F>(
        &self,
        order_id: EntityId,
        command_fn: F,
    ) -> Result<Order, MarketError>
    where
        F: FnOnce(&Order) -> Result<Vec<OrderEvent>, OrderError>,
    {
        let mut orders = self.orders.write().await;
        let order = orders.get_mut(&order_id).ok_or(MarketError::NotFound {
            entity_type: Order::entity_type(),
            entity_id: order_id,
        })?;

        let events = command_fn(order)?;
        record_events(Order::entity_type(), &events);
        order.apply_events(events);
        Ok(order.clone())
    }

    /// Returns an order by id.
    pub async fn order(&self, order_id: EntityId) -> Option<Order> {
        self.orders.read().await.get(&order_id).cloned()
    }

    /// Orders a farmer has to fulfill.
    pub async fn orders_for_farmer(&self, farmer_id: UserId) -> Vec<Order> {
        self.orders
            .read()
            .await
            .values()
            .filter(|o| o.farmer_id() == Some(farmer_id))
            .cloned()
            .collect()
    }

    /// Orders a buyer has placed.
    pub async fn orders_for_buyer(&self, buyer_id: UserId) -> Vec<Order> {
        self.orders
            .read()
            .await
            .values()
            .filter(|o| o.buyer_id() == Some(buyer_id))
            .cloned()
            .collect()
    }

    /// The admin escrow view: orders whose payment is still on hold.
    pub async fn on_hold_orders(&self) -> Vec<Order> {
        self.orders
            .read()
            .await
            .values()
            .filter(|o| o.escrow().can_release())
            .cloned()
            .collect()
    }
}

// Listings
impl Market {
    /// Creates a listing by running a command against a fresh entity.
    ///
    /// # Panics
    ///
    /// Panics if the command succeeds without initializing the entity.
    pub async fn create_listing<F>(&self, command_fn: F) -> Result<Listing, MarketError>
    where
        F: FnOnce(&Listing) -> Result<Vec<ListingEvent>, ListingError>,
    {
        let mut listing = Listing::default();
        let events = command_fn(&listing)?;
        record_events(Listing::entity_type(), &events);
        listing.apply_events(events);

        let id = listing.id().expect("creation command must assign an id");
        self.listings.write().await.insert(id, listing.clone());
        Ok(listing)
    }

    /// Runs a command against a stored listing.
    pub async fn execute_listing<F>(
        &self,
        listing_id: EntityId,
        command_fn: F,
    ) -> Result<Listing, MarketError>
    where
        F: FnOnce(&Listing) -> Result<Vec<ListingEvent>, ListingError>,
    {
        let mut listings = self.listings.write().await;
        let listing = listings.get_mut(&listing_id).ok_or(MarketError::NotFound {
            entity_type: Listing::entity_type(),
            entity_id: listing_id,
        })?;

        let events = command_fn(listing)?;
        record_events(Listing::entity_type(), &events);
        listing.apply_events(events);
        Ok(listing.clone())
    }

    /// Returns a listing by id.
    pub async fn listing(&self, listing_id: EntityId) -> Option<Listing> {
        self.listings.read().await.get(&listing_id).cloned()
    }

    /// Listings owned by a farmer.
    pub async fn listings_for_farmer(&self, farmer_id: UserId) -> Vec<Listing> {
        self.listings
            .read()
            .await
            .values()
            .filter(|l| l.farmer_id() == Some(farmer_id))
            .cloned()
            .collect()
    }

    /// The admin moderation queue.
    pub async fn pending_listings(&self) -> Vec<Listing> {
        self.listings_in_state(ListingState::PendingReview).await
    }

    /// Listings visible to buyers.
    pub async fn open_listings(&self) -> Vec<Listing> {
        self.listings_in_state(ListingState::Listed).await
    }

    async fn listings_in_state(&self, state: ListingState) -> Vec<Listing> {
        self.listings
            .read()
            .await
            .values()
            .filter(|l| l.state() == state)
            .cloned()
            .collect()
    }
}

// Withdrawals
impl Market {
    /// Creates a withdrawal request by running a command against a fresh entity.
    ///
    /// # Panics
    ///
    /// Panics if the command succeeds without initializing the entity.
    pub async fn create_withdrawal<F>(&self, command_fn: F) -> Result<Withdrawal, MarketError>
    where
        F: FnOnce(&Withdrawal) -> Result<Vec<WithdrawalEvent>, WithdrawalError>,
    {
        let mut withdrawal = Withdrawal::default();
        let events = command_fn(&withdrawal)?;
        record_events(Withdrawal::entity_type(), &events);
        withdrawal.apply_events(events);

        let id = withdrawal.id().expect("creation command must assign an id");
        self.withdrawals.write().await.insert(id, withdrawal.clone());
        Ok(withdrawal)
    }

    /// Runs a command against a stored withdrawal request.
    pub async fn execute_withdrawal<F>(
        &self,
        withdrawal_id: EntityId,
        command_fn: F,
    ) -> Result<Withdrawal, MarketError>
    where
        F: FnOnce(&Withdrawal) -> Result<Vec<WithdrawalEvent>, WithdrawalError>,
    {
        let mut withdrawals = self.withdrawals.write().await;
        let withdrawal = withdrawals
            .get_mut(&withdrawal_id)
            .ok_or(MarketError::NotFound {
                entity_type: Withdrawal::entity_type(),
                entity_id: withdrawal_id,
            })?;

        let events = command_fn(withdrawal)?;
        record_events(Withdrawal::entity_type(), &events);
        withdrawal.apply_events(events);
        Ok(withdrawal.clone())
    }

    /// Returns a withdrawal request by id.
    pub async fn withdrawal(&self, withdrawal_id: EntityId) -> Option<Withdrawal> {
        self.withdrawals.read().await.get(&withdrawal_id).cloned()
    }

    /// The admin withdrawal queue.
    pub async fn pending_withdrawals(&self) -> Vec<Withdrawal> {
        self.withdrawals
            .read()
            .await
            .values()
            .filter(|w| w.state() == WithdrawalState::Pending)
            .cloned()
            .collect()
    }
}

// Verification requests
impl Market {
    /// Creates a verification request by running a command against a fresh entity.
    ///
    /// # Panics
    ///
    /// Panics if the command succeeds without initializing the entity.
    pub async fn create_verification<F>(
        &self,
        command_fn: F,
    ) -> Result<VerificationRequest, MarketError>
    where
        F: FnOnce(&VerificationRequest) -> Result<Vec<VerificationEvent>, VerificationError>,
    {
        let mut request = VerificationRequest::default();
        let events = command_fn(&request)?;
        record_events(VerificationRequest::entity_type(), &events);
        request.apply_events(events);

        let id = request.id().expect("creation command must assign an id");
        self.verifications.write().await.insert(id, request.clone());
        Ok(request)
    }

    /// Runs a command against a stored verification request.
    pub async fn execute_verification<F>(
        &self,
        request_id: EntityId,
        command_fn: F,
    ) -> Result<VerificationRequest, MarketError>
    where
        F: FnOnce(&VerificationRequest) -> Result<Vec<VerificationEvent>, VerificationError>,
    {
        let mut verifications = self.verifications.write().await;
        let request = verifications
            .get_mut(&request_id)
            .ok_or(MarketError::NotFound {
                entity_type: VerificationRequest::entity_type(),
                entity_id: request_id,
            })?;

        let events = command_fn(request)?;
        record_events(VerificationRequest::entity_type(), &events);
        request.apply_events(events);
        Ok(request.clone())
    }

    /// Returns a verification request by id.
    pub async fn verification(&self, request_id: EntityId) -> Option<VerificationRequest> {
        self.verifications.read().await.get(&request_id).cloned()
    }

    /// The admin user-verification queue.
    pub async fn pending_verifications(&self) -> Vec<VerificationRequest> {
        self.verifications
            .read()
            .await
            .values()
            .filter(|v| v.state() == VerificationState::Pending)
            .cloned()
            .collect()
    }
}

// Wallets
impl Market {
    /// Returns a user's wallet (empty if they never received funds).
    pub async fn wallet_of(&self, user_id: UserId) -> Wallet {
        self.wallets
            .read()
            .await
            .get(&user_id)
            .copied()
            .unwrap_or_default()
    }

    /// Credits released proceeds to a user's wallet.
    pub async fn credit_wallet(&self, user_id: UserId, amount: Money) -> Wallet {
        let mut wallets = self.wallets.write().await;
        let wallet = wallets.entry(user_id).or_default();
        wallet.credit(amount);
        *wallet
    }

    /// Debits an approved withdrawal from a user's wallet.
    pub async fn debit_wallet(&self, user_id: UserId, amount: Money) -> Result<Wallet, MarketError> {
        let mut wallets = self.wallets.write().await;
        let wallet = wallets.entry(user_id).or_default();
        wallet.debit(amount)?;
        Ok(*wallet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Actor, OrderState, PhotoRef};

    #[tokio::test]
    async fn create_and_fetch_order() {
        let market = Market::new();
        let buyer = Actor::buyer(UserId::new());
        let farmer_id = UserId::new();
        let order_id = EntityId::new();

        let order = market
            .create_order(|o| {
                o.place(
                    order_id,
                    EntityId::new(),
                    buyer,
                    farmer_id,
                    "Tomatoes",
                    50,
                    Money::from_pounds(500),
                )
            })
            .await
            .unwrap();

        assert_eq!(order.id(), Some(order_id));
        assert!(market.order(order_id).await.is_some());
        assert_eq!(market.orders_for_buyer(buyer.user_id).await.len(), 1);
        assert_eq!(market.orders_for_farmer(farmer_id).await.len(), 1);
    }

    #[tokio::test]
    async fn execute_on_missing_order_is_not_found() {
        let market = Market::new();
        let farmer = Actor::farmer(UserId::new());

        let result = market
            .execute_order(EntityId::new(), |o| {
                o.ship(farmer, vec![PhotoRef::new("x.jpg")])
            })
            .await;

        assert!(matches!(result, Err(MarketError::NotFound { .. })));
    }

    #[tokio::test]
    async fn rejected_command_leaves_stored_state_unchanged() {
        let market = Market::new();
        let buyer = Actor::buyer(UserId::new());
        let farmer = Actor::farmer(UserId::new());
        let order_id = EntityId::new();

        market
            .create_order(|o| {
                o.place(
                    order_id,
                    EntityId::new(),
                    buyer,
                    farmer.user_id,
                    "Tomatoes",
                    50,
                    Money::from_pounds(500),
                )
            })
            .await
            .unwrap();

        // Photo gating rejects the transition
        let result = market
            .execute_order(order_id, |o| o.ship(farmer, vec![]))
            .await;
        assert!(result.is_err());

        let order = market.order(order_id).await.unwrap();
        assert_eq!(order.state(), OrderState::Pending);
    }

    #[tokio::test]
    async fn on_hold_view_drops_released_orders() {
        let market = Market::new();
        let buyer = Actor::buyer(UserId::new());
        let admin = Actor::admin(UserId::new());
        let order_id = EntityId::new();

        market
            .create_order(|o| {
                o.place(
                    order_id,
                    EntityId::new(),
                    buyer,
                    UserId::new(),
                    "Tomatoes",
                    50,
                    Money::from_pounds(500),
                )
            })
            .await
            .unwrap();
        assert_eq!(market.on_hold_orders().await.len(), 1);

        market
            .execute_order(order_id, |o| o.release_payment(admin))
            .await
            .unwrap();
        assert!(market.on_hold_orders().await.is_empty());
    }

    #[tokio::test]
    async fn wallet_roundtrip() {
        let market = Market::new();
        let farmer_id = UserId::new();

        assert!(market.wallet_of(farmer_id).await.balance().is_zero());

        market.credit_wallet(farmer_id, Money::from_pounds(300)).await;
        let wallet = market.debit_wallet(farmer_id, Money::from_pounds(100)).await.unwrap();
        assert_eq!(wallet.balance(), Money::from_pounds(200));

        let result = market.debit_wallet(farmer_id, Money::from_pounds(500)).await;
        assert!(matches!(result, Err(MarketError::Wallet(_))));
    }
}
