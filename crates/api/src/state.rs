//! Shared application state.

use std::collections::HashMap;

use common::{EntityId, UserId};
use draft_store::InMemoryDraftStore;
use market::{
    CheckoutFlow, Lang, Market, NotificationCenter, SignupFlow, SimulatedPaymentGateway,
};
use tokio::sync::RwLock;

/// State shared across all handlers.
///
/// Wizard flows are stateful between requests, so in-progress signup and
/// checkout sessions are held here, keyed by the user/session they belong
/// to. Everything else is a clone-cheap handle.
pub struct AppState {
    pub market: Market,
    pub draft_store: InMemoryDraftStore,
    pub notifications: NotificationCenter,
    pub gateway: SimulatedPaymentGateway,
    pub default_lang: Lang,
    pub signups: RwLock<HashMap<UserId, SignupFlow<InMemoryDraftStore>>>,
    pub checkouts: RwLock<HashMap<EntityId, CheckoutFlow>>,
}

impl AppState {
    /// Creates fresh state with the given default language.
    pub fn new(default_lang: Lang) -> Self {
        Self::with_gateway(default_lang, SimulatedPaymentGateway::new())
    }

    /// Creates fresh state with a custom gateway (zero latency in tests).
    pub fn with_gateway(default_lang: Lang, gateway: SimulatedPaymentGateway) -> Self {
        Self {
            market: Market::new(),
            draft_store: InMemoryDraftStore::new(),
            notifications: NotificationCenter::new(),
            gateway,
            default_lang,
            signups: RwLock::new(HashMap::new()),
            checkouts: RwLock::new(HashMap::new()),
        }
    }
}
