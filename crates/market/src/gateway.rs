//! Payment gateway seam.
//!
//! The one asynchronous-looking boundary in the system. The shipped
//! implementation is a fixed-delay timer standing in for a provider round
//! trip: no cancellation, no retry, no timeout, and the delay always
//! resolves to success. The trait returns `Result` so a real integration
//! could fail; nothing here does.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use common::UserId;
use domain::Money;
use thiserror::Error;

/// Errors a payment gateway could report.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The provider declined the charge.
    #[error("Charge declined: {0}")]
    Declined(String),
}

/// Receipt for a successful charge.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// The charge reference assigned by the gateway.
    pub reference: String,
}

/// Trait for charging buyers at checkout.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges a buyer for an order total.
    async fn charge(&self, buyer_id: UserId, amount: Money)
    -> Result<PaymentReceipt, GatewayError>;
}

/// Simulated gateway: waits a fixed delay, then succeeds.
#[derive(Clone)]
pub struct SimulatedPaymentGateway {
    latency: Duration,
    next_reference: Arc<AtomicU32>,
}

impl SimulatedPaymentGateway {
    /// Default simulated round-trip latency.
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

    /// Creates a gateway with the default latency.
    pub fn new() -> Self {
        Self::with_latency(Self::DEFAULT_LATENCY)
    }

    /// Creates a gateway with a custom latency (zero in tests).
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            next_reference: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(
        &self,
        buyer_id: UserId,
        amount: Money,
    ) -> Result<PaymentReceipt, GatewayError> {
        tokio::time::sleep(self.latency).await;

        let seq = self.next_reference.fetch_add(1, Ordering::Relaxed) + 1;
        let reference = format!("PAY-{seq:04}");
        tracing::info!(%buyer_id, %amount, %reference, "simulated charge settled");

        Ok(PaymentReceipt { reference })
    }
}
