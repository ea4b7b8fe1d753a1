//! Withdrawal request entity.

use chrono::{DateTime, Utc};
use common::{EntityId, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::actor::{Actor, Role};
use crate::entity::{DomainEvent, Entity};
use crate::value_objects::{Money, Wallet};

/// The state of a withdrawal request.
///
/// `Pending → { Approved, Rejected }`, admin decided; both outcomes are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WithdrawalState {
    /// Awaiting admin decision.
    #[default]
    Pending,

    /// Approved; the amount left the farmer's wallet (terminal state).
    Approved,

    /// Rejected by an admin (terminal state).
    Rejected,
}

impl WithdrawalState {
    /// Returns true if an admin can decide the request in this state.
    pub fn can_decide(&self) -> bool {
        matches!(self, WithdrawalState::Pending)
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WithdrawalState::Approved | WithdrawalState::Rejected)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            WithdrawalState::Pending => "Pending",
            WithdrawalState::Approved => "Approved",
            WithdrawalState::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for WithdrawalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Events that can occur on a withdrawal request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum WithdrawalEvent {
    /// Farmer requested a withdrawal from their wallet.
    WithdrawalRequested(WithdrawalRequestedData),

    /// Admin approved the withdrawal.
    WithdrawalApproved(WithdrawalDecidedData),

    /// Admin rejected the withdrawal.
    WithdrawalRejected(WithdrawalRejectedData),
}

impl DomainEvent for WithdrawalEvent {
    fn event_type(&self) -> &'static str {
        match self {
            WithdrawalEvent::WithdrawalRequested(_) => "WithdrawalRequested",
            WithdrawalEvent::WithdrawalApproved(_) => "WithdrawalApproved",
            WithdrawalEvent::WithdrawalRejected(_) => "WithdrawalRejected",
        }
    }
}

/// Data for WithdrawalRequested event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequestedData {
    pub withdrawal_id: EntityId,
    pub farmer_id: UserId,
    pub amount: Money,
    pub requested_at: DateTime<Utc>,
}

/// Data for WithdrawalApproved event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalDecidedData {
    pub decided_at: DateTime<Utc>,
    pub decided_by: UserId,
}

/// Data for WithdrawalRejected event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRejectedData {
    pub decided_at: DateTime<Utc>,
    pub decided_by: UserId,
    pub reason: String,
}

/// Errors that can occur during withdrawal operations.
#[derive(Debug, Error)]
pub enum WithdrawalError {
    /// Request is not in the expected state.
    #[error("Invalid state transition: cannot {action} from {current_state} state")]
    InvalidStateTransition {
        current_state: WithdrawalState,
        action: &'static str,
    },

    /// The acting role may not invoke this transition.
    #[error("Role {role} may not {action}")]
    UnauthorizedRole { role: Role, action: &'static str },

    /// The wallet balance cannot cover the requested amount.
    #[error("Insufficient balance: wallet holds {balance}, requested {requested}")]
    InsufficientBalance { balance: Money, requested: Money },

    /// Invalid amount.
    #[error("Invalid amount: {amount} (must be greater than 0)")]
    InvalidAmount { amount: i64 },

    /// Request is already created.
    #[error("Withdrawal already requested")]
    AlreadyRequested,
}

/// A farmer's request to withdraw released proceeds from their wallet.
///
/// The funds check runs at creation, so the admin queue only ever holds
/// fundable requests; approval performs the actual wallet debit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Withdrawal {
    id: Option<EntityId>,
    farmer_id: Option<UserId>,
    amount: Money,
    state: WithdrawalState,
    rejection_reason: Option<String>,
}

impl Entity for Withdrawal {
    type Event = WithdrawalEvent;
    type Error = WithdrawalError;

    fn entity_type() -> &'static str {
        "Withdrawal"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            WithdrawalEvent::WithdrawalRequested(data) => {
                self.id = Some(data.withdrawal_id);
                self.farmer_id = Some(data.farmer_id);
                self.amount = data.amount;
                self.state = WithdrawalState::Pending;
            }
            WithdrawalEvent::WithdrawalApproved(_) => {
                self.state = WithdrawalState::Approved;
            }
            WithdrawalEvent::WithdrawalRejected(data) => {
                self.state = WithdrawalState::Rejected;
                self.rejection_reason = Some(data.reason);
            }
        }
    }
}

// Query methods
impl Withdrawal {
    /// Returns the requesting farmer.
    pub fn farmer_id(&self) -> Option<UserId> {
        self.farmer_id
    }

    /// Returns the requested amount.
    pub fn amount(&self) -> Money {
        self.amount
    }

    /// Returns the current state.
    pub fn state(&self) -> WithdrawalState {
        self.state
    }

    /// Returns the rejection reason, if rejected.
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }
}

// Command methods (return events)
impl Withdrawal {
    /// Requests a withdrawal against the farmer's wallet.
    pub fn request(
        &self,
        withdrawal_id: EntityId,
        farmer: Actor,
        amount: Money,
        wallet: &Wallet,
    ) -> Result<Vec<WithdrawalEvent>, WithdrawalError> {
        if self.id.is_some() {
            return Err(WithdrawalError::AlreadyRequested);
        }

        if farmer.role != Role::Farmer {
            return Err(WithdrawalError::UnauthorizedRole {
                role: farmer.role,
                action: "request withdrawal",
            });
        }

        if !amount.is_positive() {
            return Err(WithdrawalError::InvalidAmount {
                amount: amount.piasters(),
            });
        }

        if !wallet.can_cover(amount) {
            return Err(WithdrawalError::InsufficientBalance {
                balance: wallet.balance(),
                requested: amount,
            });
        }

        Ok(vec![WithdrawalEvent::WithdrawalRequested(
            WithdrawalRequestedData {
                withdrawal_id,
                farmer_id: farmer.user_id,
                amount,
                requested_at: Utc::now(),
            },
        )])
    }

    /// Approves the withdrawal. Admin only.
    pub fn approve(&self, actor: Actor) -> Result<Vec<WithdrawalEvent>, WithdrawalError> {
        self.check_decidable(actor, "approve")?;

        Ok(vec![WithdrawalEvent::WithdrawalApproved(
            WithdrawalDecidedData {
                decided_at: Utc::now(),
                decided_by: actor.user_id,
            },
        )])
    }

    /// Rejects the withdrawal. Admin only.
    pub fn reject(
        &self,
        actor: Actor,
        reason: impl Into<String>,
    ) -> Result<Vec<WithdrawalEvent>, WithdrawalError> {
        self.check_decidable(actor, "reject")?;

        Ok(vec![WithdrawalEvent::WithdrawalRejected(
            WithdrawalRejectedData {
                decided_at: Utc::now(),
                decided_by: actor.user_id,
                reason: reason.into(),
            },
        )])
    }

    fn check_decidable(&self, actor: Actor, action: &'static str) -> Result<(), WithdrawalError> {
        if actor.role != Role::Admin {
            return Err(WithdrawalError::UnauthorizedRole {
                role: actor.role,
                action,
            });
        }
        if !self.state.can_decide() {
            return Err(WithdrawalError::InvalidStateTransition {
                current_state: self.state,
                action,
            });
        }
        Ok(())
    }
}
