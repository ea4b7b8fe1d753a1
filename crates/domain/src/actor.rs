//! Marketplace actors and their roles.

use common::UserId;
use serde::{Deserialize, Serialize};

/// The role a user acts under.
///
/// Exactly one role may invoke each lifecycle transition: farmers ship,
/// buyers confirm delivery or cancel, admins moderate and release
/// escrowed payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Lists crops and fulfills orders.
    Farmer,

    /// Purchases crops.
    Buyer,

    /// Moderates listings, users, and escrowed payments.
    Admin,
}

impl Role {
    /// Returns the role name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "farmer",
            Role::Buyer => "buyer",
            Role::Admin => "admin",
        }
    }

    /// Parses a role from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "farmer" => Some(Role::Farmer),
            "buyer" => Some(Role::Buyer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Returns true if this role can be chosen at signup.
    ///
    /// Admin accounts are provisioned out of band, never self-registered.
    pub fn is_registrable(&self) -> bool {
        matches!(self, Role::Farmer | Role::Buyer)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user acting on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The acting user.
    pub user_id: UserId,

    /// The role the user acts under.
    pub role: Role,
}

impl Actor {
    /// Creates an actor.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// A farmer actor.
    pub fn farmer(user_id: UserId) -> Self {
        Self::new(user_id, Role::Farmer)
    }

    /// A buyer actor.
    pub fn buyer(user_id: UserId) -> Self {
        Self::new(user_id, Role::Buyer)
    }

    /// An admin actor.
    pub fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    /// Returns true if the actor acts as an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_roundtrip() {
        for role in [Role::Farmer, Role::Buyer, Role::Admin] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("merchant"), None);
    }

    #[test]
    fn only_farmer_and_buyer_are_registrable() {
        assert!(Role::Farmer.is_registrable());
        assert!(Role::Buyer.is_registrable());
        assert!(!Role::Admin.is_registrable());
    }

    #[test]
    fn actor_constructors_set_role() {
        let user = UserId::new();
        assert_eq!(Actor::farmer(user).role, Role::Farmer);
        assert_eq!(Actor::buyer(user).role, Role::Buyer);
        assert!(Actor::admin(user).is_admin());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Farmer).unwrap();
        assert_eq!(json, "\"farmer\"");
    }
}
