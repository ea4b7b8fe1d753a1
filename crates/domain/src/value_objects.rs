//! Value objects shared across the marketplace domain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Money amount in piasters (1/100 EGP) to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in piasters (e.g., 1000 = EGP 10.00)
    piasters: i64,
}

impl Money {
    /// Creates a new Money amount from piasters.
    pub fn from_piasters(piasters: i64) -> Self {
        Self { piasters }
    }

    /// Creates a new Money amount from whole Egyptian pounds.
    pub fn from_pounds(pounds: i64) -> Self {
        Self {
            piasters: pounds * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { piasters: 0 }
    }

    /// Returns the amount in piasters.
    pub fn piasters(&self) -> i64 {
        self.piasters
    }

    /// Returns the pound portion (whole number).
    pub fn pounds(&self) -> i64 {
        self.piasters / 100
    }

    /// Returns the piaster portion (remainder after pounds).
    pub fn piasters_part(&self) -> i64 {
        self.piasters.abs() % 100
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.piasters > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.piasters == 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            piasters: self.piasters * quantity as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.piasters < 0 {
            write!(f, "-EGP {}.{:02}", self.pounds().abs(), self.piasters_part())
        } else {
            write!(f, "EGP {}.{:02}", self.pounds(), self.piasters_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            piasters: self.piasters + rhs.piasters,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            piasters: self.piasters - rhs.piasters,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.piasters += rhs.piasters;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.piasters -= rhs.piasters;
    }
}

/// Reference to an uploaded photo (shipment proof, identity document).
///
/// The marketplace never inspects image bytes; it only tracks that an
/// attachment slot was filled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoRef(String);

impl PhotoRef {
    /// Creates a photo reference from an upload path or URL.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Returns the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhotoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PhotoRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PhotoRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Errors from wallet arithmetic.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The wallet balance cannot cover the requested amount.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },
}

/// A farmer's wallet holding released sale proceeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    balance: Money,
}

impl Wallet {
    /// Creates an empty wallet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a wallet with an opening balance.
    pub fn with_balance(balance: Money) -> Self {
        Self { balance }
    }

    /// Returns the current balance.
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// Returns true if the balance covers the amount.
    pub fn can_cover(&self, amount: Money) -> bool {
        amount <= self.balance
    }

    /// Adds released proceeds to the balance.
    pub fn credit(&mut self, amount: Money) {
        self.balance += amount;
    }

    /// Removes an approved withdrawal from the balance.
    pub fn debit(&mut self, amount: Money) -> Result<(), WalletError> {
        if !self.can_cover(amount) {
            return Err(WalletError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_from_piasters() {
        let money = Money::from_piasters(1234);
        assert_eq!(money.piasters(), 1234);
        assert_eq!(money.pounds(), 12);
        assert_eq!(money.piasters_part(), 34);
    }

    #[test]
    fn money_from_pounds() {
        let money = Money::from_pounds(50);
        assert_eq!(money.piasters(), 5000);
        assert_eq!(money.pounds(), 50);
        assert_eq!(money.piasters_part(), 0);
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_piasters(1234).to_string(), "EGP 12.34");
        assert_eq!(Money::from_piasters(5).to_string(), "EGP 0.05");
        assert_eq!(Money::from_piasters(-1234).to_string(), "-EGP 12.34");
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::from_piasters(1000);
        let b = Money::from_piasters(500);

        assert_eq!((a + b).piasters(), 1500);
        assert_eq!((a - b).piasters(), 500);
        assert_eq!(a.multiply(3).piasters(), 3000);
    }

    #[test]
    fn money_assign_ops() {
        let mut money = Money::from_piasters(100);
        money += Money::from_piasters(50);
        assert_eq!(money.piasters(), 150);
        money -= Money::from_piasters(30);
        assert_eq!(money.piasters(), 120);
    }

    #[test]
    fn photo_ref_string_conversion() {
        let photo = PhotoRef::new("uploads/shipment-1.jpg");
        assert_eq!(photo.as_str(), "uploads/shipment-1.jpg");

        let photo2: PhotoRef = "uploads/selfie.jpg".into();
        assert_eq!(photo2.to_string(), "uploads/selfie.jpg");
    }

    #[test]
    fn wallet_credit_and_debit() {
        let mut wallet = Wallet::new();
        wallet.credit(Money::from_pounds(100));
        assert_eq!(wallet.balance(), Money::from_pounds(100));

        wallet.debit(Money::from_pounds(40)).unwrap();
        assert_eq!(wallet.balance(), Money::from_pounds(60));
    }

    #[test]
    fn wallet_debit_over_balance_fails() {
        let mut wallet = Wallet::with_balance(Money::from_pounds(10));
        let result = wallet.debit(Money::from_pounds(11));
        assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
        assert_eq!(wallet.balance(), Money::from_pounds(10));
    }

    #[test]
    fn money_serialization_roundtrip() {
        let money = Money::from_piasters(999);
        let json = serde_json::to_string(&money).unwrap();
        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(money, deserialized);
    }
}
