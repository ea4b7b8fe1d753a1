//! Bilingual toast notifications.
//!
//! Every desk action surfaces one toast in the session's language. The
//! message table covers both marketplace languages; adding a language
//! means adding one arm per key.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Interface language of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    /// English.
    #[default]
    En,

    /// Arabic.
    Ar,
}

impl Lang {
    /// Parses a language tag, falling back to the default.
    pub fn parse(s: &str) -> Self {
        match s {
            "ar" => Lang::Ar,
            _ => Lang::En,
        }
    }

    /// Returns the language tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }
}

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastLevel {
    /// The action succeeded.
    Success,

    /// The action was blocked or rejected.
    Error,
}

/// Well-known toast messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    ListingSubmitted,
    ListingAccepted,
    ListingRejected,
    ListingClosed,
    OrderPlaced,
    OrderShipped,
    OrderDelivered,
    OrderCancelled,
    PaymentReleased,
    WithdrawalRequested,
    WithdrawalApproved,
    WithdrawalRejected,
    UserApproved,
    UserRejected,
    SignupComplete,
    PhotosMissing,
    ActionNotAllowed,
}

impl MessageKey {
    /// Returns the message text in the given language.
    pub fn text(&self, lang: Lang) -> &'static str {
        match (self, lang) {
            (MessageKey::ListingSubmitted, Lang::En) => "Listing submitted for review",
            (MessageKey::ListingSubmitted, Lang::Ar) => "تم إرسال العرض للمراجعة",
            (MessageKey::ListingAccepted, Lang::En) => "Listing approved",
            (MessageKey::ListingAccepted, Lang::Ar) => "تمت الموافقة على العرض",
            (MessageKey::ListingRejected, Lang::En) => "Listing rejected",
            (MessageKey::ListingRejected, Lang::Ar) => "تم رفض العرض",
            (MessageKey::ListingClosed, Lang::En) => "Listing closed",
            (MessageKey::ListingClosed, Lang::Ar) => "تم إغلاق العرض",
            (MessageKey::OrderPlaced, Lang::En) => "Order placed successfully",
            (MessageKey::OrderPlaced, Lang::Ar) => "تم تقديم الطلب بنجاح",
            (MessageKey::OrderShipped, Lang::En) => "Order shipped",
            (MessageKey::OrderShipped, Lang::Ar) => "تم شحن الطلب",
            (MessageKey::OrderDelivered, Lang::En) => "Delivery confirmed",
            (MessageKey::OrderDelivered, Lang::Ar) => "تم تأكيد الاستلام",
            (MessageKey::OrderCancelled, Lang::En) => "Order cancelled",
            (MessageKey::OrderCancelled, Lang::Ar) => "تم إلغاء الطلب",
            (MessageKey::PaymentReleased, Lang::En) => "Payment released to farmer",
            (MessageKey::PaymentReleased, Lang::Ar) => "تم تحويل المبلغ إلى المزارع",
            (MessageKey::WithdrawalRequested, Lang::En) => "Withdrawal request submitted",
            (MessageKey::WithdrawalRequested, Lang::Ar) => "تم إرسال طلب السحب",
            (MessageKey::WithdrawalApproved, Lang::En) => "Withdrawal approved",
            (MessageKey::WithdrawalApproved, Lang::Ar) => "تمت الموافقة على السحب",
            (MessageKey::WithdrawalRejected, Lang::En) => "Withdrawal rejected",
            (MessageKey::WithdrawalRejected, Lang::Ar) => "تم رفض طلب السحب",
            (MessageKey::UserApproved, Lang::En) => "User approved",
            (MessageKey::UserApproved, Lang::Ar) => "تمت الموافقة على المستخدم",
            (MessageKey::UserRejected, Lang::En) => "User rejected",
            (MessageKey::UserRejected, Lang::Ar) => "تم رفض المستخدم",
            (MessageKey::SignupComplete, Lang::En) => "Account created, check your email",
            (MessageKey::SignupComplete, Lang::Ar) => "تم إنشاء الحساب، راجع بريدك الإلكتروني",
            (MessageKey::PhotosMissing, Lang::En) => "Attach at least one photo first",
            (MessageKey::PhotosMissing, Lang::Ar) => "أرفق صورة واحدة على الأقل أولاً",
            (MessageKey::ActionNotAllowed, Lang::En) => "This action is not available",
            (MessageKey::ActionNotAllowed, Lang::Ar) => "هذا الإجراء غير متاح",
        }
    }
}

/// A toast shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Severity of the toast.
    pub level: ToastLevel,

    /// Rendered message in the session language.
    pub message: String,
}

impl Toast {
    /// A success toast.
    pub fn success(key: MessageKey, lang: Lang) -> Self {
        Self {
            level: ToastLevel::Success,
            message: key.text(lang).to_string(),
        }
    }

    /// An error toast.
    pub fn error(key: MessageKey, lang: Lang) -> Self {
        Self {
            level: ToastLevel::Error,
            message: key.text(lang).to_string(),
        }
    }
}

/// Per-session buffer of surfaced toasts.
#[derive(Clone, Default)]
pub struct NotificationCenter {
    toasts: Arc<RwLock<Vec<Toast>>>,
}

impl NotificationCenter {
    /// Creates an empty notification center.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a toast.
    pub async fn push(&self, toast: Toast) {
        self.toasts.write().await.push(toast);
    }

    /// Returns all toasts surfaced so far.
    pub async fn all(&self) -> Vec<Toast> {
        self.toasts.read().await.clone()
    }

    /// Removes and returns all toasts.
    pub async fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.write().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lang_parse_defaults_to_english() {
        assert_eq!(Lang::parse("ar"), Lang::Ar);
        assert_eq!(Lang::parse("en"), Lang::En);
        assert_eq!(Lang::parse("fr"), Lang::En);
    }

    #[test]
    fn every_key_has_both_languages() {
        let keys = [
            MessageKey::ListingSubmitted,
            MessageKey::ListingAccepted,
            MessageKey::ListingRejected,
            MessageKey::ListingClosed,
            MessageKey::OrderPlaced,
            MessageKey::OrderShipped,
            MessageKey::OrderDelivered,
            MessageKey::OrderCancelled,
            MessageKey::PaymentReleased,
            MessageKey::WithdrawalRequested,
            MessageKey::WithdrawalApproved,
            MessageKey::WithdrawalRejected,
            MessageKey::UserApproved,
            MessageKey::UserRejected,
            MessageKey::SignupComplete,
            MessageKey::PhotosMissing,
            MessageKey::ActionNotAllowed,
        ];
        for key in keys {
            assert!(!key.text(Lang::En).is_empty());
            assert!(!key.text(Lang::Ar).is_empty());
            assert_ne!(key.text(Lang::En), key.text(Lang::Ar));
        }
    }

    #[tokio::test]
    async fn center_collects_and_drains() {
        let center = NotificationCenter::new();
        center
            .push(Toast::success(MessageKey::OrderPlaced, Lang::En))
            .await;
        center
            .push(Toast::error(MessageKey::PhotosMissing, Lang::Ar))
            .await;

        assert_eq!(center.all().await.len(), 2);

        let drained = center.drain().await;
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].level, ToastLevel::Success);
        assert!(center.all().await.is_empty());
    }
}
