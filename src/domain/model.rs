use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A delivery zone with its flat shipping fee in whole ringgit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryArea {
    pub id: &'static str,
    pub name: &'static str,
    pub fee: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price in ringgit.
    pub price: f64,
    pub category: String,
    /// CDN public ids, first one is the cover image.
    #[serde(default)]
    pub images: Vec<String>,
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Builds an unread order-status notification stamped with the current time.
    pub fn order_status(
        id: impl Into<String>,
        user_id: impl Into<String>,
        order_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            kind: NotificationKind::OrderStatus,
            title: title.into(),
            message: message.into(),
            order_id: Some(order_id.into()),
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    Pending,
    Awarded,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Referral {
    pub id: String,
    pub referrer_id: String,
    pub referred_id: String,
    pub status: ReferralStatus,
    pub created_at: DateTime<Utc>,
}

/// Aggregated referral figures as reported to a user. `total_savings` is
/// computed upstream and only carried here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReferralStats {
    pub total_referrals: u32,
    pub awarded_referrals: u32,
    pub pending_referrals: u32,
    pub total_savings: f64,
}
