use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a purchased number. Cancelled numbers never reactivate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberStatus {
    Active,
    Cancelled,
}

/// A known chat user and the numbers they own, in purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub tg_id: i64,
    pub username: Option<String>,
    pub full_name: String,
    pub joined_at: DateTime<Utc>,
    pub numbers: Vec<String>,
}

impl UserProfile {
    pub fn new(tg_id: i64) -> Self {
        Self {
            tg_id,
            username: None,
            full_name: String::new(),
            joined_at: Utc::now(),
            numbers: Vec::new(),
        }
    }
}

/// A number purchased through the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasedNumber {
    pub number_id: String,
    /// Chat id of the owning user.
    pub owner: i64,
    pub country_code: String,
    pub phone_number: String,
    pub purchased_at: DateTime<Utc>,
    pub status: NumberStatus,
    /// Timestamp of the newest SMS already forwarded to the owner.
    pub last_forwarded: Option<DateTime<Utc>>,
}

impl PurchasedNumber {
    pub fn is_active(&self) -> bool {
        self.status == NumberStatus::Active
    }
}
