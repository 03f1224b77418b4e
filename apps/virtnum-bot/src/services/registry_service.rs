//! In-memory store of users and the numbers they purchased.
//!
//! Process lifetime only; nothing survives a restart. All mutation goes
//! through a single `RwLock`, so concurrent handlers and the SMS poller
//! see a consistent view.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::number::{NumberStatus, PurchasedNumber, UserProfile};
use virtnum_provider::SmsMessage;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Number {0} not found.")]
    NotFound(String),

    #[error("Number {0} doesn't belong to you.")]
    NotOwned(String),

    #[error("Number {0} is already cancelled.")]
    AlreadyCancelled(String),
}

#[derive(Default)]
struct RegistryInner {
    users: HashMap<i64, UserProfile>,
    numbers: HashMap<String, PurchasedNumber>,
}

#[derive(Clone)]
pub struct RegistryService {
    inner: Arc<RwLock<RegistryInner>>,
}

impl RegistryService {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner::default())),
        }
    }

    /// Create or refresh the caller's profile. Profiles are never deleted.
    pub async fn upsert_user(&self, tg_id: i64, username: Option<&str>, full_name: &str) {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .entry(tg_id)
            .or_insert_with(|| UserProfile::new(tg_id));
        user.username = username.map(str::to_string);
        user.full_name = full_name.to_string();
    }

    /// Record a successful purchase and append the id to the owner's list.
    ///
    /// A number id is reachable from exactly one owned-list: if the
    /// provider ever reissues an id, the previous owner loses it.
    pub async fn record_purchase(
        &self,
        tg_id: i64,
        number_id: &str,
        country_code: &str,
        phone_number: &str,
    ) -> PurchasedNumber {
        let mut inner = self.inner.write().await;

        let number = PurchasedNumber {
            number_id: number_id.to_string(),
            owner: tg_id,
            country_code: country_code.to_string(),
            phone_number: phone_number.to_string(),
            purchased_at: Utc::now(),
            status: NumberStatus::Active,
            last_forwarded: None,
        };

        if let Some(prev) = inner.numbers.insert(number_id.to_string(), number.clone()) {
            if prev.owner != tg_id {
                if let Some(old_owner) = inner.users.get_mut(&prev.owner) {
                    old_owner.numbers.retain(|id| id != number_id);
                }
            }
        }

        let user = inner
            .users
            .entry(tg_id)
            .or_insert_with(|| UserProfile::new(tg_id));
        if !user.numbers.iter().any(|id| id == number_id) {
            user.numbers.push(number_id.to_string());
        }

        info!("Registered number {} for user {}", number_id, tg_id);
        number
    }

    /// Numbers owned by `tg_id`, in purchase order.
    pub async fn numbers_owned_by(&self, tg_id: i64) -> Vec<PurchasedNumber> {
        let inner = self.inner.read().await;
        let Some(user) = inner.users.get(&tg_id) else {
            return Vec::new();
        };
        user.numbers
            .iter()
            .filter_map(|id| inner.numbers.get(id))
            .cloned()
            .collect()
    }

    pub async fn active_numbers_of(&self, tg_id: i64) -> Vec<PurchasedNumber> {
        self.numbers_owned_by(tg_id)
            .await
            .into_iter()
            .filter(PurchasedNumber::is_active)
            .collect()
    }

    /// Every active number across all users, oldest purchase first.
    pub async fn all_active(&self) -> Vec<PurchasedNumber> {
        let inner = self.inner.read().await;
        let mut active: Vec<PurchasedNumber> = inner
            .numbers
            .values()
            .filter(|n| n.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| a.purchased_at.cmp(&b.purchased_at));
        active
    }

    pub async fn lookup(&self, number_id: &str) -> Option<PurchasedNumber> {
        self.inner.read().await.numbers.get(number_id).cloned()
    }

    /// Check that `tg_id` may cancel `number_id`. Read-only: state is
    /// untouched on failure, and unknown ids are reported differently
    /// from numbers owned by someone else.
    pub async fn authorize_cancel(&self, tg_id: i64, number_id: &str) -> Result<(), RegistryError> {
        let inner = self.inner.read().await;
        let number = inner
            .numbers
            .get(number_id)
            .ok_or_else(|| RegistryError::NotFound(number_id.to_string()))?;

        if number.owner != tg_id {
            return Err(RegistryError::NotOwned(number_id.to_string()));
        }
        if number.status != NumberStatus::Active {
            return Err(RegistryError::AlreadyCancelled(number_id.to_string()));
        }
        Ok(())
    }

    /// Flip a number to cancelled after the provider accepted the release.
    pub async fn mark_cancelled(&self, number_id: &str) -> Result<(), RegistryError> {
        let mut inner = self.inner.write().await;
        let number = inner
            .numbers
            .get_mut(number_id)
            .ok_or_else(|| RegistryError::NotFound(number_id.to_string()))?;
        number.status = NumberStatus::Cancelled;
        info!("Number {} cancelled", number_id);
        Ok(())
    }

    /// Return the entries of `messages` strictly newer than the number's
    /// forwarding watermark and advance the watermark to the newest
    /// timestamp seen. Unknown ids yield nothing.
    pub async fn unseen_messages(
        &self,
        number_id: &str,
        messages: &[SmsMessage],
    ) -> Vec<SmsMessage> {
        let mut inner = self.inner.write().await;
        let Some(number) = inner.numbers.get_mut(number_id) else {
            return Vec::new();
        };

        let fresh: Vec<SmsMessage> = messages
            .iter()
            .filter(|m| match number.last_forwarded {
                Some(seen) => m.timestamp > seen,
                None => true,
            })
            .cloned()
            .collect();

        if let Some(newest) = messages.iter().map(|m| m.timestamp).max() {
            number.last_forwarded = Some(match number.last_forwarded {
                Some(seen) => seen.max(newest),
                None => newest,
            });
        }

        fresh
    }
}
