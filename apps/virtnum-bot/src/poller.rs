//! Background SMS forwarding.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ParseMode;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::bot::utils::forwarded_sms_text;
use crate::AppState;

/// Re-checks every active number on a fixed interval and pushes SMS
/// newer than the per-number watermark to the owning chat.
pub struct SmsPoller {
    bot: Bot,
    state: AppState,
    interval: Duration,
}

impl SmsPoller {
    pub fn new(bot: Bot, state: AppState, interval: Duration) -> Self {
        Self {
            bot,
            state,
            interval,
        }
    }

    pub async fn start(&self) {
        info!("Starting SMS poller (interval: {:?})...", self.interval);
        let mut interval = tokio::time::interval(self.interval);
        // Ticks are awaited on this task, so a slow sweep delays the next
        // one instead of overlapping it.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.poll_active_numbers().await;
        }
    }

    async fn poll_active_numbers(&self) {
        let active = self.state.registry.all_active().await;

        for number in active {
            let messages = match self.state.provider.fetch_sms(&number.number_id).await {
                Ok(messages) => messages,
                Err(e) => {
                    warn!("SMS poll failed for number {}: {}", number.number_id, e);
                    continue;
                }
            };

            let fresh = self
                .state
                .registry
                .unseen_messages(&number.number_id, &messages)
                .await;

            for sms in fresh {
                let text = forwarded_sms_text(&number, &sms);
                if let Err(e) = self
                    .bot
                    .send_message(ChatId(number.owner), text)
                    .parse_mode(ParseMode::Html)
                    .await
                {
                    error!(
                        "Failed to forward SMS for {} to {}: {}",
                        number.number_id, number.owner, e
                    );
                }
            }
        }
    }
}
