use dotenvy::dotenv;
use std::env;
use std::time::Duration;
use teloxide::prelude::*;

mod bot;
mod models;
mod poller;
mod services;
mod state;

use crate::poller::SmsPoller;
use crate::services::registry_service::RegistryService;
use crate::services::session_service::SessionService;
use crate::state::AppState;
use virtnum_provider::VirtualNumberClient;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();

    log::info!("Starting Virtual Number Bot...");

    let token = match env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.trim().is_empty() => token,
        _ => {
            log::error!("Please set TELEGRAM_BOT_TOKEN environment variable");
            return;
        }
    };

    let api_key = env::var("PROVIDER_API_KEY").unwrap_or_default();
    if api_key.trim().is_empty() {
        log::warn!("PROVIDER_API_KEY is empty, provider calls will be rejected");
    }

    let provider = match env::var("PROVIDER_API_URL") {
        Ok(url) if !url.trim().is_empty() => VirtualNumberClient::with_base_url(url, api_key),
        _ => VirtualNumberClient::new(api_key),
    };

    let poll_interval = env::var("SMS_POLL_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS);

    let state = AppState {
        provider,
        registry: RegistryService::new(),
        sessions: SessionService::new(),
    };

    let bot = Bot::new(token);

    let sms_poller = SmsPoller::new(
        bot.clone(),
        state.clone(),
        Duration::from_secs(poll_interval),
    );
    tokio::spawn(async move { sms_poller.start().await });

    // Create a dummy shutdown signal for now
    let (_tx, rx) = tokio::sync::broadcast::channel(1);

    bot::run_bot(bot, rx, state).await;
}
