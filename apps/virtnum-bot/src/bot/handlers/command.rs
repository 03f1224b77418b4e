use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, MessageId, ParseMode};
use tracing::{error, info};

use crate::bot::keyboards;
use crate::bot::utils::{
    active_numbers_text, countries_header, help_text, purchase_menu_text, purchase_success_text,
    welcome_text,
};
use crate::AppState;
use virtnum_provider::DEFAULT_SERVICE;

/// Where a flow renders: a fresh message or an edit of an existing one.
/// Callback flows edit the message the button lived on; command flows
/// send and then keep editing the same status message.
#[derive(Clone, Copy)]
pub enum Target {
    Send(ChatId),
    Edit(ChatId, MessageId),
}

/// Render `text` (HTML) at the target. Returns an `Edit` target for the
/// rendered message when possible so multi-step flows update in place.
pub async fn show(
    bot: &Bot,
    target: Target,
    text: String,
    keyboard: Option<InlineKeyboardMarkup>,
) -> Target {
    match target {
        Target::Edit(chat_id, message_id) => {
            let req = bot
                .edit_message_text(chat_id, message_id, text)
                .parse_mode(ParseMode::Html);
            let result = match keyboard {
                Some(kb) => req.reply_markup(kb).await,
                None => req.await,
            };
            if let Err(e) = result {
                error!("Failed to edit message: {}", e);
            }
            Target::Edit(chat_id, message_id)
        }
        Target::Send(chat_id) => {
            let req = bot.send_message(chat_id, text).parse_mode(ParseMode::Html);
            let result = match keyboard {
                Some(kb) => req.reply_markup(kb).await,
                None => req.await,
            };
            match result {
                Ok(m) => Target::Edit(chat_id, m.id),
                Err(e) => {
                    error!("Failed to send message: {}", e);
                    Target::Send(chat_id)
                }
            }
        }
    }
}

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    info!("Received message: {:?}", text);

    let tg_id = msg.chat.id.0;
    let mut parts = text.split_whitespace();
    let command = parts.next().unwrap_or("");
    let command = command.split('@').next().unwrap_or(command);
    let arg = parts.next();

    match command {
        "/start" => {
            let full_name = msg
                .from
                .as_ref()
                .map(|u| u.full_name())
                .unwrap_or_else(|| "User".to_string());
            let username = msg.from.as_ref().and_then(|u| u.username.as_deref());
            state.registry.upsert_user(tg_id, username, &full_name).await;

            show(
                &bot,
                Target::Send(msg.chat.id),
                welcome_text(&full_name),
                Some(keyboards::main_menu()),
            )
            .await;
        }

        "/help" => {
            show(&bot, Target::Send(msg.chat.id), help_text(), None).await;
        }

        "/countries" => {
            country_listing(&bot, Target::Send(msg.chat.id), tg_id, &state).await;
        }

        "/purchase" => match arg {
            Some(code) => {
                purchase_for_country(&bot, Target::Send(msg.chat.id), tg_id, code, &state).await;
            }
            None => {
                show(
                    &bot,
                    Target::Send(msg.chat.id),
                    purchase_menu_text(),
                    Some(keyboards::purchase_menu()),
                )
                .await;
            }
        },

        "/mysms" => {
            my_numbers_menu(&bot, Target::Send(msg.chat.id), tg_id, &state).await;
        }

        "/active" => {
            let numbers = state.registry.active_numbers_of(tg_id).await;
            let text = if numbers.is_empty() {
                "📱 You don't have any active numbers.".to_string()
            } else {
                active_numbers_text(&numbers)
            };
            show(&bot, Target::Send(msg.chat.id), text, None).await;
        }

        "/cancel" => match arg {
            Some(number_id) => cancel_number(&bot, msg.chat.id, tg_id, number_id, &state).await,
            None => {
                let _ = bot
                    .send_message(msg.chat.id, "Usage: /cancel <number_id>")
                    .await;
            }
        },

        _ => {
            // Not a command we know; stay silent.
        }
    }

    Ok(())
}

/// Fetch the country listing, cache it for pagination and render page 0.
/// Nothing is cached on failure.
pub async fn country_listing(bot: &Bot, target: Target, tg_id: i64, state: &AppState) {
    let target = show(
        bot,
        target,
        "🔄 Fetching available countries...".to_string(),
        None,
    )
    .await;

    match state.provider.list_countries().await {
        Ok(countries) if countries.is_empty() => {
            show(
                bot,
                target,
                "❌ No countries available at the moment.".to_string(),
                None,
            )
            .await;
        }
        Ok(countries) => {
            state.sessions.set_countries(tg_id, countries.clone()).await;
            show(
                bot,
                target,
                countries_header(countries.len(), 0),
                Some(keyboards::country_page(&countries, 0)),
            )
            .await;
        }
        Err(e) => {
            show(
                bot,
                target,
                format!("❌ Error fetching countries: {}", e),
                None,
            )
            .await;
        }
    }
}

/// Purchase a number and register it to the caller.
pub async fn purchase_for_country(
    bot: &Bot,
    target: Target,
    tg_id: i64,
    country_code: &str,
    state: &AppState,
) {
    let target = show(
        bot,
        target,
        format!("🔄 Purchasing number for {}...", country_code),
        None,
    )
    .await;

    match state
        .provider
        .purchase_number(country_code, DEFAULT_SERVICE)
        .await
    {
        Ok(purchase) => {
            let number = state
                .registry
                .record_purchase(tg_id, &purchase.number_id, country_code, &purchase.phone_number)
                .await;
            show(bot, target, purchase_success_text(&number), None).await;
        }
        Err(e) => {
            show(bot, target, format!("❌ Purchase failed: {}", e), None).await;
        }
    }
}

/// The caller's numbers as a button list, for picking which SMS to view.
pub async fn my_numbers_menu(bot: &Bot, target: Target, tg_id: i64, state: &AppState) {
    let numbers = state.registry.numbers_owned_by(tg_id).await;
    if numbers.is_empty() {
        show(
            bot,
            target,
            "📭 You don't have any active numbers.".to_string(),
            None,
        )
        .await;
        return;
    }

    show(
        bot,
        target,
        "📨 <b>My SMS Messages</b>\n\nSelect a number to view received SMS:".to_string(),
        Some(keyboards::my_numbers(&numbers)),
    )
    .await;
}

/// Ownership-checked cancel: registry check, provider release, then the
/// local status flip. A provider failure leaves the number active.
async fn cancel_number(bot: &Bot, chat_id: ChatId, tg_id: i64, number_id: &str, state: &AppState) {
    if let Err(e) = state.registry.authorize_cancel(tg_id, number_id).await {
        let _ = bot.send_message(chat_id, format!("❌ {}", e)).await;
        return;
    }

    match state.provider.cancel_number(number_id).await {
        Ok(()) => match state.registry.mark_cancelled(number_id).await {
            Ok(()) => {
                let _ = bot
                    .send_message(
                        chat_id,
                        format!("✅ Number {} cancelled successfully.", number_id),
                    )
                    .await;
            }
            Err(e) => {
                let _ = bot.send_message(chat_id, format!("❌ {}", e)).await;
            }
        },
        Err(e) => {
            let _ = bot
                .send_message(chat_id, format!("❌ Cancellation failed: {}", e))
                .await;
        }
    }
}
