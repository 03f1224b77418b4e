use teloxide::prelude::*;
use tracing::info;

use crate::bot::handlers::command::{self, Target};
use crate::bot::keyboards;
use crate::bot::utils::{countries_header, help_text, purchase_menu_text, sms_list_text, welcome_text};
use crate::AppState;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    info!("Received callback: {:?}", q.data);
    let callback_id = q.id.clone();
    let tg_id = q.from.id.0 as i64;
    let full_name = q.from.full_name();
    let username = q.from.username.clone();

    let Some(data) = q.data else {
        let _ = bot.answer_callback_query(callback_id).await;
        return Ok(());
    };

    let _ = bot.answer_callback_query(callback_id).await;

    // Prefer editing the message the button lives on.
    let target = match &q.message {
        Some(msg) => Target::Edit(msg.chat().id, msg.id()),
        None => Target::Send(ChatId(tg_id)),
    };

    match data.as_str() {
        "main_menu" => {
            state
                .registry
                .upsert_user(tg_id, username.as_deref(), &full_name)
                .await;
            command::show(
                &bot,
                target,
                welcome_text(&full_name),
                Some(keyboards::main_menu()),
            )
            .await;
        }

        "list_countries" => {
            command::country_listing(&bot, target, tg_id, &state).await;
        }

        "purchase_menu" => {
            command::show(
                &bot,
                target,
                purchase_menu_text(),
                Some(keyboards::purchase_menu()),
            )
            .await;
        }

        "my_sms" | "refresh_sms" => {
            command::my_numbers_menu(&bot, target, tg_id, &state).await;
        }

        "help" => {
            command::show(&bot, target, help_text(), Some(keyboards::main_menu())).await;
        }

        page if page.starts_with("country_page_") => {
            let page_no = page
                .strip_prefix("country_page_")
                .unwrap_or("0")
                .parse::<usize>()
                .unwrap_or(0);
            show_country_page(&bot, target, tg_id, page_no, &state).await;
        }

        select if select.starts_with("select_country_") => {
            let country_code = select.strip_prefix("select_country_").unwrap_or_default();
            command::purchase_for_country(&bot, target, tg_id, country_code, &state).await;
        }

        view if view.starts_with("view_sms_") => {
            let number_id = view.strip_prefix("view_sms_").unwrap_or_default();
            view_sms(&bot, target, number_id, &state).await;
        }

        _ => {
            // Ignore unknown
        }
    }

    Ok(())
}

/// Flip to another page of the cached listing. A missing snapshot (for
/// example after a restart) falls back to a fresh fetch.
async fn show_country_page(bot: &Bot, target: Target, tg_id: i64, page: usize, state: &AppState) {
    let Some(browse) = state.sessions.browse(tg_id).await else {
        command::country_listing(bot, target, tg_id, state).await;
        return;
    };

    state.sessions.set_page(tg_id, page).await;
    command::show(
        bot,
        target,
        countries_header(browse.countries.len(), page),
        Some(keyboards::country_page(&browse.countries, page)),
    )
    .await;
}

/// Fetch and render the most recent SMS for one number.
async fn view_sms(bot: &Bot, target: Target, number_id: &str, state: &AppState) {
    let text = match state.provider.fetch_sms(number_id).await {
        Ok(messages) => sms_list_text(number_id, &messages),
        Err(e) => format!("❌ Error fetching SMS: {}", e),
    };

    command::show(bot, target, text, Some(keyboards::sms_view(number_id))).await;
}
