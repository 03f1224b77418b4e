use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::models::number::PurchasedNumber;
use crate::services::session_service::{has_next_page, page_slice};
use virtnum_provider::CountryListing;

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "📱 List Countries",
            "list_countries",
        )],
        vec![InlineKeyboardButton::callback(
            "🛒 Purchase Number",
            "purchase_menu",
        )],
        vec![InlineKeyboardButton::callback("📨 My SMS", "my_sms")],
        vec![InlineKeyboardButton::callback("❓ Help", "help")],
    ])
}

pub fn purchase_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "🇺🇸 USA (+1)",
            "select_country_US",
        )],
        vec![InlineKeyboardButton::callback(
            "🇬🇧 UK (+44)",
            "select_country_GB",
        )],
        vec![InlineKeyboardButton::callback(
            "🇨🇦 Canada (+1)",
            "select_country_CA",
        )],
        vec![InlineKeyboardButton::callback(
            "🇦🇺 Australia (+61)",
            "select_country_AU",
        )],
        vec![InlineKeyboardButton::callback(
            "🌍 Browse All Countries",
            "list_countries",
        )],
        vec![InlineKeyboardButton::callback("🔙 Back", "main_menu")],
    ])
}

/// One page of the country listing: a button per country plus navigation.
pub fn country_page(countries: &[CountryListing], page: usize) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    for country in page_slice(countries, page) {
        let emoji = country.emoji.as_deref().unwrap_or("🌐");
        let price = country
            .price
            .map(|p| format!("${}", p))
            .unwrap_or_else(|| "N/A".to_string());
        rows.push(vec![InlineKeyboardButton::callback(
            format!("{} {} - {}", emoji, country.country_name, price),
            format!("select_country_{}", country.country_code),
        )]);
    }

    let mut nav = Vec::new();
    if page > 0 {
        nav.push(InlineKeyboardButton::callback(
            "⬅️ Previous",
            format!("country_page_{}", page - 1),
        ));
    }
    if has_next_page(countries.len(), page) {
        nav.push(InlineKeyboardButton::callback(
            "Next ➡️",
            format!("country_page_{}", page + 1),
        ));
    }
    if !nav.is_empty() {
        rows.push(nav);
    }

    rows.push(vec![InlineKeyboardButton::callback(
        "🏠 Main Menu",
        "main_menu",
    )]);

    InlineKeyboardMarkup::new(rows)
}

/// The caller's numbers as buttons, capped at 5.
pub fn my_numbers(numbers: &[PurchasedNumber]) -> InlineKeyboardMarkup {
    let mut rows = Vec::new();

    for number in numbers.iter().take(5) {
        rows.push(vec![InlineKeyboardButton::callback(
            format!("📱 {}", number.phone_number),
            format!("view_sms_{}", number.number_id),
        )]);
    }

    rows.push(vec![InlineKeyboardButton::callback(
        "🔄 Refresh",
        "refresh_sms",
    )]);
    rows.push(vec![InlineKeyboardButton::callback(
        "🏠 Main Menu",
        "main_menu",
    )]);

    InlineKeyboardMarkup::new(rows)
}

pub fn sms_view(number_id: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            "🔄 Refresh",
            format!("view_sms_{}", number_id),
        )],
        vec![InlineKeyboardButton::callback("📱 My Numbers", "my_sms")],
        vec![InlineKeyboardButton::callback("🏠 Main Menu", "main_menu")],
    ])
}
