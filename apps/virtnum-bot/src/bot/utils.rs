//! Message text builders. All dynamic content is HTML-escaped here so
//! handlers can send the results with `ParseMode::Html` as-is.

use teloxide::utils::html;

use crate::models::number::PurchasedNumber;
use crate::services::session_service::total_pages;
use virtnum_provider::SmsMessage;

/// Messages rendered per number when viewing SMS.
pub const SMS_VIEW_LIMIT: usize = 10;

pub fn welcome_text(first_name: &str) -> String {
    format!(
        "🚀 <b>Welcome to Virtual Number Bot, {}!</b>\n\n\
         <b>Available Features:</b>\n\
         • 📱 Get virtual numbers from multiple countries\n\
         • 📨 Receive SMS messages on Telegram\n\
         • 🌍 100+ countries available\n\
         • ⚡ Real-time SMS forwarding\n\n\
         <b>Quick Commands:</b>\n\
         /start - Show this menu\n\
         /countries - Browse available countries\n\
         /purchase - Buy a new virtual number\n\
         /mysms - Check received SMS\n\
         /help - Get help information\n\n\
         Select an option below to get started:",
        html::escape(first_name)
    )
}

pub fn help_text() -> String {
    "🤖 <b>Virtual Number Bot - Help Guide</b>\n\n\
     <b>Available Commands:</b>\n\
     /start - Start the bot\n\
     /countries - Show all available countries\n\
     /purchase - Purchase a virtual number\n\
     /mysms - View received SMS\n\
     /active - View active numbers\n\
     /cancel - Cancel a virtual number\n\
     /help - Show this help message\n\n\
     <b>How It Works:</b>\n\
     1. Select a country from the list\n\
     2. Purchase a virtual number\n\
     3. Use the number for SMS verification\n\
     4. Receive SMS directly in Telegram\n\n\
     <b>Important Notes:</b>\n\
     • Numbers are rented and have expiration\n\
     • SMS forwarding may have a slight delay\n\
     • Some services may block virtual numbers\n\
     • Check country compatibility before purchase"
        .to_string()
}

pub fn purchase_menu_text() -> String {
    "🛒 <b>Purchase Virtual Number</b>\n\nSelect a country or browse all:".to_string()
}

pub fn countries_header(total: usize, page: usize) -> String {
    format!(
        "🌍 <b>Available Countries</b> ({} total)\n\
         Page {} of {}\n\n\
         Select a country to purchase a number:",
        total,
        page + 1,
        total_pages(total)
    )
}

pub fn purchase_success_text(number: &PurchasedNumber) -> String {
    format!(
        "✅ <b>Number Purchased Successfully!</b>\n\n\
         📱 <b>Number:</b> {}\n\
         🌍 <b>Country:</b> {}\n\
         🆔 <b>ID:</b> <code>{}</code>\n\n\
         <b>Instructions:</b>\n\
         1. Use this number for SMS verification\n\
         2. SMS will be forwarded here automatically\n\
         3. Use /mysms to check messages\n\
         4. Use /cancel {} to cancel\n\n\
         📨 SMS forwarding is now active!",
        html::escape(&number.phone_number),
        html::escape(&number.country_code),
        html::escape(&number.number_id),
        html::escape(&number.number_id),
    )
}

pub fn active_numbers_text(numbers: &[PurchasedNumber]) -> String {
    let mut text = "📱 <b>Your Active Numbers</b>\n\n".to_string();
    for number in numbers {
        text.push_str(&format!(
            "• <b>Number:</b> {}\n\
             \u{20}\u{20}<b>Country:</b> {}\n\
             \u{20}\u{20}<b>ID:</b> <code>{}</code>\n\
             \u{20}\u{20}<b>Since:</b> {}\n\n",
            html::escape(&number.phone_number),
            html::escape(&number.country_code),
            html::escape(&number.number_id),
            number.purchased_at.format("%Y-%m-%d"),
        ));
    }
    text.push_str("Use /cancel &lt;number_id&gt; to cancel a number.");
    text
}

pub fn sms_list_text(number_id: &str, messages: &[SmsMessage]) -> String {
    if messages.is_empty() {
        return format!("📭 No SMS messages found for {}", html::escape(number_id));
    }

    let mut text = format!("📨 <b>SMS Messages for {}</b>\n\n", html::escape(number_id));
    for sms in messages.iter().take(SMS_VIEW_LIMIT) {
        text.push_str(&format!(
            "<b>From:</b> {}\n\
             <b>Time:</b> {}\n\
             <b>Message:</b> {}\n\
             {}\n",
            html::escape(&sms.sender),
            sms.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            html::escape(&sms.message),
            "─".repeat(30),
        ));
    }
    text
}

/// Text pushed to the owner when the poller sees a new message.
pub fn forwarded_sms_text(number: &PurchasedNumber, sms: &SmsMessage) -> String {
    format!(
        "📨 <b>New SMS on {}</b>\n\n\
         <b>From:</b> {}\n\
         <b>Time:</b> {}\n\
         <b>Message:</b> {}",
        html::escape(&number.phone_number),
        html::escape(&sms.sender),
        sms.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        html::escape(&sms.message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::number::NumberStatus;
    use chrono::Utc;

    fn message(body: &str) -> SmsMessage {
        SmsMessage {
            sender: "Telegram".to_string(),
            message: body.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn sms_list_renders_at_most_ten_entries() {
        let messages: Vec<SmsMessage> = (0..15).map(|i| message(&format!("msg {}", i))).collect();
        let text = sms_list_text("123", &messages);

        assert!(text.contains("msg 0"));
        assert!(text.contains("msg 9"));
        assert!(!text.contains("msg 10"));
    }

    #[test]
    fn sms_list_has_an_empty_state() {
        let text = sms_list_text("123", &[]);
        assert!(text.contains("No SMS messages found"));
    }

    #[test]
    fn provider_text_is_html_escaped() {
        let mut sms = message("<script>alert(1)</script>");
        sms.sender = "a&b".to_string();
        let number = PurchasedNumber {
            number_id: "123".to_string(),
            owner: 1,
            country_code: "US".to_string(),
            phone_number: "+15550001111".to_string(),
            purchased_at: Utc::now(),
            status: NumberStatus::Active,
            last_forwarded: None,
        };

        let text = forwarded_sms_text(&number, &sms);
        assert!(text.contains("&lt;script&gt;"));
        assert!(text.contains("a&amp;b"));
    }

    #[test]
    fn countries_header_counts_pages() {
        let text = countries_header(25, 1);
        assert!(text.contains("(25 total)"));
        assert!(text.contains("Page 2 of 3"));
    }
}
