use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::bot::handlers::HandlerResult;
use crate::database::models::{ChatSearchStats, SearchRecord};
use crate::services::search::SearchService;
use crate::slots::{day_close, day_open};
use crate::utils::datetime::format_hhmm;
use crate::utils::feedback::CommandFeedback;
use crate::utils::markdown::escape_markdown;
use crate::utils::validation::validate_telegram_chat_id;

const RECENT_SEARCHES: i64 = 3;

/// Values shown by `/settings`.
#[derive(Debug, Clone)]
pub struct SettingsView {
    pub booking_site: String,
    pub sport_id: String,
    pub default_duration_hours: f64,
    pub model: String,
    pub stats: ChatSearchStats,
    pub recent: Vec<String>,
}

impl SettingsView {
    pub fn render(&self) -> String {
        let mut text = format!(
            "⚙️ *Search Settings*\n\n\
            🌐 Booking site: {}\n\
            🏐 Sport ID: {}\n\
            ⏱️ Default duration: {}\n\
            🕗 Bookable day: {}\n\
            🤖 Language model: {}\n\n\
            📊 *This chat*\n\
            • Searches: {}\n\
            • Slots found: {}\n\
            • Last search: {}",
            escape_markdown(&self.booking_site),
            escape_markdown(&self.sport_id),
            escape_markdown(&format!("{} hours", self.default_duration_hours)),
            escape_markdown(&format!("{}-{}", format_hhmm(&day_open()), format_hhmm(&day_close()))),
            escape_markdown(&self.model),
            self.stats.total_searches,
            self.stats.total_results,
            escape_markdown(self.stats.last_search_at.as_deref().unwrap_or("never")),
        );

        if !self.recent.is_empty() {
            text.push_str("\n\n🕘 *Recent requests*\n");
            for query in &self.recent {
                text.push_str(&format!("• {}\n", escape_markdown(query)));
            }
        }

        text.push_str("\n\n💡 Settings come from the bot's environment and are the same for every chat\\.");
        text
    }
}

pub async fn handle_settings(
    bot: Bot,
    msg: Message,
    search: &SearchService,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;

    if let Err(e) = validate_telegram_chat_id(chat_id) {
        bot.send_message(msg.chat.id, format!("❌ Invalid chat: {e}")).await?;
        return Ok(());
    }

    let pool = &search.db().pool;
    let stats = match SearchRecord::stats_for_chat(pool, chat_id).await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::warn!("Failed to load search stats for chat {}: {}", chat_id, e);
            CommandFeedback::new(bot.clone(), msg.chat.id)
                .warning("Search history is unavailable right now")
                .await?;
            ChatSearchStats::default()
        }
    };

    let recent = SearchRecord::find_recent_by_chat(pool, chat_id, RECENT_SEARCHES)
        .await
        .map(|records| records.into_iter().map(|r| r.query_text).collect())
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to load recent searches for chat {}: {}", chat_id, e);
            Vec::new()
        });

    let links = search.scraper().links();
    let view = SettingsView {
        booking_site: links.base_url().to_string(),
        sport_id: links.sport_id().to_string(),
        default_duration_hours: search.default_duration_hours(),
        model: search.interpreter().model().to_string(),
        stats,
        recent,
    };

    bot.send_message(msg.chat.id, view.render())
        .parse_mode(ParseMode::MarkdownV2)
        .disable_web_page_preview(true)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(recent: Vec<String>) -> SettingsView {
        SettingsView {
            booking_site: "https://www.antwerpen.be/nl/sportinfrastructuur".to_string(),
            sport_id: "2317".to_string(),
            default_duration_hours: 1.5,
            model: "gpt-3.5-turbo".to_string(),
            stats: ChatSearchStats {
                total_searches: 4,
                total_results: 12,
                last_search_at: None,
            },
            recent,
        }
    }

    #[test]
    fn test_render_settings() {
        let text = view(Vec::new()).render();
        assert!(text.contains("Sport ID: 2317"));
        assert!(text.contains("Default duration: 1\\.5 hours"));
        assert!(text.contains("Bookable day: 08:30\\-23:00"));
        assert!(text.contains("gpt\\-3\\.5\\-turbo"));
        assert!(text.contains("• Searches: 4"));
        assert!(text.contains("Last search: never"));
        assert!(!text.contains("Recent requests"));
    }

    #[test]
    fn test_render_recent_requests() {
        let text = view(vec!["tomorrow 18:00-21:00".to_string()]).render();
        assert!(text.contains("Recent requests"));
        assert!(text.contains("• tomorrow 18:00\\-21:00"));
    }
}
