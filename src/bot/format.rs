//! Chat rendering of search results (MarkdownV2).

use crate::slots::{AvailableSlot, SlotQuery};
use crate::utils::datetime::{format_display_date, format_hhmm};
use crate::utils::markdown::{escape_markdown, link};

/// Telegram rejects messages above 4096 characters; keep clear of it.
pub const MAX_MESSAGE_LEN: usize = 4000;

pub const NO_RESULTS: &str = "No available slots found for the specified time and duration.";

pub fn format_slot(slot: &AvailableSlot) -> String {
    format!(
        "🏟️ *{}*\n⏰ {}\n📅 {}\n🔗 {}",
        escape_markdown(&slot.location_name),
        escape_markdown(&format!(
            "{} - {}",
            format_hhmm(&slot.start_time),
            format_hhmm(&slot.end_time)
        )),
        escape_markdown(&format_display_date(&slot.date)),
        link("Book now", &slot.booking_url),
    )
}

/// Header for the `/test` run, naming the single query searched.
pub fn query_header(query: &SlotQuery) -> String {
    format!(
        "*{}*",
        escape_markdown(&format!(
            "Available {}-hour slots for {} {}-{}:",
            format_hours(query.duration_hours),
            query.date.format("%Y-%m-%d"),
            format_hhmm(&query.start_time),
            format_hhmm(&query.end_time),
        ))
    )
}

pub fn default_header() -> String {
    "*Available slots:*".to_string()
}

/// One line per searched window, shown before scraping starts.
pub fn describe_queries(queries: &[SlotQuery]) -> String {
    queries
        .iter()
        .map(|q| {
            format!(
                "{} {}-{} ({}h)",
                format_display_date(&q.date),
                format_hhmm(&q.start_time),
                format_hhmm(&q.end_time),
                format_hours(q.duration_hours)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders `slots` under `header`, split into messages that fit Telegram's
/// size limit. Entries are never split across messages.
pub fn render_results(header: &str, slots: &[AvailableSlot]) -> Vec<String> {
    let mut messages = Vec::new();
    let mut current = format!("{header}\n\n");

    for slot in slots {
        let entry = format!("{}\n\n", format_slot(slot));
        if current.len() + entry.len() > MAX_MESSAGE_LEN && !current.trim().is_empty() {
            messages.push(current.trim_end().to_string());
            current = String::new();
        }
        current.push_str(&entry);
    }

    if !current.trim().is_empty() {
        messages.push(current.trim_end().to_string());
    }
    messages
}

fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{}", hours as i64)
    } else {
        format!("{hours}")
    }
}
