use anyhow::{anyhow, Result};

/// Longest search request accepted; longer texts are almost certainly pastes.
pub const MAX_QUERY_LENGTH: usize = 500;

pub fn validate_search_text(text: &str) -> Result<&str> {
    let text = text.trim();

    if text.is_empty() {
        return Err(anyhow!("Search request cannot be empty"));
    }

    if text.chars().count() < 3 {
        return Err(anyhow!("Search request is too short"));
    }

    if text.chars().count() > MAX_QUERY_LENGTH {
        return Err(anyhow!(
            "Search request cannot be longer than {} characters",
            MAX_QUERY_LENGTH
        ));
    }

    if text.starts_with('/') {
        return Err(anyhow!("Commands cannot be used as a search request"));
    }

    Ok(text)
}

pub fn validate_telegram_chat_id(chat_id: i64) -> Result<()> {
    // Telegram chat IDs should be non-zero
    if chat_id == 0 {
        return Err(anyhow!("Chat ID cannot be zero"));
    }

    // Supergroup IDs start around -1000000000000; anything far below is bogus
    if chat_id < -2000000000000 {
        return Err(anyhow!("Chat ID out of valid range"));
    }

    Ok(())
}

/// Heuristic for free text sent outside a search: mentions of slots,
/// halls or booking, or a bare time range.
pub fn looks_like_search_request(text: &str) -> bool {
    let lower = text.to_lowercase();
    const KEYWORDS: [&str; 8] = ["slot", "hall", "book", "free", "available", "court", "sporthal", "reserv"];

    KEYWORDS.iter().any(|k| lower.contains(k))
        || lower
            .split_whitespace()
            .any(|w| w.contains(':') && w.contains('-') && w.chars().any(|c| c.is_ascii_digit()))
}
