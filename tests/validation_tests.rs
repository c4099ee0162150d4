use sport_slot_bot::utils::validation::*;

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_validate_search_text_valid() {
        assert_eq!(validate_search_text("tomorrow evening").unwrap(), "tomorrow evening");
        assert_eq!(validate_search_text("  friday 19:00-21:00  ").unwrap(), "friday 19:00-21:00");
        assert!(validate_search_text("abc").is_ok());
        assert!(validate_search_text(&"a".repeat(MAX_QUERY_LENGTH)).is_ok());
    }

    #[test]
    fn test_validate_search_text_invalid() {
        assert!(validate_search_text("").is_err());
        assert!(validate_search_text("   ").is_err());
        assert!(validate_search_text("hi").is_err());
        assert!(validate_search_text(&"a".repeat(MAX_QUERY_LENGTH + 1)).is_err());
        assert!(validate_search_text("/search friday").is_err());
    }

    #[test]
    fn test_validate_search_text_counts_characters() {
        // Multi-byte characters count once each.
        let text = "é".repeat(MAX_QUERY_LENGTH);
        assert!(validate_search_text(&text).is_ok());
    }

    #[test]
    fn test_validate_telegram_chat_id() {
        assert!(validate_telegram_chat_id(123456789).is_ok());
        assert!(validate_telegram_chat_id(-1001234567890).is_ok());
        assert!(validate_telegram_chat_id(0).is_err());
        assert!(validate_telegram_chat_id(-3000000000000).is_err());
    }

    #[test]
    fn test_looks_like_search_request() {
        assert!(looks_like_search_request("Any free slots tomorrow?"));
        assert!(looks_like_search_request("sporthal zaterdag"));
        assert!(looks_like_search_request("saturday 10:00-12:00"));
        assert!(!looks_like_search_request("hello there"));
        assert!(!looks_like_search_request("thanks!"));
    }
}
