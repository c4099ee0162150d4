use teloxide::prelude::*;
use crate::bot::handlers::{is_command_text, HandlerResult};
use crate::utils::feedback::CommandFeedback;
use crate::utils::validation::looks_like_search_request;

/// Free text outside a search. Unknown commands and search-like messages get
/// a hint; anything else is ignored to avoid noise in group chats.
pub async fn handle_general_message(bot: Bot, msg: Message) -> HandlerResult {
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    if let Some(text) = msg.text() {
        if is_command_text(Some(text)) {
            let command = text.split_whitespace().next().unwrap_or(text);
            let error_msg = format!("Unknown command: {command}");
            feedback
                .validation_error(&error_msg, "Use /help to see all available commands.")
                .await?;
        } else if looks_like_search_request(text) {
            feedback
                .info("Looking for a slot? Send /search first, or use /search followed by your request.")
                .await?;
        }
    }

    Ok(())
}
