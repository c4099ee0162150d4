use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use crate::bot::commands::Command;
use crate::bot::handlers::HandlerResult;

/// Example requests shown by `/help` and `/search`.
pub const EXAMPLE_QUERIES: [&str; 3] = [
    "find all free slots 2 hours long this weekend in time range 10:00-15:00",
    "show available slots 1 hour long this weekend between 14:00-18:00",
    "2025-04-25 19:00-22:00 1.5h",
];

pub fn welcome_text(first_name: &str) -> String {
    format!(
        "Hi {first_name}! 👋\n\n\
        I can help you find free slots in sport halls.\n\
        Use /search to start searching for available slots, or\n\
        use /help to see all available commands."
    )
}

pub fn help_text() -> String {
    let mut text = Command::descriptions().to_string();
    text.push_str("\n\nExample requests:\n");
    for example in EXAMPLE_QUERIES {
        text.push_str(&format!("- {example}\n"));
    }
    text
}

pub async fn handle_start(bot: Bot, msg: Message) -> HandlerResult {
    let first_name = msg
        .from()
        .map(|u| u.first_name.clone())
        .unwrap_or_else(|| "there".to_string());

    bot.send_message(msg.chat.id, welcome_text(&first_name)).await?;
    Ok(())
}

pub async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, help_text()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_text_lists_commands_and_examples() {
        let text = help_text();
        for command in ["/start", "/help", "/search", "/cancel", "/settings", "/test"] {
            assert!(text.contains(command), "missing {command}");
        }
        assert!(text.contains("2025-04-25 19:00-22:00 1.5h"));
    }

    #[test]
    fn test_welcome_text() {
        assert!(welcome_text("Ada").starts_with("Hi Ada!"));
    }
}
