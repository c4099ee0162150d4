use teloxide::prelude::*;
use crate::bot::commands::{self, Command};
use crate::bot::handlers::{BotHandler, HandlerResult, SearchDialogue, State};
use crate::utils::logging::log_command_start;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: SearchDialogue,
    handler: BotHandler,
) -> HandlerResult {
    let user = msg.from();
    let username = user.and_then(|u| u.username.as_deref()).unwrap_or("unknown");
    let user_id = user.map(|u| u.id.0 as i64).unwrap_or(0);
    log_command_start(&format!("{cmd:?}"), username, user_id, msg.chat.id.0, None);

    match cmd {
        Command::Start => {
            commands::start::handle_start(bot, msg).await?;
        }
        Command::Help => {
            commands::start::handle_help(bot, msg).await?;
        }
        Command::Search(text) => {
            commands::search::handle_search_command(bot, msg, text, dialogue, &handler.search).await?;
        }
        Command::Cancel => {
            dialogue.update(State::Idle).await?;
            bot.send_message(msg.chat.id, "Search cancelled.").await?;
        }
        Command::Settings => {
            commands::settings::handle_settings(bot, msg, &handler.search).await?;
        }
        Command::Test => {
            dialogue.update(State::Idle).await?;
            commands::test::handle_test(bot, msg, &handler.search, &handler.test_command_path).await?;
        }
    }
    Ok(())
}
