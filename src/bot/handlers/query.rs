use teloxide::prelude::*;
use crate::bot::commands::search::run_search;
use crate::bot::handlers::{HandlerResult, SearchDialogue, State};
use crate::services::search::SearchService;

/// Text received while a search is pending. The dialogue returns to idle
/// whatever the outcome.
pub async fn handle_query(
    bot: Bot,
    msg: Message,
    dialogue: SearchDialogue,
    search: SearchService,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please describe the slot you're looking for as text, or /cancel.")
            .await?;
        return Ok(());
    };

    dialogue.update(State::Idle).await?;
    run_search(&bot, &msg, text, &search).await
}
