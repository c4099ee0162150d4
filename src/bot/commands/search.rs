use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::bot::commands::start::EXAMPLE_QUERIES;
use crate::bot::format::{default_header, describe_queries, render_results, NO_RESULTS};
use crate::bot::handlers::{HandlerResult, SearchDialogue, State};
use crate::services::search::SearchService;
use crate::utils::feedback::{CommandFeedback, ProgressTracker};
use crate::utils::logging::{log_command_error, log_command_success, log_validation_error};
use crate::utils::validation::validate_search_text;

pub fn search_prompt() -> String {
    let mut text = String::from("Please tell me what kind of slot you're looking for.\n\nFor example:\n");
    for example in EXAMPLE_QUERIES {
        text.push_str(&format!("- {example}\n"));
    }
    text.push_str("\nType /cancel to stop searching.");
    text
}

/// `/search` alone waits for the request; `/search <request>` runs it now.
pub async fn handle_search_command(
    bot: Bot,
    msg: Message,
    inline_text: String,
    dialogue: SearchDialogue,
    search: &SearchService,
) -> HandlerResult {
    if inline_text.trim().is_empty() {
        dialogue.update(State::AwaitingQuery).await?;
        bot.send_message(msg.chat.id, search_prompt()).await?;
        return Ok(());
    }

    dialogue.update(State::Idle).await?;
    run_search(&bot, &msg, &inline_text, search).await
}

/// Interprets `text`, scrapes the site and replies with the bookable windows.
pub async fn run_search(
    bot: &Bot,
    msg: &Message,
    text: &str,
    search: &SearchService,
) -> HandlerResult {
    let chat_id = msg.chat.id.0;
    let user_id = msg.from().map(|u| u.id.0 as i64).unwrap_or(0);
    let username = msg.from().and_then(|u| u.username.as_deref()).unwrap_or("unknown");
    let feedback = CommandFeedback::new(bot.clone(), msg.chat.id);

    let text = match validate_search_text(text) {
        Ok(text) => text,
        Err(e) => {
            log_validation_error("search", "request", &e.to_string(), user_id, chat_id);
            feedback
                .validation_error(&e.to_string(), "Describe a day and time range, e.g. \"tomorrow between 18:00 and 21:00\".")
                .await?;
            return Ok(());
        }
    };

    let mut progress = ProgressTracker::new(CommandFeedback::new(bot.clone(), msg.chat.id), 3);
    progress.start("Reading your request...").await?;

    let queries = match search.interpret(text).await {
        Ok(queries) => queries,
        Err(e) => {
            log_command_error("search", username, user_id, chat_id, &e.to_string());
            progress.error("Could not understand the request").await?;
            bot.send_message(msg.chat.id, format!("Error processing your query: {e}")).await?;
            return Ok(());
        }
    };

    progress
        .next_step(&format!(
            "Searching the booking site for:\n{}\n",
            describe_queries(&queries)
        ))
        .await?;

    let slots = search.search_and_record(chat_id, user_id, text, &queries).await;

    progress
        .complete(&format!("Search finished: {} slot(s) found", slots.len()))
        .await?;

    if slots.is_empty() {
        bot.send_message(msg.chat.id, NO_RESULTS).await?;
    } else {
        for part in render_results(&default_header(), &slots) {
            bot.send_message(msg.chat.id, part)
                .parse_mode(ParseMode::MarkdownV2)
                .disable_web_page_preview(true)
                .await?;
        }
    }

    log_command_success(
        "search",
        username,
        user_id,
        chat_id,
        Some(&format!("{} queries, {} slots", queries.len(), slots.len())),
    );
    Ok(())
}
