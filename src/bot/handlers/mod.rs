pub mod general_message;
pub mod message;
pub mod query;

use teloxide::{
    dispatching::{dialogue::{self, InMemStorage}, UpdateHandler},
    prelude::*,
};
use crate::services::search::SearchService;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;
pub type SearchDialogue = Dialogue<State, InMemStorage<State>>;

/// Per-chat conversation state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    /// `/search` was sent; the next text message is the request.
    AwaitingQuery,
}

/// Whether a message text is a `/command`, known or not.
pub fn is_command_text(text: Option<&str>) -> bool {
    text.is_some_and(|t| t.trim_start().starts_with('/'))
}

#[derive(Clone)]
pub struct BotHandler {
    pub search: SearchService,
    pub test_command_path: String,
}

impl BotHandler {
    pub fn new(search: SearchService, test_command_path: impl Into<String>) -> Self {
        Self {
            search,
            test_command_path: test_command_path.into(),
        }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let commands = self.clone();
        let queries = self.search.clone();

        let command_branch = Update::filter_message()
            .filter_command::<crate::bot::commands::Command>()
            .endpoint(move |bot: Bot, msg: Message, cmd: crate::bot::commands::Command, dialogue: SearchDialogue| {
                let handler = commands.clone();
                async move { message::command_handler(bot, msg, cmd, dialogue, handler).await }
            });

        // Commands the command branch did not accept never count as a search
        // request, even while one is pending.
        let text_branch = Update::filter_message()
            .branch(
                dptree::filter(|msg: Message| is_command_text(msg.text())).endpoint(
                    |bot: Bot, msg: Message| async move {
                        general_message::handle_general_message(bot, msg).await
                    },
                ),
            )
            .branch(
                dptree::case![State::AwaitingQuery].endpoint(
                    move |bot: Bot, msg: Message, dialogue: SearchDialogue| {
                        let search = queries.clone();
                        async move { query::handle_query(bot, msg, dialogue, search).await }
                    },
                ),
            )
            .branch(dptree::endpoint(|bot: Bot, msg: Message| async move {
                general_message::handle_general_message(bot, msg).await
            }));

        dialogue::enter::<Update, InMemStorage<State>, State, _>()
            .branch(command_branch)
            .branch(text_branch)
    }
}
