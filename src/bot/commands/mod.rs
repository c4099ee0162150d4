pub mod search;
pub mod settings;
pub mod start;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Sport slot finder commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Search for free slots, optionally with the request inline")]
    Search(String),
    #[command(description = "Cancel the current search")]
    Cancel,
    #[command(description = "Show the active search settings")]
    Settings,
    #[command(description = "Run the predefined test search")]
    Test,
}
