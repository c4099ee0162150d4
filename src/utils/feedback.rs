use teloxide::prelude::*;
use teloxide::types::{MessageId, ParseMode};
use crate::utils::markdown::escape_markdown;

/// Feedback types for different command outcomes
#[derive(Debug, Clone)]
pub enum FeedbackType {
    Success,
    Warning,
    Error,
    Info,
    Processing,
}

impl FeedbackType {
    fn emoji(&self) -> &'static str {
        match self {
            FeedbackType::Success => "✅",
            FeedbackType::Warning => "⚠️",
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
            FeedbackType::Processing => "⏳",
        }
    }
}

/// Formats a plain-text feedback line as escaped MarkdownV2.
pub fn format_feedback(feedback_type: &FeedbackType, message: &str) -> String {
    format!("{} {}", feedback_type.emoji(), escape_markdown(message))
}

/// Centralized feedback system for bot commands
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    /// Send immediate feedback message
    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, format_feedback(&feedback_type, message))
            .parse_mode(ParseMode::MarkdownV2)
            .await
    }

    /// Update an existing message with new feedback
    pub async fn update_message(
        &self,
        message_id: MessageId,
        feedback_type: FeedbackType,
        message: &str,
    ) -> ResponseResult<Message> {
        self.bot
            .edit_message_text(self.chat_id, message_id, format_feedback(&feedback_type, message))
            .parse_mode(ParseMode::MarkdownV2)
            .await
    }

    pub async fn warning(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Warning, message).await
    }

    pub async fn info(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Info, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn validation_error(&self, error: &str, suggestion: &str) -> ResponseResult<Message> {
        let message = format!("{error}\n\n💡 Suggestion: {suggestion}");
        self.send(FeedbackType::Error, &message).await
    }
}

/// Progress tracker for multi-step operations.
///
/// The search takes several seconds per date; one message is edited in place
/// as the steps advance.
pub struct ProgressTracker {
    feedback: CommandFeedback,
    message_id: Option<MessageId>,
    total_steps: u32,
    current_step: u32,
}

impl ProgressTracker {
    pub fn new(feedback: CommandFeedback, total_steps: u32) -> Self {
        Self {
            feedback,
            message_id: None,
            total_steps,
            current_step: 0,
        }
    }

    pub async fn start(&mut self, initial_message: &str) -> ResponseResult<()> {
        let progress_message = format!("{} (1/{})", initial_message, self.total_steps);
        let message = self.feedback.send(FeedbackType::Processing, &progress_message).await?;
        self.message_id = Some(message.id);
        self.current_step = 1;
        Ok(())
    }

    pub async fn next_step(&mut self, step_message: &str) -> ResponseResult<()> {
        if let Some(message_id) = self.message_id {
            self.current_step += 1;
            let progress_message = format!("{} ({}/{})", step_message, self.current_step, self.total_steps);
            self.feedback.update_message(message_id, FeedbackType::Processing, &progress_message).await?;
        }
        Ok(())
    }

    pub async fn complete(&mut self, completion_message: &str) -> ResponseResult<()> {
        if let Some(message_id) = self.message_id {
            self.feedback.update_message(message_id, FeedbackType::Success, completion_message).await?;
        }
        Ok(())
    }

    pub async fn error(&mut self, error_message: &str) -> ResponseResult<()> {
        if let Some(message_id) = self.message_id {
            self.feedback.update_message(message_id, FeedbackType::Error, error_message).await?;
        }
        Ok(())
    }
}
