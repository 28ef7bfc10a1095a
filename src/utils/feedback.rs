use teloxide::prelude::*;

/// Feedback types for different command outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackType {
    Error,
    Info,
}

impl FeedbackType {
    pub fn emoji(self) -> &'static str {
        match self {
            FeedbackType::Error => "❌",
            FeedbackType::Info => "ℹ️",
        }
    }

    pub fn format(self, message: &str) -> String {
        format!("{} {}", self.emoji(), message)
    }
}

/// Plain-text replies with a leading status emoji.
pub struct CommandFeedback {
    bot: Bot,
    chat_id: ChatId,
}

impl CommandFeedback {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }

    pub async fn send(&self, feedback_type: FeedbackType, message: &str) -> ResponseResult<Message> {
        self.bot
            .send_message(self.chat_id, feedback_type.format(message))
            .await
    }

    pub async fn error(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Error, message).await
    }

    pub async fn info(&self, message: &str) -> ResponseResult<Message> {
        self.send(FeedbackType::Info, message).await
    }

    /// Send validation error with helpful suggestion
    pub async fn validation_error(&self, error: &str, suggestion: &str) -> ResponseResult<Message> {
        let message = format!("{error}\n\n💡 {suggestion}");
        self.send(FeedbackType::Error, &message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_type_emojis() {
        assert_eq!(FeedbackType::Error.emoji(), "❌");
        assert_eq!(FeedbackType::Info.emoji(), "ℹ️");
    }

    #[test]
    fn test_format_prefixes_emoji() {
        assert_eq!(
            FeedbackType::Error.format("No invitation yet"),
            "❌ No invitation yet"
        );
    }
}
