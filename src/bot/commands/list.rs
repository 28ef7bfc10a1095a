use crate::bot::views::{self, MESSAGE_LIMIT};
use crate::bot::BotContext;
use crate::utils::feedback::CommandFeedback;
use teloxide::prelude::*;

pub async fn handle_list(bot: Bot, chat_id: ChatId, ctx: &BotContext) -> ResponseResult<()> {
    let summaries = ctx.ledger.summaries().await;
    if summaries.is_empty() {
        CommandFeedback::new(bot, chat_id)
            .info("There are no invitations yet.")
            .await?;
        return Ok(());
    }

    let current_id = ctx.ledger.current().await.map(|inv| inv.inv_id);
    let text = views::format_invitation_list(&summaries, current_id.as_deref());
    for chunk in views::split_message(&text, MESSAGE_LIMIT) {
        bot.send_message(chat_id, chunk).await?;
    }
    Ok(())
}
