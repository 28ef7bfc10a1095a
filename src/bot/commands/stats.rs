use crate::bot::views::{self, MESSAGE_LIMIT};
use crate::bot::BotContext;
use crate::utils::feedback::CommandFeedback;
use teloxide::prelude::*;

pub async fn handle_stats(bot: Bot, chat_id: ChatId, ctx: &BotContext) -> ResponseResult<()> {
    let Some((invitation, tally)) = ctx.ledger.current_tally().await else {
        CommandFeedback::new(bot, chat_id)
            .info("There is no invitation yet.")
            .await?;
        return Ok(());
    };

    tracing::debug!(
        "Stats for invitation {}: {} yes, {} no",
        invitation.inv_id,
        tally.attending.len(),
        tally.declining.len()
    );

    let text = views::format_stats(&invitation, &tally);
    for chunk in views::split_message(&text, MESSAGE_LIMIT) {
        bot.send_message(chat_id, chunk).await?;
    }
    Ok(())
}
