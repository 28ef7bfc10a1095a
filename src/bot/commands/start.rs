use crate::bot::views;
use crate::bot::BotContext;
use crate::invitation::Invitation;
use crate::utils::validation::parse_invitation_payload;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, InlineKeyboardMarkup};

pub async fn show_admin_menu(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, "👨‍💼 Admin panel")
        .reply_markup(views::admin_menu())
        .await?;
    Ok(())
}

/// `/start` from a guest: shows the current invitation with the answer buttons.
pub async fn handle_guest_start(
    bot: Bot,
    msg: Message,
    payload: String,
    ctx: &BotContext,
) -> ResponseResult<()> {
    let user_id = msg.from.as_ref().map_or(0, |u| u.id.0 as i64);
    let current = ctx.ledger.current().await;

    if let Some(inv_id) = parse_invitation_payload(&payload) {
        tracing::info!("Guest {} opened deep link for invitation {}", user_id, inv_id);

        let linked = ctx.ledger.get(inv_id).await;
        if is_replaced_link(inv_id, current.as_ref(), linked.as_ref()) {
            bot.send_message(msg.chat.id, views::INVITATION_REPLACED)
                .await?;
        }
    }

    match current {
        Some(invitation) => {
            send_invitation(&bot, msg.chat.id, &invitation, Some(views::guest_keyboard(&invitation)))
                .await
        }
        None => {
            bot.send_message(msg.chat.id, "🎉 Hello! There is no invitation yet.")
                .await?;
            Ok(())
        }
    }
}

/// True when a deep link names a known invitation that is no longer the
/// current one. `linked` is the invitation looked up by `inv_id`.
pub fn is_replaced_link(
    inv_id: &str,
    current: Option<&Invitation>,
    linked: Option<&Invitation>,
) -> bool {
    match (current, linked) {
        (Some(current), Some(linked)) => linked.inv_id == inv_id && current.inv_id != inv_id,
        _ => false,
    }
}

/// Sends an invitation the way guests see it: a photo with caption, or text.
pub async fn send_invitation(
    bot: &Bot,
    chat_id: ChatId,
    invitation: &Invitation,
    keyboard: Option<InlineKeyboardMarkup>,
) -> ResponseResult<()> {
    match &invitation.photo {
        Some(photo) => {
            let request = bot
                .send_photo(chat_id, InputFile::file_id(FileId(photo.clone())))
                .caption(invitation.message.clone());
            match keyboard {
                Some(keyboard) => request.reply_markup(keyboard).await?,
                None => request.await?,
            };
        }
        None => {
            let request = bot.send_message(chat_id, invitation.message.clone());
            match keyboard {
                Some(keyboard) => request.reply_markup(keyboard).await?,
                None => request.await?,
            };
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn invitation(inv_id: &str) -> Invitation {
        Invitation {
            inv_id: inv_id.into(),
            message: "Party".into(),
            photo: None,
            video_url: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_old_link_is_replaced() {
        let old = invitation("1000");
        let current = invitation("2000");
        assert!(is_replaced_link("1000", Some(&current), Some(&old)));
    }

    #[test]
    fn test_current_link_is_not_replaced() {
        let current = invitation("2000");
        assert!(!is_replaced_link("2000", Some(&current), Some(&current)));
    }

    #[test]
    fn test_unknown_link_is_not_replaced() {
        let current = invitation("2000");
        assert!(!is_replaced_link("999", Some(&current), None));
    }

    #[test]
    fn test_link_without_current_invitation() {
        let old = invitation("1000");
        assert!(!is_replaced_link("1000", None, Some(&old)));
    }
}
