use super::{authoring, AuthoringDialogue, HandlerResult};
use crate::bot::views;
use crate::bot::BotContext;
use crate::invitation::{AuthoringInput, AuthoringState, GuestResponse, Rsvp};
use crate::utils::logging::{log_guest_rejected, log_unauthorized};
use teloxide::prelude::*;

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: AuthoringDialogue,
    state: AuthoringState,
    ctx: BotContext,
) -> HandlerResult {
    let user_id = q.from.id.0 as i64;
    let username = q.from.username.as_deref().unwrap_or("unknown");

    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id.clone())
            .text("Invalid callback data format")
            .await?;
        return Ok(());
    };

    tracing::info!(
        "Callback received: '{}' from user {} ({})",
        data,
        username,
        user_id
    );

    if let Some((inv_id, response)) = views::parse_rsvp_callback(&data) {
        return handle_rsvp(bot, &q, inv_id, response, &ctx).await;
    }

    let input = match classify_wizard_press(&data, ctx.is_admin(&q.from)) {
        WizardPress::Drive(input) => input,
        WizardPress::Unauthorized => {
            bot.answer_callback_query(q.id.clone()).await?;
            log_unauthorized(&data, username, user_id);
            return Ok(());
        }
        WizardPress::Unknown => {
            bot.answer_callback_query(q.id.clone())
                .text("Unknown action")
                .await?;
            return Ok(());
        }
    };

    bot.answer_callback_query(q.id.clone()).await?;

    let Some(chat_id) = q.message.as_ref().map(|m| m.chat().id) else {
        return Ok(());
    };

    authoring::apply(bot, chat_id, dialogue, state, input, &ctx).await
}

/// What a non-RSVP button press means for the authoring wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardPress {
    Drive(AuthoringInput),
    /// A wizard button pressed by someone other than the admin.
    Unauthorized,
    Unknown,
}

pub fn classify_wizard_press(data: &str, is_admin: bool) -> WizardPress {
    let input = match data {
        views::CREATE_TEXT => AuthoringInput::ChooseText,
        views::CREATE_PHOTO => AuthoringInput::ChoosePhoto,
        views::SKIP_VIDEO => AuthoringInput::SkipVideo,
        _ => return WizardPress::Unknown,
    };

    if is_admin {
        WizardPress::Drive(input)
    } else {
        WizardPress::Unauthorized
    }
}

async fn handle_rsvp(
    bot: Bot,
    q: &CallbackQuery,
    inv_id: &str,
    response: Rsvp,
    ctx: &BotContext,
) -> HandlerResult {
    let user_id = q.from.id.0 as i64;
    let guest = GuestResponse {
        response,
        username: q.from.username.clone(),
        name: q.from.first_name.clone(),
    };

    if let Err(e) = ctx.ledger.record(inv_id, user_id, guest.clone()).await {
        log_guest_rejected(inv_id, user_id, &e.to_string());
        bot.answer_callback_query(q.id.clone())
            .text(views::rsvp_rejected(&e))
            .show_alert(true)
            .await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id.clone())
        .text(views::rsvp_toast(response))
        .await?;

    let chat_id = match q.message.as_ref() {
        Some(message) => {
            // Removing the buttons is cosmetic; the answer is already stored.
            if let Err(e) = bot
                .edit_message_reply_markup(message.chat().id, message.id())
                .await
            {
                tracing::warn!("Failed to remove answer buttons for user {}: {}", user_id, e);
            }
            message.chat().id
        }
        None => ChatId::from(q.from.id),
    };

    bot.send_message(chat_id, views::rsvp_thanks(response))
        .await?;

    if let Err(e) = bot
        .send_message(ctx.admin_chat_id(), views::admin_notice(&guest))
        .await
    {
        tracing::error!("Failed to notify admin about response of {}: {}", user_id, e);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_drives_wizard_buttons() {
        assert_eq!(
            classify_wizard_press(views::CREATE_TEXT, true),
            WizardPress::Drive(AuthoringInput::ChooseText)
        );
        assert_eq!(
            classify_wizard_press(views::CREATE_PHOTO, true),
            WizardPress::Drive(AuthoringInput::ChoosePhoto)
        );
        assert_eq!(
            classify_wizard_press(views::SKIP_VIDEO, true),
            WizardPress::Drive(AuthoringInput::SkipVideo)
        );
    }

    #[test]
    fn test_guest_wizard_buttons_are_refused() {
        for data in [views::CREATE_TEXT, views::CREATE_PHOTO, views::SKIP_VIDEO] {
            assert_eq!(classify_wizard_press(data, false), WizardPress::Unauthorized);
        }
    }

    #[test]
    fn test_unknown_button() {
        assert_eq!(classify_wizard_press("delete_everything", true), WizardPress::Unknown);
        assert_eq!(classify_wizard_press("", false), WizardPress::Unknown);
    }
}
