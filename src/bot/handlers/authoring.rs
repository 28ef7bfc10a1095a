use super::{AuthoringDialogue, HandlerResult};
use crate::bot::commands::start::{send_invitation, show_admin_menu};
use crate::bot::views;
use crate::bot::BotContext;
use crate::invitation::{AuthoringInput, AuthoringState, Draft, Transition};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_admin_action, log_authoring_step};
use teloxide::dispatching::dialogue::InMemStorageError;
use teloxide::prelude::*;

/// Feeds one admin input into the wizard and answers in `chat_id`.
pub async fn apply(
    bot: Bot,
    chat_id: ChatId,
    dialogue: AuthoringDialogue,
    state: AuthoringState,
    input: AuthoringInput,
    ctx: &BotContext,
) -> HandlerResult {
    let admin_id = chat_id.0;
    let transition = state.advance(input);
    persist_transition(&dialogue, &transition).await?;

    match transition {
        Transition::Prompt(next) => {
            log_authoring_step(admin_id, step_name(&next));
            send_prompt(&bot, chat_id, &next).await?;
        }
        Transition::Rejected { state, reason } => {
            CommandFeedback::new(bot, chat_id)
                .validation_error(&reason, retry_hint(&state))
                .await?;
        }
        Transition::Finalize(draft) => {
            finalize(&bot, chat_id, draft, ctx).await?;
        }
        Transition::Cancelled => {
            log_admin_action("cancel", admin_id, None);
            CommandFeedback::new(bot.clone(), chat_id)
                .info("Invitation creation cancelled.")
                .await?;
            show_admin_menu(&bot, chat_id).await?;
        }
        Transition::Ignored => {}
    }

    Ok(())
}

/// Stores the step a transition leads to. Finalize and cancel leave the
/// admin idle; rejected and ignored input keep the current step.
pub async fn persist_transition(
    dialogue: &AuthoringDialogue,
    transition: &Transition,
) -> Result<(), InMemStorageError> {
    match transition {
        Transition::Prompt(next) => dialogue.update(next.clone()).await,
        Transition::Finalize(_) | Transition::Cancelled => dialogue.exit().await,
        Transition::Rejected { .. } | Transition::Ignored => Ok(()),
    }
}

async fn send_prompt(bot: &Bot, chat_id: ChatId, state: &AuthoringState) -> ResponseResult<()> {
    match state {
        AuthoringState::Idle => {}
        AuthoringState::ChooseType => {
            bot.send_message(chat_id, views::PROMPT_CHOOSE_TYPE)
                .reply_markup(views::type_choice_keyboard())
                .await?;
        }
        AuthoringState::EnterText => {
            bot.send_message(chat_id, views::prompt_enter_text()).await?;
        }
        AuthoringState::EnterPhoto => {
            bot.send_message(chat_id, views::PROMPT_ENTER_PHOTO).await?;
        }
        AuthoringState::EnterCaption { .. } => {
            bot.send_message(chat_id, views::prompt_enter_caption())
                .await?;
        }
        AuthoringState::EnterVideo { .. } => {
            bot.send_message(chat_id, views::PROMPT_ENTER_VIDEO)
                .reply_markup(views::skip_video_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn finalize(bot: &Bot, chat_id: ChatId, draft: Draft, ctx: &BotContext) -> ResponseResult<()> {
    let invitation = ctx.ledger.publish(draft).await;
    log_admin_action(
        "publish",
        chat_id.0,
        Some(&format!(
            "invitation {} (photo: {}, video: {})",
            invitation.inv_id,
            invitation.photo.is_some(),
            invitation.video_url.is_some()
        )),
    );

    // Preview exactly what guests will receive, then the share link.
    send_invitation(bot, chat_id, &invitation, None).await?;
    bot.send_message(
        chat_id,
        views::publication_summary(&invitation, &ctx.bot_username),
    )
    .reply_markup(views::admin_menu())
    .await?;

    Ok(())
}

fn retry_hint(state: &AuthoringState) -> &'static str {
    match state {
        AuthoringState::EnterVideo { .. } => {
            "Send a link like https://youtu.be/XXXXXXXXXXX or press Skip."
        }
        AuthoringState::EnterPhoto => "Send the picture as a photo, or /cancel.",
        AuthoringState::EnterCaption { .. } => {
            "Photo captions are limited to 1024 characters. Please send a shorter text."
        }
        _ => "Please send the invitation text again.",
    }
}

fn step_name(state: &AuthoringState) -> &'static str {
    match state {
        AuthoringState::Idle => "idle",
        AuthoringState::ChooseType => "choose_type",
        AuthoringState::EnterText => "enter_text",
        AuthoringState::EnterPhoto => "enter_photo",
        AuthoringState::EnterCaption { .. } => "enter_caption",
        AuthoringState::EnterVideo { .. } => "enter_video",
    }
}
