use super::{authoring, AuthoringDialogue, HandlerResult};
use crate::bot::commands::{list, start, stats, Command};
use crate::bot::views;
use crate::bot::BotContext;
use crate::invitation::{AuthoringInput, AuthoringState};
use crate::utils::feedback::CommandFeedback;
use crate::utils::logging::{log_admin_action, log_unauthorized};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: AuthoringDialogue,
    state: AuthoringState,
    ctx: BotContext,
) -> HandlerResult {
    let Some(user) = msg.from.clone() else {
        return Ok(());
    };
    let is_admin = ctx.is_admin(&user);
    let user_id = user.id.0 as i64;

    if !cmd.allowed_for(is_admin) {
        log_unauthorized(&format!("{cmd:?}"), &user.first_name, user_id);
        CommandFeedback::new(bot, msg.chat.id)
            .error("This command is only available to the organiser.")
            .await?;
        return Ok(());
    }

    match cmd {
        Command::Start(payload) => {
            if is_admin {
                log_admin_action("start", user_id, None);
                start::show_admin_menu(&bot, msg.chat.id).await?;
            } else {
                start::handle_guest_start(bot, msg, payload, &ctx).await?;
            }
        }
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
        }
        Command::New => {
            authoring::apply(bot, msg.chat.id, dialogue, state, AuthoringInput::Begin, &ctx)
                .await?;
        }
        Command::Stats => {
            stats::handle_stats(bot, msg.chat.id, &ctx).await?;
        }
        Command::List => {
            list::handle_list(bot, msg.chat.id, &ctx).await?;
        }
        Command::Cancel => {
            if state.is_idle() {
                CommandFeedback::new(bot, msg.chat.id)
                    .info("Nothing to cancel.")
                    .await?;
            } else {
                authoring::apply(bot, msg.chat.id, dialogue, state, AuthoringInput::Cancel, &ctx)
                    .await?;
            }
        }
    }

    Ok(())
}

/// Plain messages. Only the admin's messages matter: menu buttons, wizard
/// text and the invitation photo. Guests' messages are ignored.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: AuthoringDialogue,
    state: AuthoringState,
    ctx: BotContext,
) -> HandlerResult {
    let Some(user) = msg.from.as_ref() else {
        return Ok(());
    };
    if !ctx.is_admin(user) {
        return Ok(());
    }

    if let Some(text) = msg.text() {
        match text {
            views::MENU_CREATE => {
                authoring::apply(bot, msg.chat.id, dialogue, state, AuthoringInput::Begin, &ctx)
                    .await?;
            }
            views::MENU_STATS => stats::handle_stats(bot, msg.chat.id, &ctx).await?,
            views::MENU_LIST => list::handle_list(bot, msg.chat.id, &ctx).await?,
            _ => {
                let input = AuthoringInput::Text(text.to_string());
                authoring::apply(bot, msg.chat.id, dialogue, state, input, &ctx).await?;
            }
        }
        return Ok(());
    }

    // Telegram lists photo sizes smallest first.
    if let Some(largest) = msg.photo().and_then(|sizes| sizes.last()) {
        let input = AuthoringInput::Photo(largest.file.id.0.clone());
        authoring::apply(bot, msg.chat.id, dialogue, state, input, &ctx).await?;
    }

    Ok(())
}
