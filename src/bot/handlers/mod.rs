pub mod authoring;
pub mod callback;
pub mod message;

use crate::bot::commands::Command;
use crate::bot::BotContext;
use crate::invitation::AuthoringState;
use teloxide::{
    dispatching::{dialogue, dialogue::InMemStorage, UpdateHandler},
    prelude::*,
};

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;
pub type AuthoringStorage = InMemStorage<AuthoringState>;
pub type AuthoringDialogue = Dialogue<AuthoringState, AuthoringStorage>;

pub struct BotHandler {
    pub ctx: BotContext,
}

impl BotHandler {
    pub fn new(ctx: BotContext) -> Self {
        Self { ctx }
    }

    /// Update routing: commands first, then plain messages (admin menu and
    /// wizard input), then button presses. Requires an
    /// `Arc<AuthoringStorage>` among the dispatcher dependencies.
    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let ctx_command = self.ctx.clone();
        let ctx_message = self.ctx.clone();
        let ctx_callback = self.ctx.clone();

        dialogue::enter::<Update, AuthoringStorage, AuthoringState, _>()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(
                        move |bot: Bot,
                              msg: Message,
                              cmd: Command,
                              dialogue: AuthoringDialogue,
                              state: AuthoringState| {
                            let ctx = ctx_command.clone();
                            async move {
                                message::command_handler(bot, msg, cmd, dialogue, state, ctx).await
                            }
                        },
                    ),
            )
            .branch(Update::filter_message().endpoint(
                move |bot: Bot, msg: Message, dialogue: AuthoringDialogue, state: AuthoringState| {
                    let ctx = ctx_message.clone();
                    async move { message::message_handler(bot, msg, dialogue, state, ctx).await }
                },
            ))
            .branch(Update::filter_callback_query().endpoint(
                move |bot: Bot,
                      q: CallbackQuery,
                      dialogue: AuthoringDialogue,
                      state: AuthoringState| {
                    let ctx = ctx_callback.clone();
                    async move { callback::callback_handler(bot, q, dialogue, state, ctx).await }
                },
            ))
    }
}
