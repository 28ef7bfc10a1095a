use crate::invitation::InvitationLedger;
use std::sync::Arc;
use teloxide::types::{ChatId, User, UserId};

/// Everything the handlers need besides the bot itself.
#[derive(Clone)]
pub struct BotContext {
    pub admin_id: UserId,
    /// Used to build `t.me` share links.
    pub bot_username: String,
    pub ledger: Arc<InvitationLedger>,
}

impl BotContext {
    pub fn new(admin_id: u64, bot_username: String, ledger: Arc<InvitationLedger>) -> Self {
        Self {
            admin_id: UserId(admin_id),
            bot_username,
            ledger,
        }
    }

    pub fn is_admin(&self, user: &User) -> bool {
        user.id == self.admin_id
    }

    pub fn admin_chat_id(&self) -> ChatId {
        ChatId::from(self.admin_id)
    }
}
