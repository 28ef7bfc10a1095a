pub mod list;
pub mod start;
pub mod stats;

use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "RSVP bot commands:")]
pub enum Command {
    #[command(description = "Show the invitation")]
    Start(String),
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Create a new invitation (organiser only)")]
    New,
    #[command(description = "Show answers to the current invitation (organiser only)")]
    Stats,
    #[command(description = "List all invitations (organiser only)")]
    List,
    #[command(description = "Stop creating an invitation (organiser only)")]
    Cancel,
}

impl Command {
    pub fn requires_admin(&self) -> bool {
        matches!(
            self,
            Command::New | Command::Stats | Command::List | Command::Cancel
        )
    }

    pub fn allowed_for(&self, is_admin: bool) -> bool {
        is_admin || !self.requires_admin()
    }
}
