pub mod commands;
pub mod context;
pub mod handlers;
pub mod views;

pub use context::BotContext;
