//! Bot module for handling Telegram interactions
//!
//! Split into submodules:
//! - `message_handler`: fixed-precedence routing of every inbound message
//! - `dialogue_manager`: step handlers for the add/delete workflows
//! - `ui_builder`: reply keyboards and media-group assembly

pub mod dialogue_manager;
pub mod message_handler;
pub mod ui_builder;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::BotCommand;

use crate::localization::{t, Language};

pub use message_handler::{classify, message_handler, Route};

/// Register the command menu shown by Telegram clients. Descriptions are
/// bilingual because the menu is global, not per-user.
pub async fn set_bot_commands(bot: &Bot) -> Result<()> {
    let bilingual =
        |key: &str| format!("{} / {}", t(Language::Latin, key), t(Language::Cyrillic, key));

    bot.set_my_commands(vec![
        BotCommand::new("start", bilingual("cmd-start")),
        BotCommand::new("lang", bilingual("cmd-lang")),
        BotCommand::new("add", bilingual("cmd-add")),
        BotCommand::new("delete", bilingual("cmd-delete")),
    ])
    .await?;

    Ok(())
}
