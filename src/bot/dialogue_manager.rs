//! Step handlers for the two guided admin workflows.
//!
//! Each handler owns one conversation state. Input that does not match the
//! step's expected shape re-prompts in place and leaves accumulated draft
//! data untouched; only a completed commit or a global command resets the
//! state.

use anyhow::Result;
use sqlx::SqlitePool;
use teloxide::prelude::*;
use tracing::{debug, info};

use crate::db;
use crate::dialogue::{validate_description, ConversationState, RegistryDialogue};
use crate::localization::{t, t_args, Language};

use super::message_handler::parse_record_id;
use super::ui_builder::main_keyboard;

/// Route workflow input to the handler for the user's current state.
/// `Idle` never reaches this point; the router treats it separately.
pub async fn handle_workflow_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RegistryDialogue,
    pool: &SqlitePool,
    language: Language,
    state: ConversationState,
) -> Result<()> {
    match state {
        ConversationState::Idle => Ok(()),
        ConversationState::AddAwaitingId => {
            handle_add_id_input(bot, msg, dialogue, language).await
        }
        ConversationState::AddAwaitingPhotos { cattle_id, photos } => {
            handle_add_photos_input(bot, msg, dialogue, language, cattle_id, photos).await
        }
        ConversationState::AddAwaitingDescription { cattle_id, photos } => {
            handle_add_description_input(bot, msg, dialogue, pool, language, cattle_id, photos)
                .await
        }
        ConversationState::DeleteAwaitingId => {
            handle_delete_id_input(bot, msg, dialogue, pool, language).await
        }
    }
}

/// create-record: parse the numeric id and open an empty photo
/// accumulator.
async fn handle_add_id_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RegistryDialogue,
    language: Language,
) -> Result<()> {
    let Some(cattle_id) = msg.text().and_then(parse_record_id) else {
        bot.send_message(msg.chat.id, t(language, "id-must-be-number"))
            .await?;
        return Ok(());
    };

    dialogue
        .update(ConversationState::AddAwaitingPhotos {
            cattle_id,
            photos: Vec::new(),
        })
        .await?;

    bot.send_message(msg.chat.id, t(language, "send-photos"))
        .await?;
    Ok(())
}

/// create-record: accumulate photos silently until `/done`.
///
/// Albums arrive as a burst of separate photo messages, so acknowledging
/// each one would flood the chat; the accumulator just grows until the
/// admin finishes.
async fn handle_add_photos_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RegistryDialogue,
    language: Language,
    cattle_id: i64,
    mut photos: Vec<String>,
) -> Result<()> {
    if let Some(sizes) = msg.photo() {
        if let Some(largest) = sizes.last() {
            photos.push(largest.file.id.0.clone());
            debug!(cattle_id, photo_count = photos.len(), "Photo accumulated");
            dialogue
                .update(ConversationState::AddAwaitingPhotos { cattle_id, photos })
                .await?;
        }
        return Ok(());
    }

    if msg.text() == Some("/done") {
        if photos.is_empty() {
            bot.send_message(msg.chat.id, t(language, "invalid-photo"))
                .await?;
            return Ok(());
        }

        dialogue
            .update(ConversationState::AddAwaitingDescription { cattle_id, photos })
            .await?;
        bot.send_message(msg.chat.id, t(language, "send-description"))
            .await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, t(language, "invalid-photo"))
        .await?;
    Ok(())
}

/// create-record: commit the draft. The description upsert overwrites any
/// previous description for the id, while photos are appended next to the
/// ones already stored.
async fn handle_add_description_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RegistryDialogue,
    pool: &SqlitePool,
    language: Language,
    cattle_id: i64,
    photos: Vec<String>,
) -> Result<()> {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, t(language, "send-description"))
            .await?;
        return Ok(());
    };

    let description = match validate_description(text) {
        Ok(description) => description,
        Err("too_long") => {
            bot.send_message(msg.chat.id, t(language, "description-too-long"))
                .await?;
            return Ok(());
        }
        Err(_) => {
            bot.send_message(msg.chat.id, t(language, "send-description"))
                .await?;
            return Ok(());
        }
    };

    db::upsert_cattle(pool, cattle_id, &description).await?;
    for file_id in &photos {
        db::append_cattle_photo(pool, cattle_id, file_id).await?;
    }

    info!(cattle_id, photo_count = photos.len(), "Cattle record saved");

    bot.send_message(
        msg.chat.id,
        t_args(language, "cattle-saved", &[("id", &cattle_id.to_string())]),
    )
    .reply_markup(main_keyboard(language))
    .await?;

    dialogue.reset().await?;
    Ok(())
}

/// delete-record: parse the id, delete, and report hit or miss with
/// distinct messages. The state resets either way.
async fn handle_delete_id_input(
    bot: &Bot,
    msg: &Message,
    dialogue: RegistryDialogue,
    pool: &SqlitePool,
    language: Language,
) -> Result<()> {
    let Some(cattle_id) = msg.text().and_then(parse_record_id) else {
        bot.send_message(msg.chat.id, t(language, "id-must-be-number"))
            .await?;
        return Ok(());
    };

    let message = if db::delete_cattle(pool, cattle_id).await? {
        t_args(language, "cattle-deleted", &[("id", &cattle_id.to_string())])
    } else {
        t(language, "delete-not-found")
    };

    bot.send_message(msg.chat.id, message)
        .reply_markup(main_keyboard(language))
        .await?;

    dialogue.reset().await?;
    Ok(())
}
