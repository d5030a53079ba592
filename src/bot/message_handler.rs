//! Fixed-precedence routing of every inbound message.
//!
//! Global commands are matched before the user's workflow state so nobody
//! can get stuck mid-workflow, and workflow state is matched before the
//! bare-number lookup rule so an id typed into a workflow stays in the
//! workflow. `classify` is the ordered rule list; the endpoint applies the
//! side effects for whichever rule fired.

use anyhow::Result;
use regex::Regex;
use sqlx::SqlitePool;
use std::sync::{Arc, LazyLock};
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, KeyboardRemove};
use tracing::{debug, warn};

use crate::access::{self, Action, GateDecision};
use crate::config::AppConfig;
use crate::db::{self, UserProfile};
use crate::dialogue::{ConversationState, RegistryDialogue};
use crate::localization::{t, Language};
use crate::transliterate::latin_to_cyrillic;

use super::dialogue_manager::handle_workflow_input;
use super::ui_builder::{contact_keyboard, language_keyboard, lookup_album, main_keyboard};

static NUMERIC_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("digit pattern is valid"));

/// Parse a bare record id: one or more digits and nothing else. Digit
/// strings that overflow `i64` yield `None`; no stored record can carry
/// such an id.
pub fn parse_record_id(text: &str) -> Option<i64> {
    if !NUMERIC_ID.is_match(text) {
        return None;
    }
    text.parse().ok()
}

/// What a single inbound message turned out to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Start,
    ChangeLanguage,
    SelectLanguage(Language),
    Contact,
    EnterAdd,
    EnterDelete,
    /// Forward to the step handler for the current conversation state.
    Workflow,
    Lookup(i64),
    Ignore,
}

/// Classify one message. Evaluated in a fixed order for every message
/// regardless of conversation state; earlier rules pre-empt later ones.
/// Payload shape (photo, sticker, voice, ...) never matters here: an
/// active workflow consumes any non-global message, and its step handler
/// decides between accepting and re-prompting.
pub fn classify(text: Option<&str>, has_contact: bool, in_workflow: bool) -> Route {
    if let Some(text) = text {
        // 1. /start always wins.
        if text == "/start" {
            return Route::Start;
        }

        // 2. Language change, as command or menu button in either script.
        if text == "/lang"
            || Language::ALL
                .iter()
                .any(|language| text == t(*language, "change-lang-btn"))
        {
            return Route::ChangeLanguage;
        }

        // 3. Selector labels, each compared in its own script's rendering
        // since the user may not have chosen a language yet.
        for language in Language::ALL {
            if text == t(language, "choose-lang-btn") {
                return Route::SelectLanguage(language);
            }
        }
    }

    // 4. Contact share, accepted in any state.
    if has_contact {
        return Route::Contact;
    }

    // 5. Workflow-entry commands (gated later by the endpoint).
    if text == Some("/add") {
        return Route::EnterAdd;
    }
    if text == Some("/delete") {
        return Route::EnterDelete;
    }

    // 6. An active workflow consumes everything else, including digits,
    // /done, and non-photo media; the step handlers re-prompt on input
    // that does not match the step's shape.
    if in_workflow {
        return Route::Workflow;
    }

    // 7. Bare numeric text is a lookup.
    if let Some(id) = text.and_then(parse_record_id) {
        return Route::Lookup(id);
    }

    // 8. Everything else falls through silently.
    Route::Ignore
}

/// Dispatcher endpoint for every incoming message.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: RegistryDialogue,
    pool: SqlitePool,
    config: Arc<AppConfig>,
) -> Result<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let user_id = from.id.0 as i64;

    let profile = db::get_user(&pool, user_id).await?;
    let language = profile
        .as_ref()
        .and_then(|profile| profile.language)
        .unwrap_or_default();
    let phone_verified = profile
        .as_ref()
        .is_some_and(UserProfile::phone_verified);
    let state = dialogue.get().await?.unwrap_or_default();

    let route = classify(msg.text(), msg.contact().is_some(), !state.is_idle());
    debug!(user_id, ?route, "Routing inbound message");

    match route {
        Route::Start => {
            dialogue.reset().await?;
            post_start(&bot, msg.chat.id, profile.as_ref()).await
        }

        Route::ChangeLanguage => {
            dialogue.reset().await?;
            bot.send_message(msg.chat.id, bilingual("welcome-select-lang"))
                .reply_markup(language_keyboard())
                .await?;
            Ok(())
        }

        Route::SelectLanguage(chosen) => {
            db::set_user_language(&pool, user_id, chosen).await?;
            dialogue.reset().await?;

            if phone_verified {
                bot.send_message(msg.chat.id, t(chosen, "lang-selected"))
                    .reply_markup(main_keyboard(chosen))
                    .await?;
                bot.send_message(msg.chat.id, t(chosen, "welcome-main"))
                    .await?;
            } else {
                bot.send_message(msg.chat.id, t(chosen, "lang-selected"))
                    .reply_markup(KeyboardRemove::new())
                    .await?;
                bot.send_message(msg.chat.id, t(chosen, "ask-phone"))
                    .reply_markup(contact_keyboard(chosen))
                    .await?;
            }
            Ok(())
        }

        Route::Contact => {
            if let Some(contact) = msg.contact() {
                db::set_user_phone(&pool, user_id, &contact.phone_number).await?;
                dialogue.reset().await?;
                bot.send_message(msg.chat.id, t(language, "welcome-main"))
                    .reply_markup(main_keyboard(language))
                    .await?;
            }
            Ok(())
        }

        Route::EnterAdd => {
            enter_workflow(
                &bot,
                &msg,
                &dialogue,
                &config,
                user_id,
                language,
                phone_verified,
                Action::AddCattle,
            )
            .await
        }

        Route::EnterDelete => {
            enter_workflow(
                &bot,
                &msg,
                &dialogue,
                &config,
                user_id,
                language,
                phone_verified,
                Action::DeleteCattle,
            )
            .await
        }

        Route::Workflow => {
            handle_workflow_input(&bot, &msg, dialogue, &pool, language, state).await
        }

        Route::Lookup(cattle_id) => {
            match access::check(&config.admin_ids, Action::Lookup, user_id, phone_verified) {
                GateDecision::NeedsPhone => {
                    bot.send_message(msg.chat.id, t(language, "ask-phone"))
                        .reply_markup(contact_keyboard(language))
                        .await?;
                    Ok(())
                }
                _ => send_cattle_card(&bot, msg.chat.id, &pool, language, cattle_id).await,
            }
        }

        Route::Ignore => Ok(()),
    }
}

/// Joint rendering of a prompt in both scripts, for users who have not
/// picked a language yet.
fn bilingual(key: &str) -> String {
    format!(
        "{}\n\n{}",
        t(Language::Latin, key),
        t(Language::Cyrillic, key)
    )
}

/// Shared branching after `/start` and after a language choice: first the
/// language, then the phone, then the main menu.
async fn post_start(bot: &Bot, chat_id: ChatId, profile: Option<&UserProfile>) -> Result<()> {
    match profile {
        None
        | Some(UserProfile {
            language: None, ..
        }) => {
            bot.send_message(chat_id, bilingual("welcome-select-lang"))
                .reply_markup(language_keyboard())
                .await?;
        }
        Some(profile) => {
            let language = profile.language.unwrap_or_default();
            if profile.phone_verified() {
                bot.send_message(chat_id, t(language, "welcome-main"))
                    .reply_markup(main_keyboard(language))
                    .await?;
            } else {
                bot.send_message(chat_id, t(language, "ask-phone"))
                    .reply_markup(contact_keyboard(language))
                    .await?;
            }
        }
    }
    Ok(())
}

/// Gate a workflow-entry command and, if allowed, create the workflow's
/// initial state. Refusal leaves the conversation state untouched.
#[allow(clippy::too_many_arguments)]
async fn enter_workflow(
    bot: &Bot,
    msg: &Message,
    dialogue: &RegistryDialogue,
    config: &AppConfig,
    user_id: i64,
    language: Language,
    phone_verified: bool,
    action: Action,
) -> Result<()> {
    match access::check(&config.admin_ids, action, user_id, phone_verified) {
        GateDecision::NeedsPhone => {
            bot.send_message(msg.chat.id, t(language, "ask-phone"))
                .reply_markup(contact_keyboard(language))
                .await?;
        }
        GateDecision::NotAuthorized => {
            warn!(user_id, ?action, "Non-admin attempted admin command");
            bot.send_message(msg.chat.id, t(language, "not-authorized"))
                .await?;
        }
        GateDecision::Allowed => {
            let (state, prompt) = match action {
                Action::DeleteCattle => (ConversationState::DeleteAwaitingId, "enter-delete-id"),
                _ => (ConversationState::AddAwaitingId, "enter-cattle-id"),
            };
            dialogue.update(state).await?;
            bot.send_message(msg.chat.id, t(language, prompt)).await?;
        }
    }
    Ok(())
}

/// Render a record lookup: description (transliterated for the Cyrillic
/// interface) plus zero, one, or many photos. With several photos the
/// description is attached only to the first one.
async fn send_cattle_card(
    bot: &Bot,
    chat_id: ChatId,
    pool: &SqlitePool,
    language: Language,
    cattle_id: i64,
) -> Result<()> {
    let Some(description) = db::get_cattle(pool, cattle_id).await? else {
        bot.send_message(chat_id, t(language, "cattle-not-found"))
            .await?;
        return Ok(());
    };

    let description = match language {
        Language::Cyrillic => latin_to_cyrillic(&description),
        Language::Latin => description,
    };

    let photos = db::list_cattle_photos(pool, cattle_id).await?;
    match photos.as_slice() {
        [] => {
            bot.send_message(chat_id, description).await?;
        }
        [only] => {
            bot.send_photo(chat_id, InputFile::file_id(FileId(only.clone())))
                .caption(description)
                .await?;
        }
        _ => {
            bot.send_media_group(chat_id, lookup_album(&photos, &description))
                .await?;
        }
    }
    Ok(())
}
