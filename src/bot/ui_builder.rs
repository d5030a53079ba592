//! UI Builder module for reply keyboards and lookup media groups.

use teloxide::types::{
    ButtonRequest, FileId, InputFile, InputMedia, InputMediaPhoto, KeyboardButton, KeyboardMarkup,
};

use crate::localization::{t, Language};

/// One-time keyboard offering both script selector labels, each rendered
/// in its own script.
pub fn language_keyboard() -> KeyboardMarkup {
    let rows = Language::ALL
        .iter()
        .map(|language| vec![KeyboardButton::new(t(*language, "choose-lang-btn"))])
        .collect::<Vec<_>>();

    KeyboardMarkup::new(rows)
        .resize_keyboard()
        .one_time_keyboard()
}

/// One-time keyboard with the contact-share button.
pub fn contact_keyboard(language: Language) -> KeyboardMarkup {
    let button =
        KeyboardButton::new(t(language, "share-contact-btn")).request(ButtonRequest::Contact);

    KeyboardMarkup::new(vec![vec![button]])
        .resize_keyboard()
        .one_time_keyboard()
}

/// Persistent main menu; lookups are plain text, so the only button is
/// the language switch.
pub fn main_keyboard(language: Language) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![KeyboardButton::new(t(language, "change-lang-btn"))]])
        .resize_keyboard()
}

/// Build the media group for a multi-photo lookup. The description rides
/// as the caption of the first photo only; Telegram shows it under the
/// whole album.
pub fn lookup_album(photos: &[String], caption: &str) -> Vec<InputMedia> {
    photos
        .iter()
        .enumerate()
        .map(|(index, file_id)| {
            let mut photo = InputMediaPhoto::new(InputFile::file_id(FileId(file_id.clone())));
            if index == 0 {
                photo = photo.caption(caption.to_string());
            }
            InputMedia::Photo(photo)
        })
        .collect()
}
