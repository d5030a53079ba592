//! # Podabot
//!
//! A bilingual Telegram bot for a livestock registry. Users look up
//! records by numeric id; administrators register and remove records
//! through guided multi-step dialogues, gated behind phone verification.

pub mod access;
pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod localization;
pub mod transliterate;
