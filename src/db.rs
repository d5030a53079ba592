//! SQLite persistence for livestock records, their photos, and user
//! profiles. Every operation is a single-row statement; SQLite serializes
//! conflicting writes, so the bot core needs no locking of its own.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tracing::{debug, info};

use crate::localization::Language;

/// A user's persisted profile. Both attributes start unset and are filled
/// in by the language-selection and contact-share handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub user_id: i64,
    pub language: Option<Language>,
    pub phone_number: Option<String>,
}

impl UserProfile {
    pub fn phone_verified(&self) -> bool {
        self.phone_number.is_some()
    }
}

/// Open (creating if missing) the SQLite database behind `database_url`.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("invalid database url: {database_url}"))?
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .context("failed to open database")
}

/// Create the schema if it does not exist yet.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    info!("Initializing database schema");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS cattle (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("failed to create cattle table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS cattle_photos (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            cattle_id INTEGER NOT NULL,
            file_id TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .context("failed to create cattle_photos table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY,
            language TEXT,
            phone_number TEXT
        )",
    )
    .execute(pool)
    .await
    .context("failed to create users table")?;

    Ok(())
}

/// Insert a record or replace its description. Photos already stored for
/// this id are left alone; re-adding an id appends to them.
pub async fn upsert_cattle(pool: &SqlitePool, id: i64, description: &str) -> Result<()> {
    debug!(cattle_id = id, "Upserting cattle record");

    sqlx::query(
        "INSERT INTO cattle (id, description) VALUES (?, ?)
         ON CONFLICT(id) DO UPDATE SET description = excluded.description",
    )
    .bind(id)
    .bind(description)
    .execute(pool)
    .await
    .context("failed to upsert cattle record")?;

    Ok(())
}

/// Fetch a record's description.
pub async fn get_cattle(pool: &SqlitePool, id: i64) -> Result<Option<String>> {
    sqlx::query_scalar("SELECT description FROM cattle WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("failed to read cattle record")
}

/// Delete a record and all of its photos. Returns whether the record
/// existed.
pub async fn delete_cattle(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM cattle WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete cattle record")?;

    sqlx::query("DELETE FROM cattle_photos WHERE cattle_id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("failed to delete cattle photos")?;

    let existed = result.rows_affected() > 0;
    info!(cattle_id = id, existed, "Cattle record deletion");
    Ok(existed)
}

/// Append one photo reference to a record. Insertion order is the order
/// photos are rendered in later.
pub async fn append_cattle_photo(pool: &SqlitePool, cattle_id: i64, file_id: &str) -> Result<()> {
    sqlx::query("INSERT INTO cattle_photos (cattle_id, file_id) VALUES (?, ?)")
        .bind(cattle_id)
        .bind(file_id)
        .execute(pool)
        .await
        .context("failed to append cattle photo")?;

    Ok(())
}

/// List a record's photo references in submission order.
pub async fn list_cattle_photos(pool: &SqlitePool, cattle_id: i64) -> Result<Vec<String>> {
    sqlx::query_scalar("SELECT file_id FROM cattle_photos WHERE cattle_id = ? ORDER BY id")
        .bind(cattle_id)
        .fetch_all(pool)
        .await
        .context("failed to list cattle photos")
}

/// Fetch a user's profile, if one exists yet.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<UserProfile>> {
    let row = sqlx::query("SELECT user_id, language, phone_number FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("failed to read user")?;

    Ok(row.map(|row| UserProfile {
        user_id: row.get("user_id"),
        language: row
            .get::<Option<String>, _>("language")
            .as_deref()
            .and_then(Language::from_code),
        phone_number: row.get("phone_number"),
    }))
}

/// Persist a user's language choice, creating the row on first contact.
/// The phone number column is untouched.
pub async fn set_user_language(pool: &SqlitePool, user_id: i64, language: Language) -> Result<()> {
    debug!(user_id, lang = language.code(), "Setting user language");

    sqlx::query(
        "INSERT INTO users (user_id, language) VALUES (?, ?)
         ON CONFLICT(user_id) DO UPDATE SET language = excluded.language",
    )
    .bind(user_id)
    .bind(language.code())
    .execute(pool)
    .await
    .context("failed to set user language")?;

    Ok(())
}

/// Persist a user's verified phone number. The language column is
/// untouched; a phone number is never cleared once set.
pub async fn set_user_phone(pool: &SqlitePool, user_id: i64, phone_number: &str) -> Result<()> {
    debug!(user_id, "Setting user phone number");

    sqlx::query(
        "INSERT INTO users (user_id, phone_number) VALUES (?, ?)
         ON CONFLICT(user_id) DO UPDATE SET phone_number = excluded.phone_number",
    )
    .bind(user_id)
    .bind(phone_number)
    .execute(pool)
    .await
    .context("failed to set user phone number")?;

    Ok(())
}
