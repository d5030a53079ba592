//! Process configuration, loaded once from the environment at startup.

use std::env;

use anyhow::{Context, Result};

use crate::access::AdminSet;

const DEFAULT_DATABASE_URL: &str = "sqlite://podabot.db";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub bot_token: String,
    pub database_url: String,
    pub admin_ids: AdminSet,
}

impl AppConfig {
    /// Read configuration from the environment. `.env` loading is the
    /// caller's job; this only looks at the process environment.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let admin_ids = env::var("ADMIN_IDS")
            .unwrap_or_default()
            .parse()
            .context("ADMIN_IDS must be a comma-separated list of user ids")?;

        Ok(Self {
            bot_token,
            database_url,
            admin_ids,
        })
    }
}
