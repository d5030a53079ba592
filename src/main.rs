use anyhow::Result;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use podabot::bot::{message_handler, set_bot_commands};
use podabot::config::AppConfig;
use podabot::db;
use podabot::dialogue::ConversationState;
use podabot::localization;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env()?);
    info!(admins = config.admin_ids.len(), "Starting livestock registry bot");

    // Fail fast on a broken message catalog.
    localization::init()?;

    let pool = db::connect(&config.database_url).await?;
    db::init_schema(&pool).await?;

    let bot = Bot::new(config.bot_token.clone());
    set_bot_commands(&bot).await?;

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<ConversationState>, ConversationState>()
        .endpoint(message_handler);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<ConversationState>::new(),
            pool,
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
