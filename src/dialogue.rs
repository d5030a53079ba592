//! Per-user conversation state for the guided admin workflows.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

/// Telegram photo captions top out at 1024 characters, and the record
/// description becomes the caption on lookup.
pub const MAX_DESCRIPTION_LEN: usize = 1024;

/// Progress through the one active workflow a user can have. `Idle` means
/// no workflow; every global command resets back to it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum ConversationState {
    #[default]
    Idle,
    /// create-record: waiting for the numeric id.
    AddAwaitingId,
    /// create-record: collecting photos. Append-only, submission order.
    AddAwaitingPhotos { cattle_id: i64, photos: Vec<String> },
    /// create-record: waiting for the free-text description.
    AddAwaitingDescription { cattle_id: i64, photos: Vec<String> },
    /// delete-record: waiting for the numeric id.
    DeleteAwaitingId,
}

impl ConversationState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationState::Idle)
    }
}

/// Type alias for the registry dialogue.
pub type RegistryDialogue = Dialogue<ConversationState, InMemStorage<ConversationState>>;

/// Validates a record description before it is committed.
pub fn validate_description(text: &str) -> Result<String, &'static str> {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return Err("empty");
    }

    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err("too_long");
    }

    Ok(trimmed.to_string())
}
