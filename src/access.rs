//! Phone-verification and admin gating for inbound actions.
//!
//! Both checks are pure reads; the only path that verifies a phone is the
//! contact-share handler, and the admin set is fixed at startup.

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Everything a user can ask the bot to do, from the gate's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Start,
    ChooseLanguage,
    ShareContact,
    Lookup,
    AddCattle,
    DeleteCattle,
}

impl Action {
    /// Lookups and both admin workflows require a verified phone number.
    /// `/start`, language selection and the contact share itself must stay
    /// reachable before verification.
    pub fn requires_phone_verification(self) -> bool {
        matches!(self, Action::Lookup | Action::AddCattle | Action::DeleteCattle)
    }

    pub fn requires_admin(self) -> bool {
        matches!(self, Action::AddCattle | Action::DeleteCattle)
    }
}

/// Process-wide set of privileged Telegram user ids, parsed once from
/// configuration and immutable afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdminSet(HashSet<i64>);

impl AdminSet {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self(ids.into_iter().collect())
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.0.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for AdminSet {
    type Err = anyhow::Error;

    /// Parses a comma-separated id list; blank entries are skipped so a
    /// trailing comma or an empty variable is fine.
    fn from_str(s: &str) -> Result<Self> {
        let mut ids = HashSet::new();
        for entry in s.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let id: i64 = entry
                .parse()
                .with_context(|| format!("invalid admin id: {entry:?}"))?;
            ids.insert(id);
        }
        Ok(Self(ids))
    }
}

/// Outcome of gating one action for one user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allowed,
    /// Ask for the contact share before anything else; checked before the
    /// admin test even for admins.
    NeedsPhone,
    NotAuthorized,
}

/// Decide whether a user may perform an action right now.
pub fn check(admins: &AdminSet, action: Action, user_id: i64, phone_verified: bool) -> GateDecision {
    if action.requires_phone_verification() && !phone_verified {
        return GateDecision::NeedsPhone;
    }
    if action.requires_admin() && !admins.is_admin(user_id) {
        return GateDecision::NotAuthorized;
    }
    GateDecision::Allowed
}
