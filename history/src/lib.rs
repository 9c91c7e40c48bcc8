//! # history
//!
//! Bounded per-user conversation window. Each user maps to an ordered sequence
//! of role-prefixed turns; appending past the cap evicts the oldest turn (FIFO).
//! Nothing is persisted; the window is lost on restart.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Returned by [`ConversationHistory::format`] when a user has no recorded turns.
pub const NO_HISTORY_SENTINEL: &str = "No messages found for this user.";

/// Role attribution for one recorded turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRole {
    /// A message the user sent.
    User,
    /// A response the AI produced.
    System,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::System => "system",
        }
    }
}

type TurnMap = HashMap<u64, VecDeque<String>>;

/// In-memory rolling conversation window, one bounded sequence per user.
///
/// A `max_turns` of 0 disables the store entirely: `append` records nothing and
/// every request runs single-turn. The cap is enforced structurally — the deque
/// is popped from the front whenever a push takes it over `max_turns`.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    turns: Arc<RwLock<TurnMap>>,
    max_turns: usize,
}

impl ConversationHistory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: Arc::new(RwLock::new(TurnMap::new())),
            max_turns,
        }
    }

    /// False when the window size is 0 and history is bypassed globally.
    pub fn is_enabled(&self) -> bool {
        self.max_turns > 0
    }

    /// Appends `"{role}: {text}"` to the user's sequence, creating it if absent.
    /// Evicts the oldest turn when the sequence would exceed the cap. No-op when
    /// history is disabled.
    pub async fn append(&self, user_id: u64, text: &str, role: TurnRole) {
        if !self.is_enabled() {
            return;
        }
        let prefixed = format!("{}: {}", role.as_str(), text);
        let mut turns = self.turns.write().await;
        let sequence = turns.entry(user_id).or_default();
        sequence.push_back(prefixed);
        if sequence.len() > self.max_turns {
            sequence.pop_front();
        }
        info!(
            user_id = user_id,
            role = role.as_str(),
            turn_count = sequence.len(),
            "Recorded conversation turn"
        );
    }

    /// All of the user's turns joined by a blank line, in insertion order, or
    /// the no-messages sentinel when the user has none.
    pub async fn format(&self, user_id: u64) -> String {
        let turns = self.turns.read().await;
        match turns.get(&user_id) {
            Some(sequence) if !sequence.is_empty() => {
                sequence.iter().cloned().collect::<Vec<_>>().join("\n\n")
            }
            _ => NO_HISTORY_SENTINEL.to_string(),
        }
    }

    /// Removes the user's entire sequence. Idempotent.
    pub async fn reset(&self, user_id: u64) {
        let mut turns = self.turns.write().await;
        let removed = turns.remove(&user_id).is_some();
        info!(user_id = user_id, removed = removed, "History reset");
    }

    /// Number of turns currently recorded for the user.
    pub async fn len(&self, user_id: u64) -> usize {
        let turns = self.turns.read().await;
        turns.get(&user_id).map(VecDeque::len).unwrap_or(0)
    }

    pub async fn is_empty(&self, user_id: u64) -> bool {
        self.len(user_id).await == 0
    }
}
