//! Player data structure (league roster entry).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in fixtures and lookups).
pub type PlayerId = Uuid;

/// A player on a league roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Walk-on / board name, shown next to the real name.
    #[serde(default)]
    pub nickname: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new player with the given name and no nickname.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nickname: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        let nickname = nickname.into();
        let trimmed = nickname.trim();
        self.nickname = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    /// Name as shown in tables: `Name "Nickname"` when a nickname is set.
    pub fn display_name(&self) -> String {
        match &self.nickname {
            Some(nick) => format!("{} \"{}\"", self.name, nick),
            None => self.name.clone(),
        }
    }
}
