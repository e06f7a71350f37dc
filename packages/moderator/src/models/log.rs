use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::death::DeathCause;
use crate::models::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogPhase {
    Morning,
    Evening,
    Night,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub turn: u32,
    pub phase: LogPhase,
    pub message: String,
    #[serde(default)]
    pub dead: Vec<PlayerId>,
    #[serde(default)]
    pub cause: Option<DeathCause>,
    pub recorded_at: DateTime<Utc>,
}

/// Append-only audit trail of the game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vec<LogEntry>,
}

impl GameLog {
    pub fn push(
        &mut self,
        turn: u32,
        phase: LogPhase,
        message: impl Into<String>,
        dead: Vec<PlayerId>,
        cause: Option<DeathCause>,
    ) {
        let message = message.into();
        tracing::info!("[turn {} {:?}] {}", turn, phase, message);
        self.entries.push(LogEntry {
            turn,
            phase,
            message,
            dead,
            cause,
            recorded_at: Utc::now(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn deaths(&self) -> impl Iterator<Item = &PlayerId> {
        self.entries.iter().flat_map(|e| e.dead.iter())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
