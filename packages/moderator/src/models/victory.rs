use serde::{Deserialize, Serialize};

use crate::models::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VictoryKind {
    Village,
    Werewolves,
    Lovers,
    Solo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VictoryRecord {
    pub kind: VictoryKind,
    pub label: String,
    pub survivors: Vec<PlayerId>,
}

impl VictoryRecord {
    pub fn new(kind: VictoryKind, label: impl Into<String>, survivors: Vec<PlayerId>) -> Self {
        Self {
            kind,
            label: label.into(),
            survivors,
        }
    }
}
