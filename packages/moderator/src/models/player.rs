use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::role::{Role, WolfNature};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A seat at the table. The seat index never changes and defines who sits
/// next to whom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub seat: usize,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, seat: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            seat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerStatus {
    Alive,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionCause {
    /// Wild child whose model died.
    ModelDied,
    /// Wolf-dog that chose the pack.
    ChoseThePack,
    /// Victim of the infected father.
    Infected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub cause: ConversionCause,
    pub turn: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoverLink {
    pub group: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteBan {
    /// Scapegoat's decree for a single day.
    ForDay(u32),
    /// Village idiot after surviving the vote.
    Permanent,
}

/// Kill scheduled now that lands at the end of a later night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredVengeance {
    pub source: Role,
    pub matures_on_turn: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedPlayer {
    #[serde(flatten)]
    pub player: Player,
    pub role: Role,
    pub status: PlayerStatus,
    #[serde(default)]
    pub conversion: Option<Conversion>,
    #[serde(default)]
    pub power_lost: bool,
    #[serde(default)]
    pub lover: Option<LoverLink>,
    #[serde(default)]
    pub mayor: bool,
    #[serde(default)]
    pub vote_ban: Option<VoteBan>,
    #[serde(default)]
    pub role_model: Option<PlayerId>,
    #[serde(default)]
    pub vengeance: Option<DeferredVengeance>,
    #[serde(default)]
    pub charmed: bool,
}

impl AssignedPlayer {
    pub fn new(player: Player, role: Role) -> Self {
        Self {
            player,
            role,
            status: PlayerStatus::Alive,
            conversion: None,
            power_lost: false,
            lover: None,
            mayor: false,
            vote_ban: None,
            role_model: None,
            vengeance: None,
            charmed: false,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.player.id
    }

    pub fn seat(&self) -> usize {
        self.player.seat
    }

    pub fn is_alive(&self) -> bool {
        self.status == PlayerStatus::Alive
    }

    /// Hunts with the pack and counts as a wolf for victory.
    pub fn is_wolf_aligned(&self) -> bool {
        match self.role.wolf_nature() {
            WolfNature::Fixed => true,
            WolfNature::Convertible | WolfNature::Susceptible => self.conversion.is_some(),
        }
    }

    pub fn has_power(&self) -> bool {
        !self.power_lost
    }

    pub fn can_vote(&self, turn: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.vote_ban {
            Some(VoteBan::Permanent) => false,
            Some(VoteBan::ForDay(day)) => day != turn,
            None => true,
        }
    }

    pub fn is_lover_of(&self, other: &AssignedPlayer) -> bool {
        match (self.lover, other.lover) {
            (Some(a), Some(b)) => a.group == b.group && self.id() != other.id(),
            _ => false,
        }
    }

    pub fn convert(&mut self, cause: ConversionCause, turn: u32) {
        if self.conversion.is_none() {
            self.conversion = Some(Conversion { cause, turn });
        }
    }

    pub fn label(&self) -> String {
        format!("P{} {}", self.player.seat + 1, self.player.name)
    }
}
