use serde::{Deserialize, Serialize};

use crate::models::player::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Poison,
    WhiteWolf,
    SecondWolf,
    Tetanus,
    Werewolves,
    Arson,
    VillageVote,
    ReflexShot,
    TieBreak,
    Heartbreak,
    Unknown,
}

impl DeathCause {
    pub fn label(&self) -> &'static str {
        match self {
            DeathCause::Poison => "poisoned by the witch",
            DeathCause::WhiteWolf => "devoured by the white wolf",
            DeathCause::SecondWolf => "devoured by the big bad wolf",
            DeathCause::Tetanus => "died of tetanus",
            DeathCause::Werewolves => "devoured by the werewolves",
            DeathCause::Arson => "burned in their house",
            DeathCause::VillageVote => "eliminated by the village",
            DeathCause::ReflexShot => "shot by the hunter",
            DeathCause::TieBreak => "sacrificed on a tied vote",
            DeathCause::Heartbreak => "died of a broken heart",
            DeathCause::Unknown => "died",
        }
    }

    pub fn is_pack_attack(&self) -> bool {
        matches!(self, DeathCause::Werewolves | DeathCause::SecondWolf)
    }

    /// Causes that count as the village wrongly killing the elder.
    pub fn curses_elder(&self) -> bool {
        matches!(
            self,
            DeathCause::VillageVote | DeathCause::Poison | DeathCause::ReflexShot
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionContext {
    /// Dawn, resolving the night's victims.
    Morning,
    /// Dusk, resolving the day's elimination.
    Evening,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathReport {
    pub dead: Vec<PlayerId>,
    /// Elders who used up a life instead of dying.
    pub resisted: Vec<PlayerId>,
    /// Idiots spared by the vote.
    pub spared: Vec<PlayerId>,
    /// The cascade hit its ceiling and was cut short.
    pub runaway: bool,
    pub curse_triggered: bool,
    pub bear_growled: bool,
}
