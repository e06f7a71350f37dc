use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Faction category printed on a role card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Faction {
    Werewolf,
    Villager,
    Loner,
    Ambiguous,
}

/// How a role relates to the pack.
///
/// Every wolf-alignment question goes through this instead of comparing role
/// ids: a `Fixed` wolf always hunts, the other two only once a conversion has
/// been recorded on the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WolfNature {
    /// Born into the pack.
    Fixed,
    /// Neutral card that may cross over through its own mechanic
    /// (wild child, wolf-dog).
    Convertible,
    /// Anyone else; only the infected father can turn them.
    Susceptible,
}

/// Every card known to the engine, in catalog declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum Role {
    Comedian,
    Thief,
    WolfDog,
    Cupid,
    Salvager,
    Seer,
    Fox,
    BearTamer,
    TwoSisters,
    ThreeBrothers,
    WildChild,
    SimpleWerewolf,
    BigBadWolf,
    InfectedFather,
    WhiteWolf,
    Witch,
    Raven,
    Piper,
    Pyromaniac,
    Hunter,
    Elder,
    Idiot,
    Scapegoat,
    RustyKnight,
    LittleGirl,
    StutteringJudge,
    Angel,
    DevotedServant,
    Scandalmonger,
    Gypsy,
    Confessor,
    BoneSetter,
    SchoolTeacher,
    SimpleVillager,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role id: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 34] = [
        Role::Comedian,
        Role::Thief,
        Role::WolfDog,
        Role::Cupid,
        Role::Salvager,
        Role::Seer,
        Role::Fox,
        Role::BearTamer,
        Role::TwoSisters,
        Role::ThreeBrothers,
        Role::WildChild,
        Role::SimpleWerewolf,
        Role::BigBadWolf,
        Role::InfectedFather,
        Role::WhiteWolf,
        Role::Witch,
        Role::Raven,
        Role::Piper,
        Role::Pyromaniac,
        Role::Hunter,
        Role::Elder,
        Role::Idiot,
        Role::Scapegoat,
        Role::RustyKnight,
        Role::LittleGirl,
        Role::StutteringJudge,
        Role::Angel,
        Role::DevotedServant,
        Role::Scandalmonger,
        Role::Gypsy,
        Role::Confessor,
        Role::BoneSetter,
        Role::SchoolTeacher,
        Role::SimpleVillager,
    ];

    /// The no-power card used to pad the deck.
    pub const BASELINE: Role = Role::SimpleVillager;

    pub const fn id(&self) -> &'static str {
        match self {
            Role::Comedian => "comedian",
            Role::Thief => "thief",
            Role::WolfDog => "wolf-dog",
            Role::Cupid => "cupid",
            Role::Salvager => "salvager",
            Role::Seer => "seer",
            Role::Fox => "fox",
            Role::BearTamer => "bear-tamer",
            Role::TwoSisters => "two-sisters",
            Role::ThreeBrothers => "three-brothers",
            Role::WildChild => "wild-child",
            Role::SimpleWerewolf => "simple-werewolf",
            Role::BigBadWolf => "big-bad-wolf",
            Role::InfectedFather => "infected-father",
            Role::WhiteWolf => "white-wolf",
            Role::Witch => "witch",
            Role::Raven => "raven",
            Role::Piper => "piper",
            Role::Pyromaniac => "pyromaniac",
            Role::Hunter => "hunter",
            Role::Elder => "elder",
            Role::Idiot => "idiot",
            Role::Scapegoat => "scapegoat",
            Role::RustyKnight => "rusty-knight",
            Role::LittleGirl => "little-girl",
            Role::StutteringJudge => "stuttering-judge",
            Role::Angel => "angel",
            Role::DevotedServant => "devoted-servant",
            Role::Scandalmonger => "scandalmonger",
            Role::Gypsy => "gypsy",
            Role::Confessor => "confessor",
            Role::BoneSetter => "bone-setter",
            Role::SchoolTeacher => "school-teacher",
            Role::SimpleVillager => "simple-villager",
        }
    }

    pub fn from_id(id: &str) -> Option<Role> {
        Role::ALL.iter().copied().find(|role| role.id() == id)
    }

    /// Resolves a configured id, falling back to the baseline villager for
    /// ids the engine does not know.
    pub fn from_id_or_baseline(id: &str) -> Role {
        Role::from_id(id).unwrap_or_else(|| {
            tracing::warn!("unknown role id '{}', treating it as {}", id, Role::BASELINE);
            Role::BASELINE
        })
    }

    pub const fn wolf_nature(&self) -> WolfNature {
        match self {
            Role::SimpleWerewolf | Role::BigBadWolf | Role::InfectedFather | Role::WhiteWolf => {
                WolfNature::Fixed
            }
            Role::WildChild | Role::WolfDog => WolfNature::Convertible,
            _ => WolfNature::Susceptible,
        }
    }

    /// Attackers without a wake step of their own: they act in the shared
    /// pack step.
    pub const fn hunts_with_pack(&self) -> bool {
        matches!(self, Role::SimpleWerewolf | Role::InfectedFather)
    }

    /// Wolf that wins alone when it is the last one standing.
    pub const fn is_lone_wolf(&self) -> bool {
        matches!(self, Role::WhiteWolf)
    }

    pub const fn resists_pack_attacks(&self) -> bool {
        matches!(self, Role::Elder)
    }

    /// Killing this role by vote, poison or gunshot curses the village.
    pub const fn curses_village_on_wrongful_death(&self) -> bool {
        matches!(self, Role::Elder)
    }

    /// Wounds the nearest wolf when the pack eats it.
    pub const fn marks_killer(&self) -> bool {
        matches!(self, Role::RustyKnight)
    }

    pub const fn survives_village_vote(&self) -> bool {
        matches!(self, Role::Idiot)
    }

    pub const fn fires_on_death(&self) -> bool {
        matches!(self, Role::Hunter)
    }

    /// Wins alone by dying on the very first turn.
    pub const fn wins_by_early_death(&self) -> bool {
        matches!(self, Role::Angel)
    }

    pub const fn takes_tie_break(&self) -> bool {
        matches!(self, Role::Scapegoat)
    }

    pub const fn is_turn_one_only(&self) -> bool {
        matches!(self, Role::Cupid | Role::WildChild | Role::WolfDog | Role::Thief)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_id(s).ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl From<String> for Role {
    fn from(id: String) -> Self {
        Role::from_id_or_baseline(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.id().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_ids_fall_back_to_the_baseline() {
        assert!("werebear".parse::<Role>().is_err());
        assert_eq!(Role::from_id_or_baseline("werebear"), Role::SimpleVillager);

        let role: Role = serde_json::from_str("\"werebear\"").unwrap();
        assert_eq!(role, Role::SimpleVillager);
    }

    #[test]
    fn serde_uses_kebab_case_ids() {
        assert_eq!(serde_json::to_string(&Role::BigBadWolf).unwrap(), "\"big-bad-wolf\"");
        let role: Role = serde_json::from_str("\"rusty-knight\"").unwrap();
        assert_eq!(role, Role::RustyKnight);
    }

    #[test]
    fn pack_membership() {
        assert_eq!(Role::WhiteWolf.wolf_nature(), WolfNature::Fixed);
        assert_eq!(Role::WolfDog.wolf_nature(), WolfNature::Convertible);
        assert_eq!(Role::Seer.wolf_nature(), WolfNature::Susceptible);
        assert!(Role::InfectedFather.hunts_with_pack());
        assert!(!Role::BigBadWolf.hunts_with_pack());
    }
}
