use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fmt;

use crate::models::catalog::RoleCatalog;
use crate::models::role::Role;

/// Table-level switches. Everything has a default; `from_env` lets a
/// `.env` file override them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRules {
    pub elder_lives: u32,
    /// Upper bound on death-cascade iterations per batch.
    pub cascade_ceiling: usize,
    pub witch_potions_reusable: bool,
    /// Keep calling roles whose holders are all dead so the table can't
    /// tell. Switched off, their steps are left out of the night.
    pub call_dead_roles: bool,
    pub mayor_vote_weight: u32,
    pub raven_curse_votes: u32,
    pub verbose_logging: bool,
}

impl Default for HouseRules {
    fn default() -> Self {
        Self {
            elder_lives: 2,
            cascade_ceiling: 50,
            witch_potions_reusable: false,
            call_dead_roles: true,
            mayor_vote_weight: 2,
            raven_curse_votes: 2,
            verbose_logging: cfg!(debug_assertions),
        }
    }
}

impl HouseRules {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let elder_lives = env::var("WEREWOLF_ELDER_LIVES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.elder_lives);
        let cascade_ceiling = env::var("WEREWOLF_CASCADE_CEILING")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(defaults.cascade_ceiling);
        let witch_potions_reusable = env::var("WEREWOLF_WITCH_POTIONS_REUSABLE")
            .map(|v| v == "true")
            .unwrap_or(defaults.witch_potions_reusable);
        let call_dead_roles = env::var("WEREWOLF_CALL_DEAD_ROLES")
            .map(|v| v != "false")
            .unwrap_or(defaults.call_dead_roles);
        let mayor_vote_weight = env::var("WEREWOLF_MAYOR_VOTE_WEIGHT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.mayor_vote_weight);
        let raven_curse_votes = env::var("WEREWOLF_RAVEN_CURSE_VOTES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(defaults.raven_curse_votes);
        let verbose_logging = env::var("WEREWOLF_VERBOSE_LOGGING")
            .map(|v| v == "true")
            .unwrap_or(defaults.verbose_logging);

        Self {
            elder_lives,
            cascade_ceiling,
            witch_potions_reusable,
            call_dead_roles,
            mayor_vote_weight,
            raven_curse_votes,
            verbose_logging,
        }
    }
}

/// Role counts chosen before the deal, plus the comedian's set-aside cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setup {
    pub role_counts: BTreeMap<Role, u32>,
    #[serde(default)]
    pub comedian_pool: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupWarning {
    CapExceeded { role: Role, count: u32, cap: u32 },
    UnknownRole(Role),
    ComedianPoolSize { expected: usize, got: usize },
    PoolWithoutComedian,
    Overflow { cards: usize, seats: usize },
}

impl fmt::Display for SetupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupWarning::CapExceeded { role, count, cap } => {
                write!(f, "{} configured {} times, limit is {}", role, count, cap)
            }
            SetupWarning::UnknownRole(role) => {
                write!(f, "{} is missing from the catalog and is left out of the deck", role)
            }
            SetupWarning::ComedianPoolSize { expected, got } => {
                write!(f, "comedian pool holds {} roles, expected {}", got, expected)
            }
            SetupWarning::PoolWithoutComedian => {
                write!(f, "comedian pool configured but no comedian in play")
            }
            SetupWarning::Overflow { cards, seats } => {
                write!(f, "{} cards for {} seats, surplus stays undealt", cards, seats)
            }
        }
    }
}

pub const COMEDIAN_POOL_SIZE: usize = 3;

impl Setup {
    pub fn with_counts(counts: impl IntoIterator<Item = (Role, u32)>) -> Self {
        Self {
            role_counts: counts.into_iter().collect(),
            comedian_pool: Vec::new(),
        }
    }

    /// Physical cards the configured counts put in the deck.
    pub fn card_count(&self, catalog: &RoleCatalog) -> usize {
        self.role_counts
            .iter()
            .filter_map(|(role, count)| {
                catalog
                    .lookup(*role)
                    .map(|definition| (*count as usize) * definition.seat_weight as usize)
            })
            .sum()
    }

    /// Non-fatal problems with the configuration. The deal still proceeds.
    pub fn check(&self, catalog: &RoleCatalog, player_count: usize) -> Vec<SetupWarning> {
        let mut warnings = Vec::new();

        for (role, count) in self.role_counts.iter().filter(|(_, c)| **c > 0) {
            match catalog.lookup(*role) {
                Some(definition) => {
                    if let Some(cap) = definition.max_quantity {
                        if *count > cap {
                            warnings.push(SetupWarning::CapExceeded {
                                role: *role,
                                count: *count,
                                cap,
                            });
                        }
                    }
                }
                None => warnings.push(SetupWarning::UnknownRole(*role)),
            }
        }

        let has_comedian = self.role_counts.get(&Role::Comedian).copied().unwrap_or(0) > 0;
        if has_comedian && self.comedian_pool.len() != COMEDIAN_POOL_SIZE {
            warnings.push(SetupWarning::ComedianPoolSize {
                expected: COMEDIAN_POOL_SIZE,
                got: self.comedian_pool.len(),
            });
        }
        if !has_comedian && !self.comedian_pool.is_empty() {
            warnings.push(SetupWarning::PoolWithoutComedian);
        }

        let cards = self.card_count(catalog);
        if cards > player_count {
            warnings.push(SetupWarning::Overflow {
                cards,
                seats: player_count,
            });
        }

        warnings
    }
}
