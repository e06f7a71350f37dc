use serde::{Deserialize, Serialize};

use crate::error::GameError;
use crate::models::catalog::RoleCatalog;
use crate::models::config::HouseRules;
use crate::models::death::DeathCause;
use crate::models::log::{GameLog, LogPhase};
use crate::models::night::NightState;
use crate::models::player::{AssignedPlayer, Player, PlayerId};
use crate::models::role::Role;
use crate::models::victory::VictoryRecord;
use crate::models::witch::WitchInventory;

/// Where the flow continues once an interrupting sub-phase is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resume {
    DayVote,
    NextNight,
    ScapegoatBan,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase")]
pub enum GamePhase {
    Distribution,
    Night,
    Morning,
    DayVote,
    /// A dead hunter fires before anything else happens.
    ReflexShot { shooter: PlayerId, resume: Resume },
    /// The sacrificed scapegoat picks who may vote tomorrow.
    ScapegoatBan,
    Victory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadCounts {
    pub alive: usize,
    pub dead: usize,
    pub wolves: usize,
    pub others: usize,
}

/// Full state of one game. Players are stored in seat order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub catalog: RoleCatalog,
    pub rules: HouseRules,
    pub players: Vec<AssignedPlayer>,
    pub phase: GamePhase,
    pub turn: u32,
    pub log: GameLog,
    pub night: NightState,
    pub witch: WitchInventory,
    pub elder_lives: u32,
    pub infect_used: bool,
    pub arson_used: bool,
    /// Salvager's target of the previous night.
    pub last_protected: Option<PlayerId>,
    /// Raven's target for the coming vote.
    pub cursed: Option<PlayerId>,
    pub comedian_pool: Vec<Role>,
    pub undealt: Vec<Role>,
    pub mayor_vacancy: bool,
    pub suggested: Option<VictoryRecord>,
    pub winner: Option<VictoryRecord>,
    pub lover_groups: u32,
}

impl Game {
    /// Seats `roster` with `roles` in order. Cards beyond the roster stay in
    /// the undealt pile; missing cards are baseline villagers.
    pub fn with_roles(
        roster: Vec<Player>,
        mut roles: Vec<Role>,
        comedian_pool: Vec<Role>,
        catalog: RoleCatalog,
        rules: HouseRules,
    ) -> Self {
        let seats = roster.len();
        while roles.len() < seats {
            roles.push(Role::BASELINE);
        }
        let undealt = roles.split_off(seats);

        let players = roster
            .into_iter()
            .enumerate()
            .zip(roles)
            .map(|((seat, mut player), role)| {
                player.seat = seat;
                AssignedPlayer::new(player, role)
            })
            .collect();

        Self {
            catalog,
            elder_lives: rules.elder_lives,
            rules,
            players,
            phase: GamePhase::Distribution,
            turn: 1,
            log: GameLog::default(),
            night: NightState::default(),
            witch: WitchInventory::default(),
            infect_used: false,
            arson_used: false,
            last_protected: None,
            cursed: None,
            comedian_pool,
            undealt,
            mayor_vacancy: false,
            suggested: None,
            winner: None,
            lover_groups: 0,
        }
    }

    pub fn player(&self, id: &PlayerId) -> Option<&AssignedPlayer> {
        self.players.iter().find(|p| p.id() == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut AssignedPlayer> {
        self.players.iter_mut().find(|p| p.id() == id)
    }

    pub fn index_of(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id() == id)
    }

    pub fn require_player(&self, id: &PlayerId) -> Result<&AssignedPlayer, GameError> {
        self.player(id)
            .ok_or_else(|| GameError::UnknownPlayer(id.clone()))
    }

    pub fn require_living(&self, id: &PlayerId) -> Result<&AssignedPlayer, GameError> {
        let player = self.require_player(id)?;
        if !player.is_alive() {
            return Err(GameError::DeadTarget(id.clone()));
        }
        Ok(player)
    }

    pub fn living(&self) -> impl Iterator<Item = &AssignedPlayer> {
        self.players.iter().filter(|p| p.is_alive())
    }

    pub fn living_holders(&self, role: Role) -> impl Iterator<Item = &AssignedPlayer> {
        self.living().filter(move |p| p.role == role)
    }

    /// Whether anyone, alive or dead, holds the card.
    pub fn is_dealt(&self, role: Role) -> bool {
        self.players.iter().any(|p| p.role == role)
    }

    pub fn require_phase(
        &self,
        expected: &'static str,
        matches: impl Fn(&GamePhase) -> bool,
    ) -> Result<(), GameError> {
        if matches(&self.phase) {
            Ok(())
        } else {
            Err(GameError::WrongPhase {
                expected,
                actual: self.phase.clone(),
            })
        }
    }

    pub fn add_log(
        &mut self,
        phase: LogPhase,
        message: impl Into<String>,
        dead: Vec<PlayerId>,
        cause: Option<DeathCause>,
    ) {
        self.log.push(self.turn, phase, message, dead, cause);
    }

    pub fn head_counts(&self) -> HeadCounts {
        let alive = self.living().count();
        let wolves = self.living().filter(|p| p.is_wolf_aligned()).count();
        HeadCounts {
            alive,
            dead: self.players.len() - alive,
            wolves,
            others: alive - wolves,
        }
    }

    /// Scans the log for the death of anyone who is wolf-aligned.
    pub fn wolf_ever_died(&self) -> bool {
        self.log
            .deaths()
            .filter_map(|id| self.player(id))
            .any(|p| p.is_wolf_aligned())
    }

    pub fn mayor(&self) -> Option<&AssignedPlayer> {
        self.living().find(|p| p.mayor)
    }

    pub fn label_of(&self, id: &PlayerId) -> String {
        self.player(id)
            .map(|p| p.label())
            .unwrap_or_else(|| id.to_string())
    }

    pub(crate) fn next_lover_group(&mut self) -> u32 {
        self.lover_groups += 1;
        self.lover_groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_setup::{game_with_roles, id};

    #[test]
    fn with_roles_keeps_surplus_undealt() {
        let roster = crate::utils::test_setup::roster(2);
        let game = Game::with_roles(
            roster,
            vec![Role::Seer, Role::Witch, Role::Hunter],
            Vec::new(),
            RoleCatalog::standard().clone(),
            HouseRules::default(),
        );
        assert_eq!(game.players.len(), 2);
        assert_eq!(game.undealt, vec![Role::Hunter]);
        assert_eq!(game.players[1].seat(), 1);
        assert_eq!(game.elder_lives, 2);
    }

    #[test]
    fn head_counts_follow_alignment() {
        let mut game = game_with_roles(&[Role::SimpleWerewolf, Role::Seer, Role::SimpleVillager]);
        game.player_mut(&id(2)).unwrap().status = crate::models::player::PlayerStatus::Dead;
        let counts = game.head_counts();
        assert_eq!(counts.alive, 2);
        assert_eq!(counts.wolves, 1);
        assert_eq!(counts.others, 1);
        assert_eq!(counts.dead, 1);
    }
}
