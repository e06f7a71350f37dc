use crate::error::GameError;
use crate::models::death::{DeathCause, DeathReport, ResolutionContext};
use crate::models::game::{Game, GamePhase, Resume};
use crate::models::log::LogPhase;
use crate::models::night::{ActionKind, NightEvent, NightState};
use crate::models::player::{PlayerId, VoteBan};
use crate::models::role::Role;
use crate::utils::seating::living_neighbours;

impl Game {
    pub fn begin_first_night(&mut self) -> Result<(), GameError> {
        self.require_phase("distribution", |p| matches!(p, GamePhase::Distribution))?;
        self.open_night();
        Ok(())
    }

    fn saved_tonight(&self, id: &PlayerId) -> bool {
        self.night.events.iter().any(|e| {
            matches!(e.kind, ActionKind::Save | ActionKind::WitchSave) && e.targets_player(id)
        })
    }

    /// Whether `event` still hits `id` after tonight's saves. A matured
    /// tetanus wound cannot be saved.
    pub(crate) fn kill_stands(&self, event: &NightEvent, id: &PlayerId) -> bool {
        event.actor.marks_killer() || !self.saved_tonight(id)
    }

    /// Everyone hit tonight and not saved, in ledger order.
    pub fn pending_victims(&self) -> Vec<PlayerId> {
        let mut victims: Vec<PlayerId> = Vec::new();
        for event in self
            .night
            .events
            .iter()
            .filter(|e| matches!(e.kind, ActionKind::Kill | ActionKind::WitchKill))
        {
            for target in &event.targets {
                if !victims.contains(target) && self.kill_stands(event, target) {
                    victims.push(target.clone());
                }
            }
        }
        victims
    }

    pub fn resolve_morning(&mut self) -> Result<DeathReport, GameError> {
        self.require_phase("morning", |p| matches!(p, GamePhase::Morning))?;
        let growled = self.bear_growls();
        let victims = self.pending_victims();
        if victims.is_empty() {
            self.add_log(LogPhase::Morning, "Nobody died tonight", Vec::new(), None);
        }
        let mut report = self.resolve_deaths(&victims, ResolutionContext::Morning, None);
        report.bear_growled = growled;
        Ok(report)
    }

    fn bear_growls(&mut self) -> bool {
        let growl = self
            .living_holders(Role::BearTamer)
            .filter(|tamer| tamer.has_power())
            .filter_map(|tamer| self.index_of(tamer.id()))
            .any(|index| {
                let (left, right) = living_neighbours(&self.players, index);
                [left, right]
                    .into_iter()
                    .flatten()
                    .any(|i| self.players[i].is_wolf_aligned())
            });
        if growl {
            self.add_log(LogPhase::Morning, "The bear growls", Vec::new(), None);
        }
        growl
    }

    /// The village eliminates `target`.
    pub fn vote_out(&mut self, target: &PlayerId) -> Result<DeathReport, GameError> {
        self.require_phase("day vote", |p| matches!(p, GamePhase::DayVote))?;
        self.require_living(target)?;
        Ok(self.resolve_deaths(std::slice::from_ref(target), ResolutionContext::Evening, None))
    }

    pub fn skip_vote(&mut self) -> Result<(), GameError> {
        self.require_phase("day vote", |p| matches!(p, GamePhase::DayVote))?;
        self.add_log(LogPhase::Evening, "The village spares everyone today", Vec::new(), None);
        self.start_next_night();
        Ok(())
    }

    /// A tied vote kills the scapegoat instead.
    pub fn tie_break(&mut self) -> Result<DeathReport, GameError> {
        self.require_phase("day vote", |p| matches!(p, GamePhase::DayVote))?;
        let scapegoat = self
            .living()
            .find(|p| p.role.takes_tie_break())
            .map(|p| p.id().clone())
            .ok_or(GameError::NoLivingHolder(Role::Scapegoat))?;
        Ok(self.resolve_deaths(&[scapegoat], ResolutionContext::Evening, Some(DeathCause::TieBreak)))
    }

    /// The dead hunter fires at `target`, or holds fire with `None`.
    pub fn reflex_shot(&mut self, target: Option<&PlayerId>) -> Result<DeathReport, GameError> {
        let (shooter, resume) = match &self.phase {
            GamePhase::ReflexShot { shooter, resume } => (shooter.clone(), *resume),
            other => {
                return Err(GameError::WrongPhase {
                    expected: "reflex shot",
                    actual: other.clone(),
                })
            }
        };

        let Some(target) = target else {
            self.add_log(
                LogPhase::Evening,
                format!("{} holds fire", self.label_of(&shooter)),
                Vec::new(),
                None,
            );
            self.enter(resume);
            return Ok(DeathReport::default());
        };

        self.require_living(target)?;
        let context = match resume {
            Resume::DayVote => ResolutionContext::Morning,
            Resume::NextNight | Resume::ScapegoatBan => ResolutionContext::Evening,
        };
        Ok(self.resolve_deaths_then(
            std::slice::from_ref(target),
            context,
            Some(DeathCause::ReflexShot),
            Some(resume),
        ))
    }

    /// The sacrificed scapegoat's decree: `banned` may not vote tomorrow.
    pub fn confirm_scapegoat_bans(&mut self, banned: &[PlayerId]) -> Result<(), GameError> {
        self.require_phase("scapegoat ban", |p| matches!(p, GamePhase::ScapegoatBan))?;
        for id in banned {
            self.require_living(id)?;
        }

        let day = self.turn + 1;
        for player in self.players.iter_mut().filter(|p| banned.contains(p.id())) {
            if player.vote_ban != Some(VoteBan::Permanent) {
                player.vote_ban = Some(VoteBan::ForDay(day));
            }
        }
        self.add_log(
            LogPhase::Evening,
            format!("The scapegoat bans {} player(s) from tomorrow's vote", banned.len()),
            Vec::new(),
            None,
        );
        self.start_next_night();
        Ok(())
    }

    pub fn appoint_mayor(&mut self, id: &PlayerId) -> Result<(), GameError> {
        self.require_living(id)?;
        for player in self.players.iter_mut() {
            player.mayor = player.id() == id;
        }
        self.mayor_vacancy = false;
        let phase = match self.phase {
            GamePhase::Night => LogPhase::Night,
            _ => LogPhase::Evening,
        };
        self.add_log(phase, format!("{} is the new mayor", self.label_of(id)), Vec::new(), None);
        Ok(())
    }

    /// Closes the day and opens the next night.
    pub fn start_next_night(&mut self) {
        if self.mayor_vacancy {
            tracing::warn!("night {} starts without a mayor", self.turn + 1);
        }
        self.last_protected = self
            .night
            .events
            .iter()
            .find(|e| e.kind == ActionKind::Save)
            .and_then(|e| e.targets.first().cloned());
        self.turn += 1;
        self.cursed = None;
        self.open_night();
    }

    fn open_night(&mut self) {
        self.night = NightState::default();
        self.phase = GamePhase::Night;
        self.add_log(LogPhase::Night, format!("Night {} begins", self.turn), Vec::new(), None);
        if self.current_step().is_none() {
            self.end_night();
        }
    }

    pub(crate) fn begin_day(&mut self) {
        let turn = self.turn;
        for player in self.players.iter_mut() {
            if matches!(player.vote_ban, Some(VoteBan::ForDay(day)) if day < turn) {
                player.vote_ban = None;
            }
        }
        self.phase = GamePhase::DayVote;
        tracing::debug!("day {} vote opens", turn);
    }

    pub(crate) fn enter(&mut self, next: Resume) {
        match next {
            Resume::DayVote => self.begin_day(),
            Resume::NextNight => self.start_next_night(),
            Resume::ScapegoatBan => self.phase = GamePhase::ScapegoatBan,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::night::Action;
    use crate::utils::test_setup::{game_with_roles, id};

    #[test]
    fn bear_growls_next_to_a_wolf() {
        let mut game = game_with_roles(&[
            Role::BearTamer,
            Role::SimpleWerewolf,
            Role::SimpleVillager,
            Role::SimpleVillager,
        ]);
        game.begin_first_night().unwrap();
        game.resolve_step(Action::Targets(vec![id(3)])).unwrap();
        let report = game.resolve_morning().unwrap();
        assert!(report.bear_growled);
        assert_eq!(report.dead, vec![id(3)]);
        assert_eq!(game.phase, GamePhase::DayVote);
    }

    #[test]
    fn salvager_cannot_protect_twice_in_a_row() {
        let mut game = game_with_roles(&[
            Role::Salvager,
            Role::SimpleWerewolf,
            Role::SimpleVillager,
            Role::SimpleVillager,
            Role::SimpleVillager,
        ]);
        game.begin_first_night().unwrap();
        game.resolve_step(Action::Targets(vec![id(3)])).unwrap();
        game.resolve_step(Action::Targets(vec![id(3)])).unwrap();
        let report = game.resolve_morning().unwrap();
        assert!(report.dead.is_empty());

        game.skip_vote().unwrap();
        assert_eq!(
            game.resolve_step(Action::Targets(vec![id(3)])),
            Err(GameError::RepeatedProtection(id(3)))
        );
        game.resolve_step(Action::Targets(vec![id(1)])).unwrap();
    }

    #[test]
    fn day_bans_clear_on_later_days() {
        let mut game = game_with_roles(&[Role::SimpleWerewolf, Role::SimpleVillager, Role::SimpleVillager]);
        game.players[1].vote_ban = Some(VoteBan::ForDay(1));
        game.players[2].vote_ban = Some(VoteBan::Permanent);
        game.turn = 2;
        game.begin_day();
        assert_eq!(game.players[1].vote_ban, None);
        assert_eq!(game.players[2].vote_ban, Some(VoteBan::Permanent));
    }

    #[test]
    fn mayor_is_unique() {
        let mut game = game_with_roles(&[Role::SimpleWerewolf, Role::SimpleVillager, Role::SimpleVillager]);
        game.appoint_mayor(&id(2)).unwrap();
        game.appoint_mayor(&id(3)).unwrap();
        assert_eq!(game.players.iter().filter(|p| p.mayor).count(), 1);
        assert_eq!(game.mayor().unwrap().id(), &id(3));
    }
}
