use crate::error::GameError;
use crate::models::game::{Game, GamePhase};
use crate::models::log::LogPhase;
use crate::models::night::{
    Action, ActionKind, Choice, Insight, NightEvent, StepKind, StepOutcome, WakeStep,
};
use crate::models::player::{ConversionCause, LoverLink, PlayerId};
use crate::models::role::Role;
use crate::utils::seating::living_neighbours;

#[derive(Debug, Clone, Copy)]
struct TargetRule {
    min: usize,
    max: usize,
    allow_self: bool,
    spare_wolves: bool,
    no_repeat: bool,
}

impl TargetRule {
    const fn single(allow_self: bool) -> Self {
        Self {
            min: 1,
            max: 1,
            allow_self,
            spare_wolves: false,
            no_repeat: false,
        }
    }
}

fn target_rule(step: &WakeStep) -> Option<TargetRule> {
    let role = step.role()?;
    let rule = match role {
        Role::Cupid => TargetRule {
            min: 2,
            max: 2,
            ..TargetRule::single(true)
        },
        Role::Seer | Role::Fox | Role::WildChild | Role::WhiteWolf | Role::Pyromaniac => {
            TargetRule::single(false)
        }
        Role::Salvager => TargetRule {
            no_repeat: true,
            ..TargetRule::single(true)
        },
        Role::SimpleWerewolf | Role::BigBadWolf => TargetRule {
            spare_wolves: true,
            ..TargetRule::single(false)
        },
        Role::Raven => TargetRule::single(true),
        Role::Piper => TargetRule {
            max: 2,
            ..TargetRule::single(false)
        },
        _ => return None,
    };
    Some(rule)
}

impl Game {
    /// Applies the moderator's input to the open wake step and advances the
    /// night. Nothing is mutated when the input is rejected.
    pub fn resolve_step(&mut self, action: Action) -> Result<StepOutcome, GameError> {
        self.require_phase("night", |p| matches!(p, GamePhase::Night))?;
        let step = self.current_step().ok_or(GameError::NoOpenStep)?;
        let actors = self.step_actors(&step);

        if actors.is_empty() && step.kind != StepKind::LoversRecognition {
            tracing::debug!("{:?} called with nobody awake, input discarded", step.kind);
            return Ok(self.complete_step(step, None));
        }

        let insight = match action {
            Action::Pass => None,
            Action::Targets(targets) if targets.is_empty() => None,
            Action::Targets(targets) => {
                self.validate_targets(&step, &actors, &targets)?;
                self.apply_targets(&step, targets)
            }
            Action::Choice(choice) => {
                self.apply_choice(&step, choice)?;
                None
            }
        };

        if step.is_pack() && self.night.little_girl_exposed {
            self.strike_little_girl();
        }

        Ok(self.complete_step(step, insight))
    }

    /// The little girl was caught peeking during the pack step. Their death is
    /// added when the step is confirmed.
    pub fn expose_little_girl(&mut self) -> Result<(), GameError> {
        self.require_phase("night", |p| matches!(p, GamePhase::Night))?;
        let step = self.current_step().ok_or(GameError::NoOpenStep)?;
        if !step.is_pack() {
            return Err(GameError::ChoiceNotAllowed);
        }
        if self.living_holders(Role::LittleGirl).next().is_none() {
            return Err(GameError::NoLivingHolder(Role::LittleGirl));
        }
        self.night.little_girl_exposed = true;
        Ok(())
    }

    fn strike_little_girl(&mut self) {
        let victims: Vec<PlayerId> = self
            .living_holders(Role::LittleGirl)
            .map(|p| p.id().clone())
            .collect();
        for victim in victims {
            self.night.record(NightEvent::new(
                Role::SimpleWerewolf,
                ActionKind::Kill,
                vec![victim.clone()],
            ));
            let label = self.label_of(&victim);
            self.add_log(
                LogPhase::Night,
                format!("{} was caught spying on the pack", label),
                Vec::new(),
                None,
            );
        }
    }

    fn validate_targets(
        &self,
        step: &WakeStep,
        actors: &[PlayerId],
        targets: &[PlayerId],
    ) -> Result<(), GameError> {
        let rule = target_rule(step).ok_or(GameError::TargetsNotAllowed)?;

        for (i, target) in targets.iter().enumerate() {
            if targets[..i].contains(target) {
                return Err(GameError::DuplicateTarget(target.clone()));
            }
        }
        if targets.len() < rule.min || targets.len() > rule.max {
            return Err(GameError::Cardinality {
                min: rule.min,
                max: rule.max,
                got: targets.len(),
            });
        }

        for target in targets {
            let player = self.require_living(target)?;
            if !rule.allow_self && actors.contains(target) {
                return Err(GameError::SelfTarget(target.clone()));
            }
            if rule.spare_wolves && player.is_wolf_aligned() {
                return Err(GameError::AlliedTarget(target.clone()));
            }
            if rule.no_repeat && self.last_protected.as_ref() == Some(target) {
                return Err(GameError::RepeatedProtection(target.clone()));
            }
        }
        Ok(())
    }

    fn apply_targets(&mut self, step: &WakeStep, targets: Vec<PlayerId>) -> Option<Insight> {
        let role = step.role()?;
        match role {
            Role::Cupid => {
                let group = self.next_lover_group();
                for target in &targets {
                    if let Some(player) = self.player_mut(target) {
                        player.lover = Some(LoverLink { group });
                    }
                }
                self.night.record(NightEvent::new(role, ActionKind::Link, targets));
                None
            }
            Role::Salvager => {
                self.night.record(NightEvent::new(role, ActionKind::Save, targets));
                None
            }
            Role::Seer => {
                let target = targets.first()?.clone();
                let insight = self.player(&target).map(|p| Insight::Role {
                    target: target.clone(),
                    role: p.role,
                    role_name: self.catalog.name(p.role).to_string(),
                    converted: p.conversion.is_some(),
                });
                self.night.record(NightEvent::new(role, ActionKind::Peek, targets));
                insight
            }
            Role::Fox => {
                let target = targets.first()?.clone();
                let wolf_found = self.sniff(&target);
                if !wolf_found {
                    for fox in self.players.iter_mut().filter(|p| p.role == Role::Fox) {
                        fox.power_lost = true;
                    }
                    self.add_log(LogPhase::Night, "The fox found no wolf and lost its power", Vec::new(), None);
                }
                self.night.record(NightEvent::new(role, ActionKind::Sniff, targets));
                Some(Insight::Scent { target, wolf_found })
            }
            Role::WildChild => {
                let model = targets.first()?.clone();
                for child in self
                    .players
                    .iter_mut()
                    .filter(|p| p.role == Role::WildChild && p.is_alive())
                {
                    child.role_model = Some(model.clone());
                }
                self.night.record(NightEvent::new(role, ActionKind::Transform, targets));
                None
            }
            Role::SimpleWerewolf | Role::BigBadWolf | Role::WhiteWolf => {
                self.night.record(NightEvent::new(role, ActionKind::Kill, targets));
                None
            }
            Role::Pyromaniac => {
                self.arson_used = true;
                self.night.record(NightEvent::new(role, ActionKind::Kill, targets));
                None
            }
            Role::Raven => {
                self.cursed = targets.first().cloned();
                self.night.record(NightEvent::new(role, ActionKind::Curse, targets));
                None
            }
            Role::Piper => {
                for target in &targets {
                    if let Some(player) = self.player_mut(target) {
                        player.charmed = true;
                    }
                }
                self.night.record(NightEvent::new(role, ActionKind::Charm, targets));
                None
            }
            _ => None,
        }
    }

    /// Target and its living neighbours: is any of them wolf-aligned?
    fn sniff(&self, target: &PlayerId) -> bool {
        let Some(index) = self.index_of(target) else {
            return false;
        };
        let (left, right) = living_neighbours(&self.players, index);
        [Some(index), left, right]
            .into_iter()
            .flatten()
            .any(|i| self.players[i].is_wolf_aligned())
    }

    fn apply_choice(&mut self, step: &WakeStep, choice: Choice) -> Result<(), GameError> {
        match (step.kind, choice) {
            (StepKind::Role(Role::Comedian), Choice::Impersonate(role)) => {
                if !self.comedian_pool.contains(&role) {
                    return Err(GameError::NotInPool(role));
                }
                self.night.comedian_pick = Some(role);
                tracing::debug!("comedian borrows {} tonight", role);
                Ok(())
            }
            (StepKind::Role(Role::WolfDog), Choice::BecomeWolf) => {
                let turn = self.turn;
                let mut converted = Vec::new();
                for dog in self
                    .players
                    .iter_mut()
                    .filter(|p| p.role == Role::WolfDog && p.is_alive())
                {
                    dog.convert(ConversionCause::ChoseThePack, turn);
                    converted.push(dog.id().clone());
                }
                self.night
                    .record(NightEvent::new(Role::WolfDog, ActionKind::Transform, converted));
                Ok(())
            }
            (StepKind::Role(Role::WolfDog), Choice::StayVillager) => Ok(()),
            (StepKind::Role(Role::Thief), Choice::TakeCard(role)) => {
                let slot = self
                    .undealt
                    .iter()
                    .position(|r| *r == role)
                    .ok_or(GameError::NotInPool(role))?;
                let thief = self
                    .players
                    .iter_mut()
                    .find(|p| p.role == Role::Thief && p.is_alive())
                    .ok_or(GameError::NoLivingHolder(Role::Thief))?;
                thief.role = role;
                self.undealt[slot] = Role::Thief;
                tracing::debug!("thief took the {} card", role);
                Ok(())
            }
            (StepKind::InfectDecision, Choice::Infect) => self.infect_pack_victim(),
            (StepKind::InfectDecision, Choice::Decline) => Ok(()),
            _ => Err(GameError::ChoiceNotAllowed),
        }
    }

    /// Replaces the pack's kill with an infection: the victim lives and
    /// joins the wolves.
    fn infect_pack_victim(&mut self) -> Result<(), GameError> {
        let slot = self
            .night
            .events
            .iter()
            .position(|e| e.is_pack_kill())
            .ok_or(GameError::NoVictimToInfect)?;
        let victim = self.night.events[slot]
            .targets
            .first()
            .cloned()
            .ok_or(GameError::NoVictimToInfect)?;

        self.night.events.remove(slot);
        self.night.record(NightEvent::new(
            Role::InfectedFather,
            ActionKind::Infect,
            vec![victim.clone()],
        ));
        let turn = self.turn;
        if let Some(player) = self.player_mut(&victim) {
            player.convert(ConversionCause::Infected, turn);
        }
        self.infect_used = true;
        self.add_log(
            LogPhase::Night,
            format!("{} was infected and joins the pack", self.label_of(&victim)),
            Vec::new(),
            None,
        );
        Ok(())
    }

    fn complete_step(&mut self, step: WakeStep, insight: Option<Insight>) -> StepOutcome {
        self.night.completed = Some(step.key);
        self.night.little_girl_exposed = false;

        let night_over = self.current_step().is_none();
        if night_over {
            self.end_night();
        }
        StepOutcome {
            step,
            insight,
            night_over,
        }
    }

    /// Matures deferred kills due this turn and hands over to the morning.
    pub(crate) fn end_night(&mut self) {
        let turn = self.turn;
        let mut due = Vec::new();
        for player in self.players.iter_mut() {
            if let Some(vengeance) = player.vengeance {
                if vengeance.matures_on_turn <= turn {
                    player.vengeance = None;
                    if player.is_alive() {
                        due.push((player.id().clone(), vengeance.source));
                    }
                }
            }
        }

        for (target, source) in due {
            self.night
                .record(NightEvent::new(source, ActionKind::Kill, vec![target.clone()]));
            self.add_log(
                LogPhase::Night,
                format!("{} succumbs to the wound left by the {}", self.label_of(&target), self.catalog.name(source)),
                Vec::new(),
                None,
            );
        }

        self.add_log(LogPhase::Night, format!("Night {} is over", turn), Vec::new(), None);
        self.phase = GamePhase::Morning;
    }
}
