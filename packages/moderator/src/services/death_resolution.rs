//! Death resolution.
//!
//! A batch starts from the candidate ids and walks a bounded queue: each
//! death may pull a lover in behind it. Statuses are only committed once the
//! queue is drained, so every rule inside the batch sees the table as it was
//! when the batch began.

use std::collections::VecDeque;

use crate::models::death::{DeathCause, DeathReport, ResolutionContext};
use crate::models::game::{Game, GamePhase, Resume};
use crate::models::log::LogPhase;
use crate::models::night::{ActionKind, NightEvent};
use crate::models::player::{ConversionCause, DeferredVengeance, PlayerId, PlayerStatus, VoteBan};
use crate::models::role::{Faction, Role};
use crate::models::victory::{VictoryKind, VictoryRecord};
use crate::utils::seating::next_clockwise;

impl ResolutionContext {
    fn log_phase(&self) -> LogPhase {
        match self {
            ResolutionContext::Morning => LogPhase::Morning,
            ResolutionContext::Evening => LogPhase::Evening,
        }
    }
}

impl Game {
    fn hit_by(&self, id: &PlayerId, accept: impl Fn(&NightEvent) -> bool) -> bool {
        self.night
            .events
            .iter()
            .any(|e| accept(e) && e.targets_player(id) && self.kill_stands(e, id))
    }

    /// Why `id` is dying, read from tonight's ledger in the morning and from
    /// the vote in the evening.
    pub fn attribute_cause(&self, id: &PlayerId, context: ResolutionContext) -> DeathCause {
        if context == ResolutionContext::Evening {
            return DeathCause::VillageVote;
        }
        let kill_by = |role: Role| move |e: &NightEvent| e.actor == role && e.kind == ActionKind::Kill;

        if self.hit_by(id, |e| e.kind == ActionKind::WitchKill) {
            DeathCause::Poison
        } else if self.hit_by(id, kill_by(Role::WhiteWolf)) {
            DeathCause::WhiteWolf
        } else if self.hit_by(id, kill_by(Role::BigBadWolf)) {
            DeathCause::SecondWolf
        } else if self.hit_by(id, kill_by(Role::RustyKnight)) {
            DeathCause::Tetanus
        } else if self.hit_by(id, |e| e.is_pack_kill()) {
            DeathCause::Werewolves
        } else if self.hit_by(id, kill_by(Role::Pyromaniac)) {
            DeathCause::Arson
        } else {
            DeathCause::Unknown
        }
    }

    /// Resolves a batch of deaths and moves the game to the phase that
    /// follows it.
    pub fn resolve_deaths(
        &mut self,
        initial: &[PlayerId],
        context: ResolutionContext,
        override_cause: Option<DeathCause>,
    ) -> DeathReport {
        self.resolve_deaths_then(initial, context, override_cause, None)
    }

    /// Same as `resolve_deaths`, continuing with `resume` instead of the
    /// context's default next phase.
    pub(crate) fn resolve_deaths_then(
        &mut self,
        initial: &[PlayerId],
        context: ResolutionContext,
        override_cause: Option<DeathCause>,
        resume: Option<Resume>,
    ) -> DeathReport {
        let phase = context.log_phase();
        let mut report = DeathReport::default();
        let mut queue: VecDeque<(PlayerId, Option<DeathCause>)> =
            initial.iter().map(|id| (id.clone(), None)).collect();
        let mut dead: Vec<PlayerId> = Vec::new();
        let mut shooter: Option<PlayerId> = None;
        let mut angel: Option<PlayerId> = None;
        let mut iterations = 0usize;

        while let Some((id, cascade)) = queue.pop_front() {
            iterations += 1;
            if iterations > self.rules.cascade_ceiling {
                report.runaway = true;
                tracing::warn!(
                    "death cascade exceeded {} iterations, stopping with {} deaths",
                    self.rules.cascade_ceiling,
                    dead.len()
                );
                self.add_log(phase, "Death cascade cut short", Vec::new(), None);
                break;
            }

            if dead.contains(&id) {
                continue;
            }
            let Some(index) = self.index_of(&id) else {
                tracing::warn!("death requested for unknown player {}", id);
                continue;
            };
            if !self.players[index].is_alive() {
                continue;
            }

            let role = self.players[index].role;
            let label = self.players[index].label();
            let primary = cascade.is_none() && override_cause.is_none();
            let cause = cascade
                .or(override_cause)
                .unwrap_or_else(|| self.attribute_cause(&id, context));

            if primary
                && context == ResolutionContext::Morning
                && role.resists_pack_attacks()
                && cause.is_pack_attack()
                && self.elder_lives > 1
            {
                self.elder_lives -= 1;
                report.resisted.push(id.clone());
                self.add_log(phase, format!("{} survives the attack", label), Vec::new(), None);
                continue;
            }

            if primary && context == ResolutionContext::Evening && role.survives_village_vote() {
                self.players[index].vote_ban = Some(VoteBan::Permanent);
                report.spared.push(id.clone());
                self.add_log(
                    phase,
                    format!("{} is revealed as the village idiot, survives and can no longer vote", label),
                    Vec::new(),
                    None,
                );
                continue;
            }

            dead.push(id.clone());
            let role_name = self.catalog.name(role).to_string();
            self.add_log(
                phase,
                format!("{} ({}) {}", label, role_name, cause.label()),
                vec![id.clone()],
                Some(cause),
            );

            if role.marks_killer() && cause.is_pack_attack() {
                let wolf = next_clockwise(&self.players, index, |p| {
                    p.is_alive() && p.is_wolf_aligned() && !dead.contains(p.id())
                });
                if let Some(wolf) = wolf {
                    self.players[wolf].vengeance = Some(DeferredVengeance {
                        source: role,
                        matures_on_turn: self.turn + 1,
                    });
                    tracing::debug!("{} carries tetanus", self.players[wolf].label());
                }
            }

            if role.curses_village_on_wrongful_death() && cause.curses_elder() {
                report.curse_triggered = true;
            }
            if role.fires_on_death() && shooter.is_none() {
                shooter = Some(id.clone());
            }
            if role.wins_by_early_death() && self.turn == 1 {
                angel = Some(id.clone());
            }

            let partners: Vec<PlayerId> = self
                .players
                .iter()
                .filter(|p| p.is_alive() && p.is_lover_of(&self.players[index]))
                .map(|p| p.id().clone())
                .filter(|partner| !dead.contains(partner))
                .collect();
            for partner in partners {
                if !queue.iter().any(|(queued, _)| *queued == partner) {
                    queue.push_back((partner, Some(DeathCause::Heartbreak)));
                }
            }

            let orphans: Vec<String> = self
                .players
                .iter()
                .filter(|p| {
                    p.role == Role::WildChild
                        && p.is_alive()
                        && p.conversion.is_none()
                        && p.role_model.as_ref() == Some(&id)
                })
                .map(|p| p.label())
                .collect();
            for orphan in orphans {
                self.add_log(
                    phase,
                    format!("{} lost their role model and joins the pack", orphan),
                    Vec::new(),
                    None,
                );
            }
        }

        self.commit_deaths(&dead, phase, &mut report);
        report.dead = dead;

        if let Some(angel) = angel {
            let label = self.label_of(&angel);
            self.suggested = Some(VictoryRecord::new(
                VictoryKind::Solo,
                format!("{} (angel) wins by dying on the first turn", label),
                vec![angel],
            ));
            tracing::info!("suggested victory: angel");
        } else if !report.dead.is_empty() {
            self.evaluate_victory();
        }

        let next = resume.unwrap_or(match (override_cause, context) {
            (Some(DeathCause::TieBreak), _) => Resume::ScapegoatBan,
            (_, ResolutionContext::Morning) => Resume::DayVote,
            (_, ResolutionContext::Evening) => Resume::NextNight,
        });
        match shooter {
            Some(shooter) => {
                self.phase = GamePhase::ReflexShot {
                    shooter,
                    resume: next,
                }
            }
            None => self.enter(next),
        }

        report
    }

    fn commit_deaths(&mut self, dead: &[PlayerId], phase: LogPhase, report: &mut DeathReport) {
        let turn = self.turn;
        for player in self.players.iter_mut().filter(|p| dead.contains(p.id())) {
            player.status = PlayerStatus::Dead;
            if player.mayor {
                player.mayor = false;
                self.mayor_vacancy = true;
            }
        }

        if report.curse_triggered {
            let catalog = &self.catalog;
            for player in self.players.iter_mut().filter(|p| {
                catalog.faction(p.role) == Faction::Villager
                    && p.role != Role::BASELINE
                    && !p.is_wolf_aligned()
            }) {
                player.power_lost = true;
            }
            self.add_log(
                phase,
                "The elder's death curses the village: villagers lose their powers",
                Vec::new(),
                None,
            );
        }

        for child in self.players.iter_mut().filter(|p| {
            p.role == Role::WildChild
                && p.role_model.as_ref().is_some_and(|model| dead.contains(model))
        }) {
            child.convert(ConversionCause::ModelDied, turn);
        }
    }
}
