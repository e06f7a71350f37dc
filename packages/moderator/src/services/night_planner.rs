//! Wake order for the current night.
//!
//! The plan is never stored. Every query rebuilds it from the game state and
//! locates the open step by the key of the last completed one, so a step
//! that disappears mid-night (fox burnout, infection spent) cannot make the
//! night skip ahead.

use crate::models::game::Game;
use crate::models::night::{StepKey, StepKind, WakeStep};
use crate::models::player::{AssignedPlayer, PlayerId};
use crate::models::role::Role;

const COMEDIAN_KEY: StepKey = StepKey {
    priority: 0,
    rank: 0,
    offset: 0,
};

fn role_key(game: &Game, role: Role) -> StepKey {
    StepKey {
        priority: game.catalog.wake_priority(role),
        rank: game.catalog.rank(role),
        offset: 0,
    }
}

fn behind(key: StepKey) -> StepKey {
    StepKey {
        offset: key.offset + 1,
        ..key
    }
}

/// The comedian borrowed `role` tonight and can still act.
fn comedian_stands_in(game: &Game, role: Role) -> bool {
    game.night.comedian_pick == Some(role)
        && game.living_holders(Role::Comedian).any(|p| p.has_power())
}

/// Someone (or, under `call_dead_roles`, the empty seat of someone) answers
/// when the role is called.
fn has_caller(game: &Game, role: Role) -> bool {
    let mut holders = game.living_holders(role).peekable();
    let any_living = holders.peek().is_some();
    if holders.any(|p| p.has_power()) || comedian_stands_in(game, role) {
        return true;
    }
    if any_living {
        return false;
    }
    game.rules.call_dead_roles && game.is_dealt(role)
}

fn passes_gate(game: &Game, role: Role) -> bool {
    if role.is_turn_one_only() && game.turn != 1 {
        return false;
    }
    match role {
        Role::WhiteWolf => game.turn % 2 == 0,
        Role::BigBadWolf => !game.wolf_ever_died(),
        Role::Pyromaniac => !game.arson_used,
        _ => true,
    }
}

fn has_pack(game: &Game) -> bool {
    game.living().any(|p| p.is_wolf_aligned())
}

fn infection_pending(game: &Game) -> bool {
    !game.infect_used && game.living_holders(Role::InfectedFather).any(|p| p.has_power())
}

/// Ordered wake steps for the current night.
pub fn plan_night(game: &Game) -> Vec<WakeStep> {
    let mut steps = Vec::new();

    if game.is_dealt(Role::Comedian)
        && !game.comedian_pool.is_empty()
        && has_caller(game, Role::Comedian)
    {
        steps.push(WakeStep {
            kind: StepKind::Role(Role::Comedian),
            key: COMEDIAN_KEY,
        });
    }

    for definition in game.catalog.definitions().iter().filter(|d| d.wakes()) {
        let role = definition.role;
        if role == Role::Comedian {
            continue;
        }

        if role.hunts_with_pack() {
            if role == Role::SimpleWerewolf && has_pack(game) {
                let key = role_key(game, role);
                steps.push(WakeStep {
                    kind: StepKind::Role(role),
                    key,
                });
                if infection_pending(game) {
                    steps.push(WakeStep {
                        kind: StepKind::InfectDecision,
                        key: behind(key),
                    });
                }
            }
            continue;
        }

        let in_play = game.is_dealt(role) || game.night.comedian_pick == Some(role);
        if !in_play || !passes_gate(game, role) || !has_caller(game, role) {
            continue;
        }

        let key = role_key(game, role);
        steps.push(WakeStep {
            kind: StepKind::Role(role),
            key,
        });

        if role == Role::Cupid && game.turn == 1 && game.players.iter().any(|p| p.lover.is_some()) {
            steps.push(WakeStep {
                kind: StepKind::LoversRecognition,
                key: behind(key),
            });
        }
    }

    steps.sort_by_key(|s| s.key);
    steps
}

impl Game {
    pub fn night_plan(&self) -> Vec<WakeStep> {
        plan_night(self)
    }

    /// First planned step after the last completed one.
    pub fn current_step(&self) -> Option<WakeStep> {
        let completed = self.night.completed;
        plan_night(self)
            .into_iter()
            .find(|step| completed.map_or(true, |done| step.key > done))
    }

    /// Players who open their eyes for `step`.
    pub fn step_actors(&self, step: &WakeStep) -> Vec<PlayerId> {
        let ids = |players: Vec<&AssignedPlayer>| {
            players.into_iter().map(|p| p.id().clone()).collect::<Vec<_>>()
        };

        match step.kind {
            StepKind::LoversRecognition => {
                ids(self.living().filter(|p| p.lover.is_some()).collect())
            }
            StepKind::InfectDecision => ids(self.living_holders(Role::InfectedFather).collect()),
            StepKind::Role(Role::SimpleWerewolf) => {
                ids(self.living().filter(|p| p.is_wolf_aligned()).collect())
            }
            StepKind::Role(Role::Comedian) => ids(
                self.living_holders(Role::Comedian)
                    .filter(|p| p.has_power())
                    .collect(),
            ),
            StepKind::Role(role) => {
                let mut actors: Vec<_> = self
                    .living_holders(role)
                    .filter(|p| p.has_power())
                    .collect();
                if self.night.comedian_pick == Some(role) {
                    for comedian in self.living_holders(Role::Comedian).filter(|p| p.has_power()) {
                        if !actors.iter().any(|a| a.id() == comedian.id()) {
                            actors.push(comedian);
                        }
                    }
                }
                ids(actors)
            }
        }
    }
}
