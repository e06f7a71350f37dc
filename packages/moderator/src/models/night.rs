use serde::{Deserialize, Serialize};

use crate::models::player::PlayerId;
use crate::models::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Kill,
    Save,
    WitchSave,
    WitchKill,
    Peek,
    Sniff,
    Link,
    Transform,
    Curse,
    Infect,
    Charm,
}

/// One confirmed action. The ledger of these is append-only for the night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightEvent {
    pub actor: Role,
    pub kind: ActionKind,
    pub targets: Vec<PlayerId>,
}

impl NightEvent {
    pub fn new(actor: Role, kind: ActionKind, targets: Vec<PlayerId>) -> Self {
        Self {
            actor,
            kind,
            targets,
        }
    }

    pub fn is_pack_kill(&self) -> bool {
        self.kind == ActionKind::Kill && self.actor.hunts_with_pack()
    }

    pub fn targets_player(&self, id: &PlayerId) -> bool {
        self.targets.iter().any(|t| t == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// A catalog role waking; `SimpleWerewolf` stands for the whole pack.
    Role(Role),
    LoversRecognition,
    InfectDecision,
}

/// Sort key of a wake step: priority, declaration rank, then the offset of
/// synthetic steps inserted behind their parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StepKey {
    pub priority: u32,
    pub rank: usize,
    pub offset: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WakeStep {
    pub kind: StepKind,
    pub key: StepKey,
}

impl WakeStep {
    pub fn is_pack(&self) -> bool {
        self.kind == StepKind::Role(Role::SimpleWerewolf)
    }

    pub fn role(&self) -> Option<Role> {
        match self.kind {
            StepKind::Role(role) => Some(role),
            StepKind::LoversRecognition | StepKind::InfectDecision => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    BecomeWolf,
    StayVillager,
    Infect,
    Decline,
    Impersonate(Role),
    TakeCard(Role),
}

/// Moderator input for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Pass,
    Targets(Vec<PlayerId>),
    Choice(Choice),
}

/// Private information handed back to the waking role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Insight {
    Role {
        target: PlayerId,
        role: Role,
        role_name: String,
        converted: bool,
    },
    Scent {
        target: PlayerId,
        wolf_found: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: WakeStep,
    pub insight: Option<Insight>,
    pub night_over: bool,
}

/// Everything scoped to a single night. Replaced wholesale when the next
/// night starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightState {
    pub completed: Option<StepKey>,
    pub events: Vec<NightEvent>,
    pub comedian_pick: Option<Role>,
    pub little_girl_exposed: bool,
    pub witch_saved_tonight: bool,
    pub witch_poisoned_tonight: bool,
}

impl NightState {
    pub fn record(&mut self, event: NightEvent) {
        tracing::debug!("night event {:?} by {} on {:?}", event.kind, event.actor, event.targets);
        self.events.push(event);
    }

    pub fn pack_victim(&self) -> Option<&PlayerId> {
        self.events
            .iter()
            .find(|e| e.is_pack_kill())
            .and_then(|e| e.targets.first())
    }
}
