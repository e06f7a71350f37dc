use crate::models::game::GamePhase;
use crate::models::player::PlayerId;
use crate::models::role::Role;

/// Rejections raised by game operations. A rejected operation leaves the
/// game untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("operation requires phase {expected}, game is in {actual:?}")]
    WrongPhase {
        expected: &'static str,
        actual: GamePhase,
    },
    #[error("no wake step is open")]
    NoOpenStep,
    #[error("unknown player: {0}")]
    UnknownPlayer(PlayerId),
    #[error("player {0} is already dead")]
    DeadTarget(PlayerId),
    #[error("player {0} cannot target themselves")]
    SelfTarget(PlayerId),
    #[error("wolves cannot target the wolf-aligned player {0}")]
    AlliedTarget(PlayerId),
    #[error("player {0} was already protected last night")]
    RepeatedProtection(PlayerId),
    #[error("player {0} was selected twice")]
    DuplicateTarget(PlayerId),
    #[error("expected between {min} and {max} targets, got {got}")]
    Cardinality { min: usize, max: usize, got: usize },
    #[error("this step does not accept that choice")]
    ChoiceNotAllowed,
    #[error("this step does not take targets")]
    TargetsNotAllowed,
    #[error("the witch is not awake")]
    NotWitchTurn,
    #[error("the potion is not available")]
    PotionUnavailable,
    #[error("that potion was already used tonight")]
    PotionAlreadyUsedTonight,
    #[error("player {0} is not a pending victim")]
    NotAPendingVictim(PlayerId),
    #[error("the pack has no victim to infect")]
    NoVictimToInfect,
    #[error("role {0} is not available to pick")]
    NotInPool(Role),
    #[error("no living player holds {0}")]
    NoLivingHolder(Role),
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse role catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("role catalog is empty")]
    Empty,
}
