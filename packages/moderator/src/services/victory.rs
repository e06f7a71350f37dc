use crate::models::catalog::RoleCatalog;
use crate::models::game::{Game, GamePhase};
use crate::models::log::LogPhase;
use crate::models::player::{AssignedPlayer, PlayerId};
use crate::models::role::Role;
use crate::models::victory::{VictoryKind, VictoryRecord};
use crate::models::witch::WitchInventory;

fn survivors(living: &[&AssignedPlayer]) -> Vec<PlayerId> {
    living.iter().map(|p| p.id().clone()).collect()
}

/// Checks the win conditions in order; the first that holds wins.
pub fn evaluate(
    players: &[AssignedPlayer],
    catalog: &RoleCatalog,
    witch: &WitchInventory,
) -> Option<VictoryRecord> {
    let living: Vec<&AssignedPlayer> = players.iter().filter(|p| p.is_alive()).collect();
    if living.is_empty() {
        return None;
    }

    if let [last] = living.as_slice() {
        if last.role.is_lone_wolf() {
            return Some(VictoryRecord::new(
                VictoryKind::Solo,
                format!("{} (white wolf) is the last one standing", last.label()),
                survivors(&living),
            ));
        }
    }

    if living.iter().all(|p| p.lover.is_some()) {
        return Some(VictoryRecord::new(
            VictoryKind::Lovers,
            "The lovers are the last survivors",
            survivors(&living),
        ));
    }

    // The white wolf hunts with the pack but still counts as a loner here.
    let is_loner = |p: &AssignedPlayer| catalog.is_loner(p.role);
    let wolves: Vec<&AssignedPlayer> = living.iter().copied().filter(|p| p.is_wolf_aligned()).collect();
    let loners = living.iter().filter(|p| is_loner(p)).count();
    let others = living.len() - wolves.len();

    let lovers: Vec<&AssignedPlayer> = living.iter().copied().filter(|p| p.lover.is_some()).collect();
    let mixed_couple = lovers.len() == 2
        && lovers.iter().any(|p| p.is_wolf_aligned())
        && lovers.iter().any(|p| !p.is_wolf_aligned() && !is_loner(p));

    if wolves.is_empty() && loners == 0 {
        return Some(VictoryRecord::new(
            VictoryKind::Village,
            "The village has rid itself of every threat",
            survivors(&living),
        ));
    }

    let witch_can_save = witch.life_available
        && living
            .iter()
            .any(|p| p.role == Role::Witch && p.has_power());
    if wolves.len() >= others && loners == 0 && !mixed_couple && !witch_can_save {
        return Some(VictoryRecord::new(
            VictoryKind::Werewolves,
            "The werewolves outnumber the village",
            survivors(&wolves),
        ));
    }

    if let Some(piper) = living.iter().find(|p| p.role == Role::Piper) {
        let all_charmed = living
            .iter()
            .filter(|p| p.id() != piper.id())
            .all(|p| p.charmed);
        if all_charmed {
            return Some(VictoryRecord::new(
                VictoryKind::Solo,
                format!("{} (piper) has charmed the whole village", piper.label()),
                survivors(&living),
            ));
        }
    }

    None
}

impl Game {
    /// Refreshes the suggested victory. Nothing is final until confirmed, and
    /// a standing suggestion is only dropped by dismissing it.
    pub fn evaluate_victory(&mut self) -> Option<&VictoryRecord> {
        if let Some(record) = evaluate(&self.players, &self.catalog, &self.witch) {
            if self.suggested.as_ref() != Some(&record) {
                tracing::info!("suggested victory: {:?} ({})", record.kind, record.label);
            }
            self.suggested = Some(record);
        }
        self.suggested.as_ref()
    }

    /// Makes the suggestion binding. Confirming again changes nothing.
    pub fn confirm_victory(&mut self) -> Option<&VictoryRecord> {
        if self.winner.is_none() {
            let record = self.suggested.clone()?;
            self.add_log(
                LogPhase::Evening,
                format!("Game over: {}", record.label),
                Vec::new(),
                None,
            );
            self.winner = Some(record);
            self.phase = GamePhase::Victory;
        }
        self.winner.as_ref()
    }

    /// Drops the suggestion and keeps playing. A later evaluation on the
    /// same table suggests it again.
    pub fn dismiss_suggestion(&mut self) {
        if let Some(record) = self.suggested.take() {
            tracing::info!("victory suggestion dismissed: {:?}", record.kind);
        }
    }
}
