use crate::error::GameError;
use crate::models::game::{Game, GamePhase};
use crate::models::log::LogPhase;
use crate::models::night::{ActionKind, NightEvent, StepKind};
use crate::models::player::PlayerId;
use crate::models::role::Role;

impl Game {
    fn require_witch_turn(&self) -> Result<(), GameError> {
        self.require_phase("night", |p| matches!(p, GamePhase::Night))?;
        let step = self.current_step().ok_or(GameError::NotWitchTurn)?;
        if step.kind != StepKind::Role(Role::Witch) {
            return Err(GameError::NotWitchTurn);
        }
        if self.step_actors(&step).is_empty() {
            return Err(GameError::NoLivingHolder(Role::Witch));
        }
        Ok(())
    }

    /// Life potion: strikes `target` from tonight's kills.
    pub fn witch_save(&mut self, target: &PlayerId) -> Result<(), GameError> {
        self.require_witch_turn()?;
        if !self.witch.life_available {
            return Err(GameError::PotionUnavailable);
        }
        if self.night.witch_saved_tonight {
            return Err(GameError::PotionAlreadyUsedTonight);
        }
        let attacked = self
            .night
            .events
            .iter()
            .any(|e| e.kind == ActionKind::Kill && e.targets_player(target));
        if !attacked || !self.pending_victims().contains(target) {
            return Err(GameError::NotAPendingVictim(target.clone()));
        }

        self.night.record(NightEvent::new(
            Role::Witch,
            ActionKind::WitchSave,
            vec![target.clone()],
        ));
        self.night.witch_saved_tonight = true;
        self.witch.life_uses += 1;
        if !self.rules.witch_potions_reusable {
            self.witch.life_available = false;
        }
        self.add_log(
            LogPhase::Night,
            format!("The witch used the life potion on {}", self.label_of(target)),
            Vec::new(),
            None,
        );
        Ok(())
    }

    /// Death potion: adds a living `target` to tonight's victims.
    pub fn witch_kill(&mut self, target: &PlayerId) -> Result<(), GameError> {
        self.require_witch_turn()?;
        if !self.witch.death_available {
            return Err(GameError::PotionUnavailable);
        }
        if self.night.witch_poisoned_tonight {
            return Err(GameError::PotionAlreadyUsedTonight);
        }
        self.require_living(target)?;

        self.night.record(NightEvent::new(
            Role::Witch,
            ActionKind::WitchKill,
            vec![target.clone()],
        ));
        self.night.witch_poisoned_tonight = true;
        self.witch.death_uses += 1;
        if !self.rules.witch_potions_reusable {
            self.witch.death_available = false;
        }
        self.add_log(
            LogPhase::Night,
            format!("The witch poisoned {}", self.label_of(target)),
            Vec::new(),
            None,
        );
        Ok(())
    }

    /// House-rule override; does not count as a use.
    pub fn set_witch_life_available(&mut self, available: bool) {
        self.witch.life_available = available;
    }

    pub fn set_witch_death_available(&mut self, available: bool) {
        self.witch.death_available = available;
    }
}
