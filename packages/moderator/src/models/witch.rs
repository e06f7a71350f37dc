use serde::{Deserialize, Serialize};

/// Potion switches and use counters. Only a new distribution resets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitchInventory {
    pub life_available: bool,
    pub death_available: bool,
    pub life_uses: u32,
    pub death_uses: u32,
}

impl Default for WitchInventory {
    fn default() -> Self {
        Self {
            life_available: true,
            death_available: true,
            life_uses: 0,
            death_uses: 0,
        }
    }
}
