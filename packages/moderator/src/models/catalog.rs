use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::role::{Faction, Role};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    pub role: Role,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub faction: Faction,
    /// Physical cards one configured unit of this role puts in the deck.
    #[serde(default = "default_seat_weight")]
    pub seat_weight: u32,
    /// `None` means unlimited.
    #[serde(default)]
    pub max_quantity: Option<u32>,
    /// 0 means the role never wakes.
    #[serde(default)]
    pub wake_priority: u32,
    #[serde(default)]
    pub expansion: String,
    /// Needs cards set aside outside the deck (the comedian's pool).
    #[serde(default)]
    pub requires_extras: bool,
}

fn default_seat_weight() -> u32 {
    1
}

impl RoleDefinition {
    pub fn wakes(&self) -> bool {
        self.wake_priority > 0
    }
}

/// Read-only role table. Position in `definitions` is the declaration order
/// used to break wake-priority ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
    definitions: Vec<RoleDefinition>,
}

static STANDARD: Lazy<RoleCatalog> = Lazy::new(build_standard);

static BASELINE: Lazy<RoleDefinition> = Lazy::new(|| {
    def(
        Role::SimpleVillager,
        "Simple Villager",
        "No power. Finds the wolves by talking and voting.",
        Faction::Villager,
        1,
        None,
        0,
        "Base",
    )
});

impl RoleCatalog {
    pub fn standard() -> &'static RoleCatalog {
        &STANDARD
    }

    pub fn new(definitions: Vec<RoleDefinition>) -> Result<Self, CatalogError> {
        if definitions.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { definitions })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let definitions: Vec<RoleDefinition> = serde_json::from_str(json)?;
        let catalog = Self::new(definitions)?;
        tracing::debug!("loaded role catalog with {} definitions", catalog.definitions.len());
        Ok(catalog)
    }

    pub fn definitions(&self) -> &[RoleDefinition] {
        &self.definitions
    }

    pub fn lookup(&self, role: Role) -> Option<&RoleDefinition> {
        self.definitions.iter().find(|d| d.role == role)
    }

    /// Missing entries behave as the baseline villager.
    pub fn definition_or_baseline(&self, role: Role) -> &RoleDefinition {
        self.lookup(role).unwrap_or(&BASELINE)
    }

    pub fn faction(&self, role: Role) -> Faction {
        self.definition_or_baseline(role).faction
    }

    pub fn name(&self, role: Role) -> &str {
        match self.lookup(role) {
            Some(definition) => definition.name.as_str(),
            None => role.id(),
        }
    }

    pub fn wake_priority(&self, role: Role) -> u32 {
        self.lookup(role).map(|d| d.wake_priority).unwrap_or(0)
    }

    /// Declaration index; roles the table does not list sort last.
    pub fn rank(&self, role: Role) -> usize {
        self.definitions
            .iter()
            .position(|d| d.role == role)
            .unwrap_or(self.definitions.len())
    }

    pub fn is_loner(&self, role: Role) -> bool {
        self.faction(role) == Faction::Loner
    }
}

#[allow(clippy::too_many_arguments)]
fn def(
    role: Role,
    name: &str,
    description: &str,
    faction: Faction,
    seat_weight: u32,
    max_quantity: Option<u32>,
    wake_priority: u32,
    expansion: &str,
) -> RoleDefinition {
    RoleDefinition {
        role,
        name: name.to_string(),
        description: description.to_string(),
        faction,
        seat_weight,
        max_quantity,
        wake_priority,
        expansion: expansion.to_string(),
        requires_extras: false,
    }
}

fn build_standard() -> RoleCatalog {
    use Faction::*;

    let one = Some(1);
    let mut comedian = def(
        Role::Comedian,
        "Comedian",
        "Each night borrows the power of one of three special roles set aside.",
        Villager,
        1,
        one,
        5,
        "Characters",
    );
    comedian.requires_extras = true;

    let definitions = vec![
        comedian,
        def(Role::Thief, "Thief", "May swap their card with one of the undealt cards.", Ambiguous, 1, one, 10, "Base"),
        def(Role::WolfDog, "Wolf-Dog", "On the first night chooses to join the pack or stay a villager.", Ambiguous, 1, one, 15, "Characters"),
        def(Role::Cupid, "Cupid", "Links two lovers on the first night; they live and die together.", Villager, 1, one, 20, "Base"),
        def(Role::Salvager, "Salvager", "Protects one player from the wolves each night, never twice in a row.", Villager, 1, one, 35, "Characters"),
        def(Role::Seer, "Seer", "Learns the exact role of one player each night.", Villager, 1, one, 40, "Base"),
        def(Role::Fox, "Fox", "Sniffs a player and their neighbours for wolves. Loses the power on a miss.", Villager, 1, one, 45, "Characters"),
        def(Role::BearTamer, "Bear Tamer", "The bear growls at dawn when a wolf sits next to the tamer.", Villager, 1, one, 0, "Characters"),
        def(Role::TwoSisters, "Two Sisters", "Wake together to recognise each other.", Villager, 2, one, 50, "Characters"),
        def(Role::ThreeBrothers, "Three Brothers", "Wake together to recognise each other.", Villager, 3, one, 50, "Characters"),
        def(Role::WildChild, "Wild Child", "Picks a role model and turns wolf if the model dies.", Ambiguous, 1, one, 60, "Characters"),
        def(Role::SimpleWerewolf, "Simple Werewolf", "Devours one villager each night with the pack.", Werewolf, 1, None, 70, "Base"),
        def(Role::BigBadWolf, "Big Bad Wolf", "Kills a second victim while no wolf has died.", Werewolf, 1, one, 80, "Characters"),
        def(Role::InfectedFather, "Infected Father", "Once per game turns the pack's victim into a wolf.", Werewolf, 1, one, 75, "Characters"),
        def(Role::WhiteWolf, "White Wolf", "Every other night may kill a wolf. Wins alone.", Loner, 1, one, 90, "Characters"),
        def(Role::Witch, "Witch", "Owns one life potion and one death potion.", Villager, 1, one, 100, "Base"),
        def(Role::Raven, "Raven", "Curses a player who starts the next vote with extra votes.", Villager, 1, one, 105, "New Moon"),
        def(Role::Piper, "Piper", "Charms players each night and wins once everyone is charmed.", Loner, 1, one, 110, "New Moon"),
        def(Role::Pyromaniac, "Pyromaniac", "Once per game burns down a player's house.", Loner, 1, one, 108, "The Village"),
        def(Role::Hunter, "Hunter", "Shoots a player with their last breath.", Villager, 1, one, 0, "Base"),
        def(Role::Elder, "Elder", "Survives the first wolf attack. Killing them wrongly curses the village.", Villager, 1, one, 0, "Characters"),
        def(Role::Idiot, "Village Idiot", "Survives the village vote once revealed but loses the right to vote.", Villager, 1, one, 0, "Characters"),
        def(Role::Scapegoat, "Scapegoat", "Dies on a tied vote and chooses who votes the next day.", Villager, 1, one, 0, "Characters"),
        def(Role::RustyKnight, "Rusty Knight", "When eaten, gives tetanus to the nearest wolf.", Villager, 1, one, 0, "Characters"),
        def(Role::LittleGirl, "Little Girl", "May spy on the wolves at the risk of being eaten.", Villager, 1, one, 0, "Base"),
        def(Role::StutteringJudge, "Stuttering Judge", "Once per game calls for a second vote.", Villager, 1, one, 0, "Characters"),
        def(Role::Angel, "Angel", "Wins alone by dying on the first turn.", Loner, 1, one, 0, "Characters"),
        def(Role::DevotedServant, "Devoted Servant", "May take the role of a player eliminated by vote.", Villager, 1, one, 0, "Characters"),
        def(Role::Scandalmonger, "Scandalmonger", "Spreads rumours to steer the vote.", Loner, 1, one, 0, "Characters"),
        def(Role::Gypsy, "Gypsy", "Asks the dead a question through a medium.", Villager, 1, one, 0, "New Moon"),
        def(Role::Confessor, "Confessor", "Hears one player's confession.", Villager, 1, one, 0, "The Village"),
        def(Role::BoneSetter, "Bone Setter", "Tends to the wounded of the village.", Villager, 1, one, 0, "The Village"),
        def(Role::SchoolTeacher, "School Teacher", "Can silence a pupil for a day.", Villager, 1, one, 0, "The Village"),
        BASELINE.clone(),
    ];

    RoleCatalog { definitions }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_role_in_order() {
        let catalog = RoleCatalog::standard();
        assert_eq!(catalog.definitions().len(), Role::ALL.len());
        for (index, role) in Role::ALL.iter().enumerate() {
            assert_eq!(catalog.rank(*role), index);
        }
    }

    #[test]
    fn standard_table_values() {
        let catalog = RoleCatalog::standard();
        assert_eq!(catalog.definition_or_baseline(Role::ThreeBrothers).seat_weight, 3);
        assert_eq!(catalog.wake_priority(Role::Witch), 100);
        assert_eq!(catalog.lookup(Role::SimpleWerewolf).unwrap().max_quantity, None);
        assert!(catalog.lookup(Role::Comedian).unwrap().requires_extras);
        assert!(catalog.is_loner(Role::WhiteWolf));
    }

    #[test]
    fn missing_roles_behave_as_baseline() {
        let json = r#"[{"role": "seer", "name": "Seer", "faction": "VILLAGER", "wake_priority": 40}]"#;
        let catalog = RoleCatalog::from_json(json).unwrap();
        assert_eq!(catalog.lookup(Role::Seer).unwrap().seat_weight, 1);
        assert_eq!(catalog.faction(Role::Witch), Faction::Villager);
        assert_eq!(catalog.wake_priority(Role::Witch), 0);
        assert_eq!(catalog.rank(Role::Witch), 1);
    }

    #[test]
    fn empty_or_malformed_json_is_rejected() {
        assert!(matches!(RoleCatalog::from_json("[]"), Err(CatalogError::Empty)));
        assert!(matches!(RoleCatalog::from_json("{"), Err(CatalogError::Parse(_))));
    }
}
