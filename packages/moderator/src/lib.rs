pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{CatalogError, GameError};
pub use models::catalog::{RoleCatalog, RoleDefinition};
pub use models::config::{HouseRules, Setup};
pub use models::game::{Game, GamePhase, Resume};
pub use models::player::{AssignedPlayer, Player, PlayerId, PlayerStatus};
pub use models::role::{Faction, Role};
pub use services::distribution::distribute;
