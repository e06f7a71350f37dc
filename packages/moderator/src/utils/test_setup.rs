use dotenvy::dotenv;
use std::sync::Once;

use crate::models::catalog::RoleCatalog;
use crate::models::config::HouseRules;
use crate::models::game::Game;
use crate::models::player::{Player, PlayerId};
use crate::models::role::Role;

static INIT: Once = Once::new();

pub fn setup_test_env() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Player ids are `p1`..`pN`, seated in order.
pub fn roster(count: usize) -> Vec<Player> {
    (0..count)
        .map(|seat| Player::new(id(seat + 1), format!("Player{}", seat + 1), seat))
        .collect()
}

/// Id of the player in 1-based seat `n`.
pub fn id(n: usize) -> PlayerId {
    PlayerId(format!("p{}", n))
}

/// Game dealt exactly `roles`, seat by seat, with default house rules.
pub fn game_with_roles(roles: &[Role]) -> Game {
    game_with_rules(roles, HouseRules::default())
}

pub fn game_with_rules(roles: &[Role], rules: HouseRules) -> Game {
    setup_test_env();
    Game::with_roles(
        roster(roles.len()),
        roles.to_vec(),
        Vec::new(),
        RoleCatalog::standard().clone(),
        rules,
    )
}
