use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::catalog::RoleCatalog;
use crate::models::config::{HouseRules, Setup};
use crate::models::game::Game;
use crate::models::log::LogPhase;
use crate::models::player::Player;
use crate::models::role::Role;

/// Physical cards for `setup`, padded with baseline villagers up to
/// `player_count`. Roles the catalog does not list are left out. Not shuffled.
pub fn build_deck(setup: &Setup, catalog: &RoleCatalog, player_count: usize) -> Vec<Role> {
    let mut deck = Vec::new();
    for (role, count) in setup.role_counts.iter().filter(|(_, c)| **c > 0) {
        let Some(definition) = catalog.lookup(*role) else {
            continue;
        };
        for _ in 0..(*count * definition.seat_weight) {
            deck.push(*role);
        }
    }
    while deck.len() < player_count {
        deck.push(Role::BASELINE);
    }
    deck
}

/// Shuffles a deck for `setup` and deals one card per seat, returning a
/// fresh game on turn 1. Cards left over after the deal stay undealt.
pub fn distribute<R: Rng + ?Sized>(
    roster: Vec<Player>,
    setup: &Setup,
    catalog: &RoleCatalog,
    rules: &HouseRules,
    rng: &mut R,
) -> Game {
    let player_count = roster.len();
    let warnings = setup.check(catalog, player_count);
    for warning in &warnings {
        tracing::warn!("setup: {}", warning);
    }

    let mut deck = build_deck(setup, catalog, player_count);
    deck.shuffle(rng);

    let mut game = Game::with_roles(
        roster,
        deck,
        setup.comedian_pool.clone(),
        catalog.clone(),
        rules.clone(),
    );

    tracing::info!(
        "dealt {} cards to {} players, {} undealt",
        game.players.len(),
        player_count,
        game.undealt.len()
    );
    game.add_log(
        LogPhase::Night,
        format!("Roles distributed to {} players", player_count),
        Vec::new(),
        None,
    );
    for warning in warnings {
        game.add_log(LogPhase::Night, format!("Setup warning: {}", warning), Vec::new(), None);
    }
    game
}
