use std::collections::BTreeMap;

use moderator::models::night::{Action, Insight, StepKind};
use moderator::services::distribution::build_deck;
use moderator::utils::test_setup::{roster, setup_test_env};
use moderator::{distribute, GamePhase, HouseRules, Role, RoleCatalog, Setup};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn histogram(roles: impl IntoIterator<Item = Role>) -> BTreeMap<Role, usize> {
    let mut counts = BTreeMap::new();
    for role in roles {
        *counts.entry(role).or_insert(0) += 1;
    }
    counts
}

#[test]
fn every_seat_gets_exactly_one_catalog_role() {
    setup_test_env();
    let catalog = RoleCatalog::standard();
    let setups = [
        Setup::with_counts([(Role::SimpleWerewolf, 2), (Role::Seer, 1)]),
        Setup::with_counts([(Role::ThreeBrothers, 1), (Role::TwoSisters, 1), (Role::BigBadWolf, 1)]),
        Setup::with_counts([(Role::SimpleWerewolf, 3), (Role::Witch, 1), (Role::Hunter, 1), (Role::Cupid, 1)]),
    ];

    for (seed, setup) in setups.iter().enumerate() {
        for players in [6, 8, 12] {
            let mut rng = StdRng::seed_from_u64(seed as u64);
            let game = distribute(roster(players), setup, catalog, &HouseRules::default(), &mut rng);

            assert_eq!(game.players.len(), players);
            assert!(game.players.iter().all(|p| catalog.lookup(p.role).is_some()));

            let dealt = histogram(game.players.iter().map(|p| p.role).chain(game.undealt.iter().copied()));
            let deck = histogram(build_deck(setup, catalog, players));
            assert_eq!(dealt, deck);
        }
    }
}

#[test]
fn overflowing_setup_truncates_and_keeps_the_rest_undealt() {
    setup_test_env();
    let setup = Setup::with_counts([(Role::SimpleWerewolf, 3), (Role::ThreeBrothers, 1), (Role::Seer, 1)]);
    let mut rng = StdRng::seed_from_u64(3);
    let game = distribute(roster(5), &setup, RoleCatalog::standard(), &HouseRules::default(), &mut rng);

    assert_eq!(game.players.len(), 5);
    assert_eq!(game.undealt.len(), 2);
    assert!(game
        .log
        .entries()
        .iter()
        .any(|e| e.message.starts_with("Setup warning")));
}

#[test]
fn fresh_deal_resets_game_state() {
    setup_test_env();
    let setup = Setup::with_counts([(Role::SimpleWerewolf, 1), (Role::Elder, 1), (Role::Witch, 1)]);
    let mut rng = StdRng::seed_from_u64(11);
    let game = distribute(roster(6), &setup, RoleCatalog::standard(), &HouseRules::default(), &mut rng);

    assert_eq!(game.turn, 1);
    assert_eq!(game.phase, GamePhase::Distribution);
    assert_eq!(game.elder_lives, 2);
    assert!(game.witch.life_available && game.witch.death_available);
    assert!(!game.infect_used);
    assert!(game.winner.is_none());
}

#[test]
fn ten_players_two_wolves_and_a_seer() {
    setup_test_env();
    let setup = Setup::with_counts([(Role::SimpleWerewolf, 2), (Role::Seer, 1)]);
    let mut rng = StdRng::seed_from_u64(42);
    let mut game = distribute(roster(10), &setup, RoleCatalog::standard(), &HouseRules::default(), &mut rng);

    assert_eq!(game.players.iter().filter(|p| p.is_wolf_aligned()).count(), 2);
    assert_eq!(game.players.iter().filter(|p| p.role == Role::Seer).count(), 1);
    assert_eq!(game.players.iter().filter(|p| p.role == Role::SimpleVillager).count(), 7);

    game.begin_first_night().unwrap();
    let kinds: Vec<StepKind> = game.night_plan().into_iter().map(|s| s.kind).collect();
    assert_eq!(kinds, vec![StepKind::Role(Role::Seer), StepKind::Role(Role::SimpleWerewolf)]);

    let wolf = game
        .players
        .iter()
        .find(|p| p.is_wolf_aligned())
        .map(|p| p.id().clone())
        .unwrap();
    let outcome = game.resolve_step(Action::Targets(vec![wolf.clone()])).unwrap();
    assert_eq!(
        outcome.insight,
        Some(Insight::Role {
            target: wolf,
            role: Role::SimpleWerewolf,
            role_name: "Simple Werewolf".to_string(),
            converted: false,
        })
    );
}

#[test]
fn roles_missing_from_a_custom_catalog_are_never_dealt() {
    setup_test_env();
    let json = r#"[
        {"role": "simple-werewolf", "name": "Werewolf", "faction": "WEREWOLF", "wake_priority": 70},
        {"role": "simple-villager", "name": "Villager", "faction": "VILLAGER"}
    ]"#;
    let catalog = RoleCatalog::from_json(json).unwrap();
    let setup = Setup::with_counts([(Role::SimpleWerewolf, 1), (Role::Seer, 1)]);
    assert_eq!(setup.card_count(&catalog), 1);

    let mut rng = StdRng::seed_from_u64(5);
    let game = distribute(roster(4), &setup, &catalog, &HouseRules::default(), &mut rng);

    assert!(game.players.iter().all(|p| catalog.lookup(p.role).is_some()));
    assert!(game.undealt.is_empty());
    let dealt = histogram(game.players.iter().map(|p| p.role));
    assert_eq!(dealt.get(&Role::SimpleWerewolf), Some(&1));
    assert_eq!(dealt.get(&Role::SimpleVillager), Some(&3));
    assert!(game
        .log
        .entries()
        .iter()
        .any(|e| e.message.contains("missing from the catalog")));
}
