use moderator::models::config::SetupWarning;
use moderator::utils::test_setup::setup_test_env;
use moderator::{HouseRules, Role, RoleCatalog, Setup};
use serial_test::serial;
use std::env;

const VARS: [&str; 7] = [
    "WEREWOLF_ELDER_LIVES",
    "WEREWOLF_CASCADE_CEILING",
    "WEREWOLF_WITCH_POTIONS_REUSABLE",
    "WEREWOLF_CALL_DEAD_ROLES",
    "WEREWOLF_MAYOR_VOTE_WEIGHT",
    "WEREWOLF_RAVEN_CURSE_VOTES",
    "WEREWOLF_VERBOSE_LOGGING",
];

fn clear_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn house_rules_default_without_env() {
    setup_test_env();
    clear_vars();
    let rules = HouseRules::from_env();
    assert_eq!(rules.elder_lives, 2);
    assert_eq!(rules.cascade_ceiling, 50);
    assert!(!rules.witch_potions_reusable);
    assert!(rules.call_dead_roles);
    assert_eq!(rules.raven_curse_votes, 2);
}

#[test]
#[serial]
fn house_rules_read_from_env() {
    setup_test_env();
    clear_vars();
    env::set_var("WEREWOLF_ELDER_LIVES", "3");
    env::set_var("WEREWOLF_WITCH_POTIONS_REUSABLE", "true");
    env::set_var("WEREWOLF_CALL_DEAD_ROLES", "false");
    env::set_var("WEREWOLF_MAYOR_VOTE_WEIGHT", "3");

    let rules = HouseRules::from_env();
    assert_eq!(rules.elder_lives, 3);
    assert!(rules.witch_potions_reusable);
    assert!(!rules.call_dead_roles);
    assert_eq!(rules.mayor_vote_weight, 3);
    clear_vars();
}

#[test]
#[serial]
fn malformed_env_values_fall_back() {
    setup_test_env();
    clear_vars();
    env::set_var("WEREWOLF_ELDER_LIVES", "many");
    env::set_var("WEREWOLF_CASCADE_CEILING", "0");

    let rules = HouseRules::from_env();
    assert_eq!(rules.elder_lives, 2);
    assert_eq!(rules.cascade_ceiling, 50);
    clear_vars();
}

#[test]
fn setup_parses_and_checks_from_json() {
    let json = r#"{
        "role_counts": {"comedian": 1, "simple-werewolf": 2, "mystery-role": 1},
        "comedian_pool": ["seer", "witch", "hunter"]
    }"#;
    let setup: Setup = serde_json::from_str(json).unwrap();
    assert_eq!(setup.role_counts.get(&Role::SimpleVillager), Some(&1));
    assert_eq!(setup.comedian_pool, vec![Role::Seer, Role::Witch, Role::Hunter]);
    assert!(setup.check(RoleCatalog::standard(), 8).is_empty());

    assert_eq!(
        setup.check(RoleCatalog::standard(), 3),
        vec![SetupWarning::Overflow { cards: 4, seats: 3 }]
    );
}

#[test]
fn catalog_loads_from_json() {
    let json = serde_json::to_string(RoleCatalog::standard().definitions()).unwrap();
    let catalog = RoleCatalog::from_json(&json).unwrap();
    assert_eq!(&catalog, RoleCatalog::standard());
}
