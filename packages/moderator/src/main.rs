use anyhow::Context;
use dotenvy::dotenv;
use env_logger::Builder;
use log::LevelFilter;
use serde::Deserialize;

use moderator::models::night::StepKind;
use moderator::{distribute, HouseRules, Player, PlayerId, Role, RoleCatalog, Setup};

/// Table description read from the command line: player names plus the
/// role setup.
#[derive(Debug, Deserialize)]
struct Table {
    players: Vec<String>,
    #[serde(flatten)]
    setup: Setup,
}

impl Table {
    fn default_ten() -> Self {
        Self {
            players: (1..=10).map(|n| format!("Player{}", n)).collect(),
            setup: Setup::with_counts([(Role::SimpleWerewolf, 2), (Role::Seer, 1)]),
        }
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .format_timestamp(Some(env_logger::TimestampPrecision::Millis))
        .format_target(true)
        .init();
}

fn load_table(path: Option<&str>) -> anyhow::Result<Table> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read setup file {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("invalid setup file {}", path))
        }
        None => Ok(Table::default_ten()),
    }
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenv() {
        eprintln!("Warning: could not load .env file: {}", e);
    }

    let rules = HouseRules::from_env();
    init_logger(rules.verbose_logging);

    let args: Vec<String> = std::env::args().collect();
    let table = load_table(args.get(1).map(String::as_str))?;
    let catalog = match args.get(2) {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read catalog {}", path))?;
            RoleCatalog::from_json(&raw)?
        }
        None => RoleCatalog::standard().clone(),
    };

    let roster: Vec<Player> = table
        .players
        .iter()
        .enumerate()
        .map(|(seat, name)| Player::new(PlayerId::generate(), name.clone(), seat))
        .collect();

    let mut game = distribute(roster, &table.setup, &catalog, &rules, &mut rand::thread_rng());
    game.begin_first_night()?;

    println!("Roster:");
    for player in &game.players {
        println!("  {:<20} {}", player.label(), game.catalog.name(player.role));
    }
    if !game.undealt.is_empty() {
        let undealt: Vec<&str> = game.undealt.iter().map(|r| game.catalog.name(*r)).collect();
        println!("Undealt: {}", undealt.join(", "));
    }

    println!("Night {} wake order:", game.turn);
    for step in game.night_plan() {
        let title = match step.kind {
            StepKind::Role(Role::SimpleWerewolf) => "Werewolves".to_string(),
            StepKind::Role(role) => game.catalog.name(role).to_string(),
            StepKind::LoversRecognition => "Lovers".to_string(),
            StepKind::InfectDecision => "Infection".to_string(),
        };
        let actors: Vec<String> = game
            .step_actors(&step)
            .iter()
            .map(|id| game.label_of(id))
            .collect();
        println!("  {:<16} {}", title, actors.join(", "));
    }

    Ok(())
}
