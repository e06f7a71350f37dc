pub mod action_resolver;
pub mod day_flow;
pub mod death_resolution;
pub mod distribution;
pub mod night_planner;
pub mod victory;
pub mod voting;
pub mod witch;
