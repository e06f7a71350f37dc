pub mod catalog;
pub mod config;
pub mod death;
pub mod game;
pub mod log;
pub mod night;
pub mod player;
pub mod role;
pub mod victory;
pub mod witch;
