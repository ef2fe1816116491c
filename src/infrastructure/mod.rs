pub mod config;
pub mod database;
pub mod delivery;
pub mod encryption;
