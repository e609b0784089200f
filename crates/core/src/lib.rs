pub mod commands;
pub mod config;
pub mod host;
pub mod perm;
pub mod player;
