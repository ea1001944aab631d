//! CLI commands

pub mod clean;
pub mod generate;
pub mod list;
pub mod recent;
pub mod search;
pub mod show;
pub mod theme;
