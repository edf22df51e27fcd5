//! Command-line front end for free-text time entries.
//!
//! Loads configuration and the project/client catalog, then hands entry text
//! to `hours_core`.

mod catalog;
mod cli;
pub mod commands;
mod config;

pub use catalog::Catalog;
pub use cli::{Cli, Commands, ParseArgs};
pub use config::Config;
