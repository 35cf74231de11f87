//! Activity tracker CLI library.
//!
//! This crate wires the core engine to the niri and swayidle processes.

mod cli;
pub mod commands;
mod config;
pub mod procfs;
pub mod source;

pub use cli::{Cli, Commands};
pub use config::Config;
