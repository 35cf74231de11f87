//! Resolve command: test a window title against the configured patterns.

use anyhow::{Context, Result};
use dwell_core::ResolveName;

use crate::Config;

pub fn run(config: &Config, title: &str) -> Result<()> {
    let rules = config
        .title_rules()
        .context("invalid title pattern in configuration")?;

    match rules.resolve(title) {
        Some(name) => println!("{name}"),
        None => tracing::info!(title, "no pattern matched"),
    }
    Ok(())
}
