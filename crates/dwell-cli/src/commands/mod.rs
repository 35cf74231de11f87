//! CLI subcommand implementations.

pub mod replay;
pub mod resolve;
pub mod run;

use std::io::Write;

use anyhow::{Context, Result};
use dwell_core::ActivityEvent;

/// Writes one activity event as a JSON line on stdout.
fn emit(out: &mut impl Write, event: &ActivityEvent) -> Result<()> {
    let json = serde_json::to_string(event).context("failed to serialize activity event")?;
    writeln!(out, "{json}").context("failed to write activity event")?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}
