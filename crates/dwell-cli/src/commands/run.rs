//! Run command: track activity from the live compositor and idle monitor.

use std::pin::pin;

use anyhow::{Context, Result};
use chrono::Utc;
use dwell_core::{Engine, SystemClock, activity_stream, merge};
use futures::StreamExt;

use super::emit;
use crate::Config;
use crate::procfs::ProcFs;
use crate::source;

/// Seconds of inactivity before the idle monitor reports a timeout.
const IDLE_TIMEOUT_SECS: u32 = 2;

pub async fn run(config: &Config) -> Result<()> {
    let rules = config
        .title_rules()
        .context("invalid title pattern in configuration")?;

    let niri = source::niri_events(&config.niri_command)?;
    let idle = source::idle_events(&config.swayidle_command, IDLE_TIMEOUT_SECS)?;

    let engine = Engine::new(rules, ProcFs::new(), Utc::now());
    let mut timeline = pin!(activity_stream(engine, merge(niri, idle), SystemClock));
    let mut shutdown = pin!(shutdown_signal());
    let mut stdout = std::io::stdout();

    tracing::info!("tracking activity");
    loop {
        tokio::select! {
            next = timeline.next() => match next {
                Some(event) => emit(&mut stdout, &event)?,
                None => {
                    tracing::info!("event sources closed");
                    break;
                }
            },
            () = &mut shutdown => {
                tracing::info!("shutting down");
                break;
            }
        }
    }

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
