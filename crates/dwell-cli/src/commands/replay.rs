//! Replay command: run recorded event lines through the tracker.
//!
//! Lines may come from either source: `Timeout:<ms>`/`Resume:<ms>` idle
//! lines and niri event-stream JSON are told apart by shape. Durations are
//! measured in recorded time: a niri line happened at the latest idle
//! timestamp before it, and lines before the first idle line happened at
//! that first timestamp.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use dwell_core::{Engine, Event, ProcessLookup, RecordedClock, activity_stream};
use futures::{StreamExt, stream};

use super::emit;
use crate::Config;
use crate::procfs::ProcFs;
use crate::source::{self, EventStream};

pub async fn run(config: &Config, file: Option<&Path>) -> Result<()> {
    let events = match file {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("failed to open {}", path.display()))?;
            source::recorded_events(file)
        }
        None => source::recorded_events(tokio::io::stdin()),
    };

    let count = replay(config, events, ProcFs::new(), &mut std::io::stdout()).await?;
    tracing::info!(count, "replay finished");
    Ok(())
}

/// Drives the engine over `events`, writing the timeline to `out`.
/// Returns the number of activity events written.
async fn replay<P: ProcessLookup>(
    config: &Config,
    events: EventStream,
    lookup: P,
    out: &mut impl Write,
) -> Result<usize> {
    let rules = config
        .title_rules()
        .context("invalid title pattern in configuration")?;

    let (start, events) = recording_start(events).await;
    let start = start.unwrap_or_else(Utc::now);
    tracing::debug!(%start, "replay clock starts");

    let engine = Engine::new(rules, lookup, start);
    let clock = RecordedClock::starting_at(start);
    let mut timeline = std::pin::pin!(activity_stream(engine, events, clock));
    let mut count = 0;
    while let Some(event) = timeline.next().await {
        emit(out, &event)?;
        count += 1;
    }
    Ok(count)
}

/// Reads ahead to the first idle line and returns its timestamp along with
/// the untouched event sequence. A recording without idle lines is buffered
/// whole.
async fn recording_start(mut events: EventStream) -> (Option<DateTime<Utc>>, EventStream) {
    let mut buffered = Vec::new();
    while let Some(item) = events.next().await {
        let timestamp = item.as_ref().ok().and_then(Event::timestamp);
        buffered.push(item);
        if timestamp.is_some() {
            let rest: EventStream = Box::pin(stream::iter(buffered).chain(events));
            return (timestamp, rest);
        }
    }
    let rest: EventStream = Box::pin(stream::iter(buffered));
    (None, rest)
}
