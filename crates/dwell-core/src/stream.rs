//! Drives an engine from a stream of decoded events.

use std::fmt::Display;

use futures::stream::{Stream, StreamExt};

use crate::clock::Clock;
use crate::engine::Engine;
use crate::event::{ActivityEvent, Event};
use crate::process::ProcessLookup;
use crate::resolver::ResolveName;

/// Turns a stream of decoded events into the activity timeline.
///
/// Input is pulled one item at a time, only as fast as the returned stream
/// is consumed. Each event is applied at the instant `clock` gives it.
/// Decode failures are logged and skipped. The timeline ends when the input
/// ends.
pub fn activity_stream<R, P, C, S, E>(
    mut engine: Engine<R, P>,
    input: S,
    mut clock: C,
) -> impl Stream<Item = ActivityEvent>
where
    R: ResolveName,
    P: ProcessLookup,
    C: Clock,
    S: Stream<Item = Result<Event, E>>,
    E: Display,
{
    async_stream::stream! {
        let mut input = std::pin::pin!(input);
        while let Some(item) = input.next().await {
            let event = match item {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping undecodable event");
                    continue;
                }
            };

            tracing::debug!(tag = event.tag(), "event");
            let now = clock.stamp(&event);
            for activity in engine.apply(event, now) {
                yield activity;
            }
        }
        tracing::debug!("event sources ended");
    }
}
