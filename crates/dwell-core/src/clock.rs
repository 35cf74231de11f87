//! Timestamps for the events the engine applies.
//!
//! Idle events carry the instant the idle monitor recorded. Compositor events
//! carry none, so the caller decides what "now" means for them: wall-clock
//! time for live sources, recorded time when replaying.

use chrono::{DateTime, Utc};

use crate::event::Event;

/// Picks the instant at which an event is applied.
pub trait Clock {
    fn stamp(&mut self, event: &Event) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn stamp(&mut self, _event: &Event) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Time as recorded by the idle monitor.
///
/// A compositor event is taken to have happened at the latest idle
/// timestamp seen so far, or at the start before any has been seen.
#[derive(Debug, Clone, Copy)]
pub struct RecordedClock {
    latest: DateTime<Utc>,
}

impl RecordedClock {
    pub const fn starting_at(start: DateTime<Utc>) -> Self {
        Self { latest: start }
    }

    pub const fn latest(&self) -> DateTime<Utc> {
        self.latest
    }
}

impl Clock for RecordedClock {
    fn stamp(&mut self, event: &Event) -> DateTime<Utc> {
        if let Some(timestamp) = event.timestamp() {
            self.latest = self.latest.max(timestamp);
        }
        self.latest
    }
}
