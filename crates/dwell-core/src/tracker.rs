//! Dwell-time clocks for the current activity name and the focused window.

use chrono::{DateTime, Utc};

use crate::event::ActivityEvent;
use crate::types::WindowId;

/// Time spent on the previously focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusDwell {
    pub previous: Option<WindowId>,
    pub duration_ms: i64,
}

/// Current activity name and focused window, each with its own clock.
///
/// A focus change does not imply a name change and vice versa, so the two
/// baselines move independently.
#[derive(Debug, Clone)]
pub struct ActivityTracker {
    name: Option<String>,
    name_since: DateTime<Utc>,
    focused: Option<WindowId>,
    focus_since: DateTime<Utc>,
}

impl ActivityTracker {
    /// Starts both clocks at `now` with no name and no focused window.
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: None,
            name_since: now,
            focused: None,
            focus_since: now,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Records the latest resolved name.
    ///
    /// Emits a [`ActivityEvent::NameChange`] only when the name differs from
    /// the current one; `None` is a value of its own.
    pub fn record_name(
        &mut self,
        name: Option<String>,
        now: DateTime<Utc>,
    ) -> Option<ActivityEvent> {
        if self.name == name {
            return None;
        }
        let duration_ms = elapsed_ms(self.name_since, now);
        self.name.clone_from(&name);
        advance(&mut self.name_since, now);
        Some(ActivityEvent::NameChange {
            at: now,
            name,
            duration_ms,
        })
    }

    /// Records the focused window. Returns the dwell on the previous window
    /// when focus actually moved.
    pub fn record_focus(&mut self, id: Option<WindowId>, now: DateTime<Utc>) -> Option<FocusDwell> {
        if self.focused == id {
            return None;
        }
        let dwell = FocusDwell {
            previous: self.focused,
            duration_ms: elapsed_ms(self.focus_since, now),
        };
        self.focused = id;
        advance(&mut self.focus_since, now);
        Some(dwell)
    }

    /// Reports the time spent on the current name and restarts its clock.
    /// The name itself is kept.
    pub fn flush(&mut self, now: DateTime<Utc>) -> ActivityEvent {
        let duration_ms = elapsed_ms(self.name_since, now);
        advance(&mut self.name_since, now);
        ActivityEvent::TimeoutFlush {
            at: now,
            name: self.name.clone(),
            duration_ms,
        }
    }

    /// Restarts both clocks without reporting, discarding the idle period.
    pub fn on_resume(&mut self, now: DateTime<Utc>) {
        advance(&mut self.name_since, now);
        advance(&mut self.focus_since, now);
    }
}

/// Milliseconds from `since` to `now`. Clock skew between sources never
/// yields a negative duration.
fn elapsed_ms(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_milliseconds().max(0)
}

/// Moves a baseline up to `now`. An older stamp leaves it where it is, so
/// time already reported is not counted again.
fn advance(since: &mut DateTime<Utc>, now: DateTime<Utc>) {
    *since = (*since).max(now);
}
