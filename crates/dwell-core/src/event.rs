//! Input events consumed by the engine and the activity events it emits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event_type::EventTag;
use crate::idle;
use crate::types::{Window, WindowId, WorkspaceId};

/// A decoded signal from the compositor or the idle monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Full window list. Supersedes all previously known windows.
    WindowsSnapshot { windows: Vec<Window> },
    /// A workspace became active on some output.
    WorkspaceActivated { id: WorkspaceId, focused: bool },
    /// A window appeared or one of its properties changed.
    WindowOpenedOrChanged { window: Window },
    /// Keyboard focus moved. `None` when no window has focus.
    WindowFocusChanged { id: Option<WindowId> },
    WindowClosed { id: WindowId },
    /// The idle monitor's timeout fired.
    IdleTimeout { timestamp: DateTime<Utc> },
    /// Activity resumed after an idle timeout.
    IdleResume { timestamp: DateTime<Utc> },
    /// Any tag the engine does not act on, kept for logging.
    Passthrough { tag: String },
}

impl Event {
    /// Short name of the event for log lines.
    pub fn tag(&self) -> &str {
        match self {
            Self::WindowsSnapshot { .. } => EventTag::WindowsChanged.as_str(),
            Self::WorkspaceActivated { .. } => EventTag::WorkspaceActivated.as_str(),
            Self::WindowOpenedOrChanged { .. } => EventTag::WindowOpenedOrChanged.as_str(),
            Self::WindowFocusChanged { .. } => EventTag::WindowFocusChanged.as_str(),
            Self::WindowClosed { .. } => EventTag::WindowClosed.as_str(),
            Self::IdleTimeout { .. } => idle::TIMEOUT_PREFIX,
            Self::IdleResume { .. } => idle::RESUME_PREFIX,
            Self::Passthrough { tag } => tag,
        }
    }

    /// The instant recorded by the source itself. Only idle events have one.
    pub const fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::IdleTimeout { timestamp } | Self::IdleResume { timestamp } => Some(*timestamp),
            _ => None,
        }
    }
}

/// A point on the activity timeline.
///
/// Every variant carries the name that was current and how long it lasted,
/// in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActivityEvent {
    /// The resolved activity name changed. `duration_ms` is the time spent
    /// on the previous name.
    NameChange {
        at: DateTime<Utc>,
        name: Option<String>,
        duration_ms: i64,
    },
    /// Keyboard focus moved to another window. `duration_ms` is the dwell
    /// time on the previously focused window.
    FocusChange {
        at: DateTime<Utc>,
        window_id: Option<WindowId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        app_id: Option<String>,
        name: Option<String>,
        duration_ms: i64,
        /// Executable of the newly focused window's process. Empty if unknown.
        exe_path: String,
        /// Arguments of the newly focused window's process. Empty if unknown.
        cmdline: Vec<String>,
    },
    /// The idle timeout fired while `name` was current.
    TimeoutFlush {
        at: DateTime<Utc>,
        name: Option<String>,
        duration_ms: i64,
    },
}

impl ActivityEvent {
    /// The activity name carried by this event.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::NameChange { name, .. }
            | Self::FocusChange { name, .. }
            | Self::TimeoutFlush { name, .. } => name.as_deref(),
        }
    }

    pub const fn duration_ms(&self) -> i64 {
        match self {
            Self::NameChange { duration_ms, .. }
            | Self::FocusChange { duration_ms, .. }
            | Self::TimeoutFlush { duration_ms, .. } => *duration_ms,
        }
    }
}
