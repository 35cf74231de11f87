//! Compositor event tags as the single source of truth for tag strings.

use std::fmt;
use std::str::FromStr;

/// Event tags emitted by the niri event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTag {
    WorkspacesChanged,
    WorkspaceUrgencyChanged,
    WorkspaceActivated,
    WorkspaceActiveWindowChanged,
    WindowsChanged,
    WindowOpenedOrChanged,
    WindowClosed,
    WindowFocusChanged,
    WindowUrgencyChanged,
    WindowLayoutsChanged,
    KeyboardLayoutsChanged,
    KeyboardLayoutSwitched,
    OverviewOpenedOrClosed,
    ConfigLoaded,
}

impl EventTag {
    /// Every known tag, in declaration order.
    pub const ALL: [Self; 14] = [
        Self::WorkspacesChanged,
        Self::WorkspaceUrgencyChanged,
        Self::WorkspaceActivated,
        Self::WorkspaceActiveWindowChanged,
        Self::WindowsChanged,
        Self::WindowOpenedOrChanged,
        Self::WindowClosed,
        Self::WindowFocusChanged,
        Self::WindowUrgencyChanged,
        Self::WindowLayoutsChanged,
        Self::KeyboardLayoutsChanged,
        Self::KeyboardLayoutSwitched,
        Self::OverviewOpenedOrClosed,
        Self::ConfigLoaded,
    ];

    /// Tag string as it appears on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkspacesChanged => "WorkspacesChanged",
            Self::WorkspaceUrgencyChanged => "WorkspaceUrgencyChanged",
            Self::WorkspaceActivated => "WorkspaceActivated",
            Self::WorkspaceActiveWindowChanged => "WorkspaceActiveWindowChanged",
            Self::WindowsChanged => "WindowsChanged",
            Self::WindowOpenedOrChanged => "WindowOpenedOrChanged",
            Self::WindowClosed => "WindowClosed",
            Self::WindowFocusChanged => "WindowFocusChanged",
            Self::WindowUrgencyChanged => "WindowUrgencyChanged",
            Self::WindowLayoutsChanged => "WindowLayoutsChanged",
            Self::KeyboardLayoutsChanged => "KeyboardLayoutsChanged",
            Self::KeyboardLayoutSwitched => "KeyboardLayoutSwitched",
            Self::OverviewOpenedOrClosed => "OverviewOpenedOrClosed",
            Self::ConfigLoaded => "ConfigLoaded",
        }
    }
}

impl fmt::Display for EventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventTag {
    type Err = UnknownEventTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownEventTag(s.to_string()))
    }
}

/// Error type for unknown event tag strings.
#[derive(Debug, Clone)]
pub struct UnknownEventTag(String);

impl UnknownEventTag {
    /// The tag that failed to parse.
    pub fn tag(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownEventTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event tag: {}", self.0)
    }
}

impl std::error::Error for UnknownEventTag {}
