//! Core type definitions for windows and workspaces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generates a numeric compositor ID newtype with common trait implementations.
macro_rules! define_numeric_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Wraps a raw compositor ID.
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw ID.
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_numeric_id!(
    /// A compositor window identifier.
    ///
    /// Stable for the lifetime of the window; never reused while the window exists.
    WindowId
);

define_numeric_id!(
    /// A compositor workspace identifier.
    WorkspaceId
);

/// A managed window as last reported by the compositor.
///
/// Windows are replaced wholesale on every change event, never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub id: WindowId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub app_id: Option<String>,
    /// Owning process, if the compositor knows it.
    #[serde(default)]
    pub pid: Option<u32>,
    /// Workspace the window belongs to. Absent for windows the compositor
    /// has not placed yet.
    #[serde(default)]
    pub workspace_id: Option<WorkspaceId>,
    #[serde(default)]
    pub is_focused: bool,
    #[serde(default)]
    pub is_floating: bool,
    #[serde(default)]
    pub is_urgent: bool,
}

impl Window {
    /// Creates an unfocused tiled window with no title or owner.
    pub const fn new(id: WindowId, workspace_id: Option<WorkspaceId>) -> Self {
        Self {
            id,
            title: None,
            app_id: None,
            pid: None,
            workspace_id,
            is_focused: false,
            is_floating: false,
            is_urgent: false,
        }
    }

    /// Returns the title, or an empty string when the window has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}
