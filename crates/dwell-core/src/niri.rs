//! Decoding of niri `event-stream` JSON lines.
//!
//! Each line is an externally tagged object with exactly one key, e.g.
//! `{"WindowFocusChanged":{"id":12}}`. Tags the engine does not act on are
//! decoded as [`Event::Passthrough`] so newer compositor versions keep working.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::decode::DecodeError;
use crate::event::Event;
use crate::event_type::EventTag;
use crate::types::{Window, WindowId, WorkspaceId};

#[derive(Deserialize)]
struct WindowsChanged {
    windows: Vec<Window>,
}

#[derive(Deserialize)]
struct WorkspaceActivated {
    id: WorkspaceId,
    #[serde(default)]
    focused: bool,
}

#[derive(Deserialize)]
struct WindowOpenedOrChanged {
    window: Window,
}

#[derive(Deserialize)]
struct WindowFocusChanged {
    id: Option<WindowId>,
}

#[derive(Deserialize)]
struct WindowClosed {
    id: WindowId,
}

/// Decodes a single event-stream line.
pub fn decode_line(line: &str) -> Result<Event, DecodeError> {
    let value: Value = serde_json::from_str(line).map_err(DecodeError::Json)?;
    let Value::Object(map) = value else {
        return Err(DecodeError::NotTagged);
    };

    let mut entries = map.into_iter();
    let (Some((tag, payload)), None) = (entries.next(), entries.next()) else {
        return Err(DecodeError::NotTagged);
    };

    let Ok(known) = tag.parse::<EventTag>() else {
        return Ok(Event::Passthrough { tag });
    };

    let event = match known {
        EventTag::WindowsChanged => {
            let WindowsChanged { windows } = payload_of(known, payload)?;
            Event::WindowsSnapshot { windows }
        }
        EventTag::WorkspaceActivated => {
            let WorkspaceActivated { id, focused } = payload_of(known, payload)?;
            Event::WorkspaceActivated { id, focused }
        }
        EventTag::WindowOpenedOrChanged => {
            let WindowOpenedOrChanged { window } = payload_of(known, payload)?;
            Event::WindowOpenedOrChanged { window }
        }
        EventTag::WindowFocusChanged => {
            let WindowFocusChanged { id } = payload_of(known, payload)?;
            Event::WindowFocusChanged { id }
        }
        EventTag::WindowClosed => {
            let WindowClosed { id } = payload_of(known, payload)?;
            Event::WindowClosed { id }
        }
        other => Event::Passthrough {
            tag: other.to_string(),
        },
    };
    Ok(event)
}

fn payload_of<T: DeserializeOwned>(tag: EventTag, payload: Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|source| DecodeError::Payload { tag, source })
}
