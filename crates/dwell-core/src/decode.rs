//! Line decoding shared by the compositor and idle-monitor sources.

use thiserror::Error;

use crate::event::Event;
use crate::event_type::EventTag;
use crate::{idle, niri};

/// A line that could not be turned into an [`Event`].
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// The line was valid JSON but not a single-key tagged object.
    #[error("expected an object with exactly one event tag")]
    NotTagged,

    #[error("malformed {tag} payload: {source}")]
    Payload {
        tag: EventTag,
        #[source]
        source: serde_json::Error,
    },

    #[error("unrecognised idle line: {0:?}")]
    IdleLine(String),

    #[error("invalid idle timestamp: {0:?}")]
    IdleTimestamp(String),
}

/// Decodes a line from either source, telling them apart by shape.
pub fn decode_any(line: &str) -> Result<Event, DecodeError> {
    if idle::is_idle_line(line) {
        idle::decode_line(line)
    } else {
        niri::decode_line(line)
    }
}
