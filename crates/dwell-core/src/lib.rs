//! Core activity tracking for the niri compositor.
//!
//! This crate contains the types and logic for:
//! - Decoding: turning niri event-stream and idle-monitor lines into events
//! - Registry: keeping windows and their workspace membership consistent
//! - Resolution: naming the current activity from window titles
//! - Tracking: measuring dwell time per name and per focused window
//! - Clocks: wall-clock time live, recorded idle timestamps on replay
//! - Merging: fair fan-in of the two event sources into one timeline

mod clock;
mod decode;
mod engine;
mod event;
pub mod event_type;
pub mod idle;
mod merge;
pub mod niri;
mod process;
mod registry;
mod resolver;
mod stream;
mod tracker;
mod types;

pub use clock::{Clock, RecordedClock, SystemClock};
pub use decode::{DecodeError, decode_any};
pub use engine::Engine;
pub use event::{ActivityEvent, Event};
pub use event_type::{EventTag, UnknownEventTag};
pub use merge::{Merge, merge};
pub use process::{NoLookup, ProcessDetails, ProcessLookup};
pub use registry::WindowRegistry;
pub use resolver::{DEFAULT_TITLE_PATTERN, ResolveName, RuleError, TitleRules};
pub use stream::activity_stream;
pub use tracker::{ActivityTracker, FocusDwell};
pub use types::{Window, WindowId, WorkspaceId};
