//! Decoding of idle-monitor lines.
//!
//! The idle monitor is started with commands that echo `Timeout:<epoch-ms>`
//! and `Resume:<epoch-ms>`.

use chrono::DateTime;

use crate::decode::DecodeError;
use crate::event::Event;

pub(crate) const TIMEOUT_PREFIX: &str = "Timeout";
pub(crate) const RESUME_PREFIX: &str = "Resume";

/// Builds the shell snippet the idle monitor runs for `kind`.
pub fn echo_command(kind: &str) -> String {
    format!("echo {kind}:$(date +%s%3N)")
}

/// Arguments for `swayidle` that make it report timeouts and resumes on stdout.
pub fn swayidle_args(timeout_secs: u32) -> Vec<String> {
    vec![
        "timeout".to_string(),
        timeout_secs.to_string(),
        echo_command(TIMEOUT_PREFIX),
        "resume".to_string(),
        echo_command(RESUME_PREFIX),
    ]
}

/// Whether a line looks like idle-monitor output rather than compositor JSON.
pub fn is_idle_line(line: &str) -> bool {
    line.split_once(':')
        .is_some_and(|(kind, _)| kind == TIMEOUT_PREFIX || kind == RESUME_PREFIX)
}

/// Decodes a single idle-monitor line.
pub fn decode_line(line: &str) -> Result<Event, DecodeError> {
    let line = line.trim();
    let Some((kind, stamp)) = line.split_once(':') else {
        return Err(DecodeError::IdleLine(line.to_string()));
    };

    let timestamp = stamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .ok_or_else(|| DecodeError::IdleTimestamp(stamp.to_string()))?;

    match kind {
        TIMEOUT_PREFIX => Ok(Event::IdleTimeout { timestamp }),
        RESUME_PREFIX => Ok(Event::IdleResume { timestamp }),
        _ => Err(DecodeError::IdleLine(line.to_string())),
    }
}
