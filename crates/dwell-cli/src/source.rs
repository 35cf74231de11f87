//! Line sources: subprocess stdout, files and stdin as streams of lines.

use std::io;
use std::pin::Pin;
use std::process::Stdio;

use anyhow::{Context, Result};
use dwell_core::{DecodeError, Event, decode_any, idle, niri};
use futures::stream::{Stream, StreamExt};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio_stream::wrappers::LinesStream;

/// A stream of trimmed, non-empty lines.
pub type LineStream = Pin<Box<dyn Stream<Item = io::Result<String>> + Send>>;

/// A stream of decoded events, ready for merging.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event, anyhow::Error>> + Send>>;

/// Splits a reader into lines, dropping blank ones.
///
/// The stream ends after the first read error.
pub fn read_lines<R>(reader: R) -> LineStream
where
    R: AsyncRead + Send + Unpin + 'static,
{
    let mut lines = LinesStream::new(BufReader::new(reader).lines());
    Box::pin(async_stream::stream! {
        while let Some(line) = lines.next().await {
            match line {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        yield Ok(line.to_string());
                    }
                }
                Err(err) => {
                    yield Err(err);
                    break;
                }
            }
        }
    })
}

/// Spawns `program` and streams its stdout line by line.
///
/// The child is killed when the stream is dropped.
pub fn spawn_lines(program: &str, args: &[String]) -> Result<LineStream> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("failed to spawn {program}"))?;
    let stdout = child
        .stdout
        .take()
        .with_context(|| format!("{program} stdout was not captured"))?;

    tracing::info!(program, ?args, pid = ?child.id(), "spawned event source");

    let program = program.to_string();
    let lines = read_lines(stdout);
    Ok(Box::pin(async_stream::stream! {
        let _child = child;
        for await line in lines {
            yield line;
        }
        tracing::debug!(%program, "event source closed");
    }))
}

/// Decodes lines with `decode`, tagging failures with the source name.
pub fn decode_lines<F>(source: &'static str, lines: LineStream, decode: F) -> EventStream
where
    F: Fn(&str) -> Result<Event, DecodeError> + Send + 'static,
{
    Box::pin(lines.map(move |line| {
        let line = line.with_context(|| format!("failed to read {source} output"))?;
        tracing::trace!(source, %line, "raw event");
        decode(&line).with_context(|| format!("{source}: {line}"))
    }))
}

/// Compositor events from a spawned event-stream command.
pub fn niri_events(command: &[String]) -> Result<EventStream> {
    let (program, args) = command
        .split_first()
        .context("niri_command must name a program")?;
    Ok(decode_lines("niri", spawn_lines(program, args)?, niri::decode_line))
}

/// Idle events from a spawned idle monitor.
pub fn idle_events(program: &str, timeout_secs: u32) -> Result<EventStream> {
    let lines = spawn_lines(program, &idle::swayidle_args(timeout_secs))?;
    Ok(decode_lines("swayidle", lines, idle::decode_line))
}

/// Recorded events of either kind, told apart line by line.
pub fn recorded_events<R>(reader: R) -> EventStream
where
    R: AsyncRead + Send + Unpin + 'static,
{
    decode_lines("replay", read_lines(reader), decode_any)
}
