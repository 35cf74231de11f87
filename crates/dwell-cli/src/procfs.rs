//! Process metadata from `/proc`.

use std::fs;
use std::io;
use std::path::PathBuf;

use dwell_core::{ProcessDetails, ProcessLookup};

/// Reads executable paths and command lines from a procfs mount.
#[derive(Debug, Clone)]
pub struct ProcFs {
    root: PathBuf,
}

impl ProcFs {
    pub fn new() -> Self {
        Self::with_root("/proc")
    }

    /// Uses a different procfs root, e.g. a fixture directory in tests.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn read(&self, pid: u32) -> io::Result<ProcessDetails> {
        let dir = self.root.join(pid.to_string());
        let exe_path = fs::read_link(dir.join("exe"))?
            .to_string_lossy()
            .into_owned();
        let raw = fs::read(dir.join("cmdline"))?;
        let cmdline = raw
            .split(|byte| *byte == 0)
            .filter(|arg| !arg.is_empty())
            .map(|arg| String::from_utf8_lossy(arg).into_owned())
            .collect();

        Ok(ProcessDetails { exe_path, cmdline })
    }
}

impl Default for ProcFs {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLookup for ProcFs {
    fn lookup(&self, pid: u32) -> Option<ProcessDetails> {
        match self.read(pid) {
            Ok(details) => Some(details),
            Err(err) => {
                tracing::debug!(pid, error = %err, "process lookup failed");
                None
            }
        }
    }
}
