//! Best-effort process metadata for focused windows.

/// Executable and arguments of a running process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessDetails {
    pub exe_path: String,
    pub cmdline: Vec<String>,
}

/// Looks up process metadata by pid.
///
/// Lookups are best effort: a process that exited or cannot be inspected
/// yields `None`, never an error.
pub trait ProcessLookup {
    fn lookup(&self, pid: u32) -> Option<ProcessDetails>;
}

/// A lookup that never knows anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl ProcessLookup for NoLookup {
    fn lookup(&self, _pid: u32) -> Option<ProcessDetails> {
        None
    }
}
