//! Process execution layer
//!
//! This module provides the runner abstraction the client drives, and the
//! subprocess implementation that launches `docker compose` through a shell.

pub mod completion;
pub mod sink;
pub mod subprocess;

use crate::error::Result;

/// Launches one command line and reports its outcome asynchronously
///
/// A runner is used for a single invocation. Sinks that are never set cause
/// the corresponding stream to be discarded.
pub trait Runner: Send {
    /// Send standard output to `sink`
    fn set_stdout(&mut self, sink: OutputSink);

    /// Send standard error to `sink`
    fn set_stderr(&mut self, sink: OutputSink);

    /// Start `command_line` without waiting for it to finish
    ///
    /// # Errors
    /// Returns [`ComposeError::Spawn`](crate::ComposeError::Spawn) if the
    /// process could not be started; no completion exists in that case.
    fn run(&mut self, command_line: &str) -> Result<Completion>;
}

pub use completion::{Completion, CompletionSender};
pub use sink::{OutputSink, SharedBuffer};
pub use subprocess::{ProcessCommand, ProcessRunner, Spawner, TokioSpawner};
