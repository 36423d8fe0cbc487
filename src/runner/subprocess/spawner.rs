//! Process spawning seam and its tokio implementation

use std::io;
use std::path::Path;
use std::process::Stdio;

use futures::future::BoxFuture;
use tokio::io::{AsyncRead, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

use crate::error::{ComposeError, Result};
use crate::runner::sink::OutputSink;

/// Creates process commands
///
/// The production implementation is [`TokioSpawner`]; tests substitute
/// their own to avoid launching real programs.
pub trait Spawner: Send + Sync {
    /// Prepare `program` with `args` without starting it
    fn command(&self, program: &str, args: &[String]) -> Box<dyn ProcessCommand>;
}

/// A prepared process that can be started once and waited on once
pub trait ProcessCommand: Send {
    /// Send standard output to `sink` instead of discarding it
    fn stdout(&mut self, sink: OutputSink);

    /// Send standard error to `sink` instead of discarding it
    fn stderr(&mut self, sink: OutputSink);

    /// Run the process in `dir`
    fn current_dir(&mut self, dir: &Path);

    /// Add an environment variable for the process
    fn env(&mut self, key: &str, value: &str);

    /// Launch the process
    ///
    /// # Errors
    /// Returns the OS error if the process could not be started
    fn start(&mut self) -> io::Result<()>;

    /// Wait for the process to exit
    ///
    /// Resolves to `Ok(())` on a zero exit status and to
    /// [`ComposeError::Execution`] otherwise. All output has been delivered
    /// to the sinks by the time it resolves.
    fn wait(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
}

/// [`Spawner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn command(&self, program: &str, args: &[String]) -> Box<dyn ProcessCommand> {
        Box::new(TokioCommand::new(program, args))
    }
}

/// [`ProcessCommand`] backed by `tokio::process::Command`
pub struct TokioCommand {
    command: Command,
    stdout: Option<OutputSink>,
    stderr: Option<OutputSink>,
    child: Option<Child>,
    pumps: Vec<JoinHandle<io::Result<u64>>>,
}

impl TokioCommand {
    /// Prepare `program` with `args`
    #[must_use]
    pub fn new(program: &str, args: &[String]) -> Self {
        let mut command = Command::new(program);
        command.args(args);

        Self {
            command,
            stdout: None,
            stderr: None,
            child: None,
            pumps: Vec::new(),
        }
    }
}

impl std::fmt::Debug for TokioCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioCommand")
            .field("command", &self.command)
            .field("stdout", &self.stdout.as_ref().map(|_| "<sink>"))
            .field("stderr", &self.stderr.as_ref().map(|_| "<sink>"))
            .field("started", &self.child.is_some())
            .finish()
    }
}

impl ProcessCommand for TokioCommand {
    fn stdout(&mut self, sink: OutputSink) {
        self.stdout = Some(sink);
    }

    fn stderr(&mut self, sink: OutputSink) {
        self.stderr = Some(sink);
    }

    fn current_dir(&mut self, dir: &Path) {
        self.command.current_dir(dir);
    }

    fn env(&mut self, key: &str, value: &str) {
        self.command.env(key, value);
    }

    fn start(&mut self) -> io::Result<()> {
        if self.child.is_some() {
            return Err(io::Error::other("process already started"));
        }

        // Unset streams are discarded, never inherited from the parent
        self.command
            .stdin(Stdio::null())
            .stdout(stdio_for(self.stdout.is_some()))
            .stderr(stdio_for(self.stderr.is_some()));

        let mut child = self.command.spawn()?;

        if let (Some(pipe), Some(sink)) = (child.stdout.take(), self.stdout.take()) {
            self.pumps.push(pump(pipe, sink));
        }

        if let (Some(pipe), Some(sink)) = (child.stderr.take(), self.stderr.take()) {
            self.pumps.push(pump(pipe, sink));
        }

        self.child = Some(child);
        Ok(())
    }

    fn wait(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        let TokioCommand { child, pumps, .. } = *self;
        Box::pin(wait_for_exit(child, pumps))
    }
}

async fn wait_for_exit(
    child: Option<Child>,
    pumps: Vec<JoinHandle<io::Result<u64>>>,
) -> Result<()> {
    let Some(mut child) = child else {
        return Err(ComposeError::runner("process was never started"));
    };

    let status = child.wait().await?;

    // Drain the output pumps so sinks are complete before reporting
    let mut pump_error = None;
    for handle in pumps {
        let outcome = match handle.await {
            Ok(Ok(_)) => continue,
            Ok(Err(e)) => ComposeError::Io(e),
            Err(e) => ComposeError::runner(format!("output pump failed: {e}")),
        };
        pump_error.get_or_insert(outcome);
    }

    if !status.success() {
        return Err(ComposeError::from_status(status));
    }

    match pump_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn stdio_for(captured: bool) -> Stdio {
    if captured {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

fn pump<R>(mut pipe: R, mut sink: OutputSink) -> JoinHandle<io::Result<u64>>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    tokio::spawn(async move {
        let copied = tokio::io::copy(&mut pipe, &mut sink).await?;
        sink.flush().await?;
        Ok(copied)
    })
}
