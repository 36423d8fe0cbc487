//! Shell-backed process runner

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ComposeError, Result};
use crate::runner::Runner;
use crate::runner::completion::Completion;
use crate::runner::sink::OutputSink;

use super::config::{SHELL, SHELL_COMMAND_FLAG, is_allowed_env};
use super::spawner::{Spawner, TokioSpawner};

/// Runs one command line through the system shell
///
/// A runner owns a single invocation. Configure the sinks, then call
/// [`Runner::run`]; the sinks are handed to the process at that point.
pub struct ProcessRunner {
    spawner: Arc<dyn Spawner>,
    stdout: Option<OutputSink>,
    stderr: Option<OutputSink>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl ProcessRunner {
    /// Create a runner that launches real processes
    #[must_use]
    pub fn new() -> Self {
        Self::with_spawner(Arc::new(TokioSpawner))
    }

    /// Create a runner that launches processes through `spawner`
    #[must_use]
    pub fn with_spawner(spawner: Arc<dyn Spawner>) -> Self {
        Self {
            spawner,
            stdout: None,
            stderr: None,
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Run the shell in `dir`
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Add an environment variable for the shell
    ///
    /// Variables listed in [`DANGEROUS_ENV_VARS`](super::config::DANGEROUS_ENV_VARS)
    /// are dropped.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        if is_allowed_env(&key) {
            self.env.push((key, value.into()));
        } else {
            log::warn!("Refusing to forward environment variable {key} to subprocess");
        }
        self
    }

    fn spawn_error(&self, command_line: &str, source: io::Error) -> ComposeError {
        if let Some(ref cwd) = self.cwd {
            if !cwd.exists() {
                return ComposeError::spawn(
                    command_line,
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("working directory does not exist: {}", cwd.display()),
                    ),
                );
            }
        }
        ComposeError::spawn(command_line, source)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRunner")
            .field("stdout", &self.stdout.as_ref().map(|_| "<sink>"))
            .field("stderr", &self.stderr.as_ref().map(|_| "<sink>"))
            .field("cwd", &self.cwd)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl Runner for ProcessRunner {
    fn set_stdout(&mut self, sink: OutputSink) {
        self.stdout = Some(sink);
    }

    fn set_stderr(&mut self, sink: OutputSink) {
        self.stderr = Some(sink);
    }

    fn run(&mut self, command_line: &str) -> Result<Completion> {
        let args = [SHELL_COMMAND_FLAG.to_string(), command_line.to_string()];
        let mut command = self.spawner.command(SHELL, &args);

        if let Some(sink) = self.stdout.take() {
            command.stdout(sink);
        }
        if let Some(sink) = self.stderr.take() {
            command.stderr(sink);
        }
        if let Some(ref cwd) = self.cwd {
            command.current_dir(cwd);
        }
        for (key, value) in &self.env {
            command.env(key, value);
        }

        if let Err(e) = command.start() {
            log::warn!("Failed to start `{command_line}`: {e}");
            return Err(self.spawn_error(command_line, e));
        }

        log::debug!("Started `{command_line}`");

        let (tx, completion) = Completion::channel();
        let command_line = command_line.to_string();

        tokio::spawn(async move {
            let result = command.wait().await;
            match result {
                Ok(()) => log::debug!("`{command_line}` exited successfully"),
                Err(ref e) => log::warn!("`{command_line}` failed: {e}"),
            }
            tx.complete(result);
        });

        Ok(completion)
    }
}
