//! `ComposeClient` implementation

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{ComposeError, Result};
use crate::runner::{
    Completion, OutputSink, ProcessRunner, Runner, SharedBuffer, Spawner, TokioSpawner,
};
use crate::types::options::GlobalOptions;

use super::command::{CommandBuilder, query_flags};

/// Program invoked when none is configured
pub const DEFAULT_PROGRAM: &str = "docker compose";

/// Name of the Docker CLI binary
const DOCKER_BINARY: &str = "docker";

/// Install directories searched after `PATH`
const DOCKER_INSTALL_DIRS: &[&str] = &[
    "/usr/local/bin",
    "/usr/bin",
    "/opt/homebrew/bin",
    "/Applications/Docker.app/Contents/Resources/bin",
];

/// Creates a fresh [`Runner`] for every invocation
pub type RunnerFactory = Arc<dyn Fn() -> Box<dyn Runner> + Send + Sync>;

/// Client for executing `docker compose` commands
///
/// Every call builds its own command line and runner; calls share nothing
/// but the client's configuration and can run concurrently.
#[derive(Clone)]
pub struct ComposeClient {
    options: GlobalOptions,
    program: String,
    new_runner: RunnerFactory,
}

impl ComposeClient {
    /// Create a client that runs `docker compose` with `options`
    #[must_use]
    pub fn new(options: GlobalOptions) -> Self {
        Self::builder().options(options).build()
    }

    /// Create a new builder for `ComposeClient`
    #[must_use]
    pub fn builder() -> ComposeClientBuilder {
        ComposeClientBuilder::default()
    }

    /// Base options applied to every invocation
    #[must_use]
    pub fn options(&self) -> &GlobalOptions {
        &self.options
    }

    /// Program prefix of every command line
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The command line `run_command` would execute, without running it
    #[must_use]
    pub fn command_line(&self, subcommand: &str, flags: &str, overrides: &[GlobalOptions]) -> String {
        CommandBuilder::new(&self.program, &self.options, overrides).build(subcommand, flags)
    }

    /// Execute a `docker compose` subcommand
    ///
    /// `flags` is the pre-formatted, subcommand-specific part of the command
    /// line. Output streams without a sink are discarded. Returns as soon as
    /// the process is launched; await the [`Completion`] for its outcome.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`ComposeError::Spawn`] if the process could not be started
    pub fn run_command(
        &self,
        subcommand: &str,
        flags: &str,
        stdout: Option<OutputSink>,
        stderr: Option<OutputSink>,
        overrides: &[GlobalOptions],
    ) -> Result<Completion> {
        let command_line = self.command_line(subcommand, flags, overrides);
        log::debug!("Running: {command_line}");

        let mut runner = (self.new_runner)();

        if let Some(sink) = stdout {
            runner.set_stdout(sink);
        }

        if let Some(sink) = stderr {
            runner.set_stderr(sink);
        }

        runner.run(&command_line)
    }

    /// Execute a JSON-producing subcommand and return its standard output
    ///
    /// `--format json` is appended unless `flags` already selects a format.
    /// Output is read line by line and the lines are concatenated without
    /// their terminators, so the result suits single-document JSON payloads
    /// rather than byte-exact output.
    ///
    /// # Errors
    /// Returns the spawn error, or the error the process exited with; no
    /// output is returned in either case
    pub async fn run_query(
        &self,
        subcommand: &str,
        flags: &str,
        overrides: &[GlobalOptions],
    ) -> Result<Vec<u8>> {
        let stdout = SharedBuffer::new();
        let flags = query_flags(flags);

        let completion =
            self.run_command(subcommand, &flags, Some(stdout.sink()), None, overrides)?;
        completion.await?;

        Ok(concat_lines(&stdout.contents()))
    }

    /// Locate the `docker` binary on `PATH` or in a standard install directory
    ///
    /// # Errors
    /// Returns [`ComposeError::ProgramNotFound`] if no executable is found
    pub fn find_docker() -> Result<PathBuf> {
        let mut dirs: Vec<PathBuf> = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        dirs.extend(DOCKER_INSTALL_DIRS.iter().map(PathBuf::from));
        if let Some(home) = env::var_os("HOME") {
            dirs.push(PathBuf::from(home).join(".docker/bin"));
        }

        let search_path = env::join_paths(dirs)
            .map_err(|e| ComposeError::runner(format!("invalid search path: {e}")))?;
        Self::find_docker_in(search_path)
    }

    /// Locate the `docker` binary in the directories of `search_path`
    ///
    /// `search_path` uses the platform's `PATH` syntax.
    ///
    /// # Errors
    /// Returns [`ComposeError::ProgramNotFound`] if no executable is found
    pub fn find_docker_in(search_path: impl AsRef<OsStr>) -> Result<PathBuf> {
        let cwd = env::current_dir()?;
        which::which_in(DOCKER_BINARY, Some(search_path), cwd).map_err(|e| {
            log::debug!("docker lookup failed: {e}");
            ComposeError::program_not_found()
        })
    }
}

impl std::fmt::Debug for ComposeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeClient")
            .field("options", &self.options)
            .field("program", &self.program)
            .field("new_runner", &"<factory>")
            .finish()
    }
}

/// Join newline-delimited lines, dropping each line's terminator
fn concat_lines(output: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(output.len());

    for line in output.split(|&b| b == b'\n') {
        result.extend_from_slice(line.strip_suffix(b"\r").unwrap_or(line));
    }

    result
}

// ============================================================================
// Builder for ComposeClient
// ============================================================================

/// Builder for `ComposeClient`
#[derive(Default)]
pub struct ComposeClientBuilder {
    options: GlobalOptions,
    program: Option<String>,
    current_dir: Option<PathBuf>,
    env: Vec<(String, String)>,
    spawner: Option<Arc<dyn Spawner>>,
    runner_factory: Option<RunnerFactory>,
}

impl ComposeClientBuilder {
    /// Set base global options
    #[must_use]
    pub fn options(mut self, options: GlobalOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the program prefix (default: `docker compose`)
    ///
    /// Use `docker-compose` for the standalone v1 binary, or
    /// [`locate_docker`](Self::locate_docker) to pin an absolute path.
    #[must_use]
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Run the `compose` plugin of the `docker` binary found by
    /// [`ComposeClient::find_docker`]
    ///
    /// # Errors
    /// Returns [`ComposeError::ProgramNotFound`] if `docker` is not installed
    pub fn locate_docker(self) -> Result<Self> {
        let docker = ComposeClient::find_docker()?;
        Ok(self.docker_binary(docker))
    }

    /// Like [`locate_docker`](Self::locate_docker), searching only the
    /// directories of `search_path`
    ///
    /// # Errors
    /// Returns [`ComposeError::ProgramNotFound`] if no `docker` is found there
    pub fn locate_docker_in(self, search_path: impl AsRef<OsStr>) -> Result<Self> {
        let docker = ComposeClient::find_docker_in(search_path)?;
        Ok(self.docker_binary(docker))
    }

    fn docker_binary(self, docker: PathBuf) -> Self {
        log::debug!("Using docker at {}", docker.display());
        self.program(format!("{} compose", docker.display()))
    }

    /// Set working directory for spawned processes
    #[must_use]
    pub fn current_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(path.into());
        self
    }

    /// Add an environment variable for spawned processes
    ///
    /// Forwarded through [`ProcessRunner::env`], which drops variables that
    /// alter how the shell loads code.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Launch processes through `spawner` instead of `tokio::process`
    #[must_use]
    pub fn spawner(mut self, spawner: Arc<dyn Spawner>) -> Self {
        self.spawner = Some(spawner);
        self
    }

    /// Create runners with `factory`
    ///
    /// Takes precedence over [`current_dir`](Self::current_dir),
    /// [`env`](Self::env) and [`spawner`](Self::spawner).
    #[must_use]
    pub fn runner_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Runner> + Send + Sync + 'static,
    {
        self.runner_factory = Some(Arc::new(factory));
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> ComposeClient {
        let new_runner = match self.runner_factory {
            Some(factory) => factory,
            None => {
                let spawner = self
                    .spawner
                    .unwrap_or_else(|| Arc::new(TokioSpawner) as Arc<dyn Spawner>);
                let current_dir = self.current_dir;
                let env = self.env;

                Arc::new(move || {
                    let mut runner = ProcessRunner::with_spawner(spawner.clone());
                    if let Some(ref dir) = current_dir {
                        runner = runner.current_dir(dir.clone());
                    }
                    for (key, value) in &env {
                        runner = runner.env(key.clone(), value.clone());
                    }
                    Box::new(runner) as Box<dyn Runner>
                }) as RunnerFactory
            }
        };

        ComposeClient {
            options: self.options,
            program: self
                .program
                .unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            new_runner,
        }
    }
}

impl std::fmt::Debug for ComposeClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeClientBuilder")
            .field("options", &self.options)
            .field("program", &self.program)
            .field("current_dir", &self.current_dir)
            .field("env", &self.env)
            .field("spawner", &self.spawner.as_ref().map(|_| "<spawner>"))
            .field(
                "runner_factory",
                &self.runner_factory.as_ref().map(|_| "<factory>"),
            )
            .finish()
    }
}

impl Default for ComposeClient {
    fn default() -> Self {
        Self::new(GlobalOptions::default())
    }
}
