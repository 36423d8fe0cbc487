//! Error types for the Docker Compose client

use thiserror::Error;

/// Main error type for the Docker Compose client
#[derive(Error, Debug)]
pub enum ComposeError {
    /// The shell process could not be started
    #[error("Failed to start `{command}`: {source}")]
    Spawn {
        /// Command line that was being launched
        command: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },

    /// The process started but did not exit successfully
    #[error("{message}")]
    Execution {
        /// Description of the exit status
        message: String,
        /// Process exit code, absent when terminated by a signal
        exit_code: Option<i32>,
    },

    /// The `docker` executable could not be located
    #[error("Docker CLI not found: {0}")]
    ProgramNotFound(String),

    /// I/O error while waiting on the process or pumping its output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The completion watcher stopped without reporting an outcome
    #[error("Runner error: {0}")]
    Runner(String),
}

/// Result type alias for Docker Compose client operations
pub type Result<T> = std::result::Result<T, ComposeError>;

impl ComposeError {
    /// Create a spawn error for the given command line
    pub fn spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            command: command.into(),
            source,
        }
    }

    /// Create an execution error
    pub fn execution(msg: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self::Execution {
            message: msg.into(),
            exit_code,
        }
    }

    /// Create an execution error from a finished process status
    #[must_use]
    pub fn from_status(status: std::process::ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::execution(format!("exit status {code}"), Some(code)),
            None => Self::execution(format!("process terminated: {status}"), None),
        }
    }

    /// Create a program not found error
    #[must_use]
    pub fn program_not_found() -> Self {
        Self::ProgramNotFound(
            "docker not found. Install Docker Engine or Docker Desktop\n\
             and make sure `docker compose version` works from a shell,\n\
             or configure the program explicitly on the client builder"
                .to_string(),
        )
    }

    /// Create a runner error
    pub fn runner(msg: impl Into<String>) -> Self {
        Self::Runner(msg.into())
    }

    /// Whether the process could not be started at all
    #[must_use]
    pub fn is_spawn(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    /// Exit code of a failed execution, if one was reported
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Execution { exit_code, .. } => *exit_code,
            _ => None,
        }
    }
}
