//! Configuration constants for subprocess execution

/// Shell used to interpret command lines
#[cfg(not(windows))]
pub const SHELL: &str = "/bin/sh";

/// Flag passing the command line to [`SHELL`]
#[cfg(not(windows))]
pub const SHELL_COMMAND_FLAG: &str = "-c";

/// Shell used to interpret command lines
#[cfg(windows)]
pub const SHELL: &str = "cmd";

/// Flag passing the command line to [`SHELL`]
#[cfg(windows)]
pub const SHELL_COMMAND_FLAG: &str = "/C";

/// Environment variables that are never forwarded to the subprocess
///
/// These variables change how the shell and its children load and execute
/// code.
pub const DANGEROUS_ENV_VARS: &[&str] = &[
    "LD_PRELOAD",
    "LD_LIBRARY_PATH",
    "DYLD_INSERT_LIBRARIES",
    "DYLD_LIBRARY_PATH",
    "BASH_ENV",
    "ENV",
    "IFS",
];

/// Whether `key` may be passed through to the subprocess environment
#[must_use]
pub fn is_allowed_env(key: &str) -> bool {
    !key.is_empty() && !DANGEROUS_ENV_VARS.contains(&key)
}
