//! Subprocess execution through the system shell
//!
//! [`ProcessRunner`] wraps a command line in `/bin/sh -c` (or `cmd /C` on
//! Windows) and launches it through a [`Spawner`]. [`TokioSpawner`] is the
//! production spawner.

pub mod config;
mod runner;
mod spawner;

// Re-export public types
pub use runner::ProcessRunner;
pub use spawner::{ProcessCommand, Spawner, TokioCommand, TokioSpawner};
