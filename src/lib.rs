//! # Docker Compose client for Rust
//!
//! An async client that drives the `docker compose` CLI as a subprocess. It
//! assembles global and per-command flags into a command line, runs it
//! through the system shell and reports completion through a one-shot
//! future.
//!
//! ## Quick Start
//!
//! Query a JSON-producing subcommand with [`ComposeClient::run_query`]:
//!
//! ```no_run
//! use docker_compose_client::{ComposeClient, GlobalOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ComposeClient::new(GlobalOptions::default());
//!
//!     // docker compose version --format json
//!     let version = client.run_query("version", "", &[]).await?;
//!     log::info!("{}", String::from_utf8_lossy(&version));
//!     Ok(())
//! }
//! ```
//!
//! ## Core Features
//!
//! ### 1. Layered global options
//!
//! [`GlobalOptions`] held by the client apply to every call; each call may
//! layer further options on top. Files and profiles accumulate, scalar
//! options take the last value that is set:
//!
//! ```
//! use docker_compose_client::{ComposeClient, GlobalOptions};
//!
//! let client = ComposeClient::new(
//!     GlobalOptions::builder().add_file("a.yml").verbose(true).build(),
//! );
//! let overrides = [GlobalOptions::builder().add_file("b.yml").verbose(false).build()];
//!
//! assert_eq!(
//!     client.command_line("up", "--detach", &overrides),
//!     "docker compose --file a.yml --file b.yml up --detach",
//! );
//! ```
//!
//! ### 2. Streaming execution with [`ComposeClient::run_command`]
//!
//! Output goes to the sinks you pass; unset streams are discarded. The call
//! returns as soon as the process starts:
//!
//! ```no_run
//! use docker_compose_client::ComposeClient;
//! use docker_compose_client::runner::SharedBuffer;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ComposeClient::default();
//! let progress = SharedBuffer::new();
//!
//! let completion = client.run_command("down", "--volumes", None, Some(progress.sink()), &[])?;
//! completion.await?;
//! log::info!("{}", progress.to_string_lossy());
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. Substitutable process spawning
//!
//! The [`Runner`](runner::Runner) and [`Spawner`](runner::Spawner) traits let
//! tests replace real processes; see [`ComposeClientBuilder::runner_factory`]
//! and [`ComposeClientBuilder::spawner`].
//!
//! ## Architecture
//!
//! - [`types`]: Global options and their builder
//! - [`client`]: Command line assembly and the two execution modes
//! - [`runner`]: Runner trait, completion future, sinks and the shell runner
//! - [`error`]: Error types and handling
//!
//! ## Error Handling
//!
//! All fallible operations return [`Result<T, ComposeError>`](Result). A
//! process that cannot be started fails synchronously; a process that exits
//! non-zero fails through its completion:
//!
//! ```no_run
//! # use docker_compose_client::{ComposeClient, ComposeError};
//! # async fn example(client: ComposeClient) {
//! match client.run_query("config", "", &[]).await {
//!     Ok(_config) => { /* ... */ }
//!     Err(ComposeError::Spawn { command, source }) => {
//!         log::error!("Could not start {command}: {source}");
//!     }
//!     Err(e) => {
//!         log::error!("docker compose failed: {e}");
//!     }
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;
pub mod runner;
pub mod types;

// Re-export commonly used types for external API
pub use client::{ComposeClient, ComposeClientBuilder};
pub use error::{ComposeError, Result};
pub use runner::{Completion, OutputSink, Runner};
pub use types::options::{GlobalOptions, GlobalOptionsBuilder};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
