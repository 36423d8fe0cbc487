//! `ComposeClient` for running `docker compose` subcommands
//!
//! The client turns layered [`GlobalOptions`](crate::GlobalOptions), a
//! subcommand name and a pre-formatted flag string into a command line,
//! then hands it to a fresh [`Runner`](crate::runner::Runner):
//!
//! ```text
//! docker compose --file a.yml --file b.yml --project-name demo up --detach
//! └──program───┘ └──────────────global flags──────────────┘ └sub┘ └flags─┘
//! ```
//!
//! Two execution modes are offered:
//!
//! - [`ComposeClient::run_command`] streams output to caller-supplied sinks
//!   and returns a [`Completion`](crate::runner::Completion) immediately.
//! - [`ComposeClient::run_query`] captures standard output and returns it
//!   once the process has exited, for JSON-producing subcommands such as
//!   `config` and `version`.
//!
//! # Example: Streaming a command
//!
//! ```no_run
//! use docker_compose_client::{ComposeClient, GlobalOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ComposeClient::new(
//!     GlobalOptions::builder().add_file("docker-compose.yml").build(),
//! );
//!
//! let completion = client.run_command(
//!     "up",
//!     "--detach",
//!     None,
//!     Some(Box::new(tokio::io::stderr())),
//!     &[],
//! )?;
//! completion.await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example: Overriding options per call
//!
//! ```no_run
//! use docker_compose_client::{ComposeClient, GlobalOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ComposeClient::new(
//!     GlobalOptions::builder().add_file("base.yml").build(),
//! );
//!
//! // docker compose --file base.yml --file ci.yml --project-name ci config --format json
//! let ci = GlobalOptions::builder().add_file("ci.yml").project_name("ci").build();
//! let config = client.run_query("config", "", &[ci]).await?;
//! log::info!("{}", String::from_utf8_lossy(&config));
//! # Ok(())
//! # }
//! ```

mod client_impl;
pub mod command;

pub use client_impl::{ComposeClient, ComposeClientBuilder, DEFAULT_PROGRAM, RunnerFactory};
