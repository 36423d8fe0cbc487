//! Type definitions for the Docker Compose client
//!
//! - [`options`] - Global options applied to every invocation, and their builder

pub mod options;

pub use options::{GlobalOptions, GlobalOptionsBuilder};
