//! Tooling & Integration Layer
//!
//! Command-line access to path resolution and the configuration pool.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
