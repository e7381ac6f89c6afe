//! browserconf CLI
//!
//! Loads build options (file, environment, flags), runs the browserconf
//! assembler, and prints the result.
//!
//! - [`cli`] - argument definitions
//! - [`config`] - layered option loading with figment
//! - [`commands`] - `resolve` and `plugins`
//! - [`error`] - CLI errors and miette conversion
//! - [`logger`] - tracing subscriber setup

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;

pub use error::{CliError, Result};
