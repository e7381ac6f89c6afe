//! Command-line interface definition.
//!
//! - `browserconf resolve` - print the resolved bundler configuration
//! - `browserconf plugins` - print the ordered plugin list

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// browserconf - turn browser build options into a bundler configuration
#[derive(Parser, Debug)]
#[command(
    name = "browserconf",
    version,
    about = "Resolve browser build options into a bundler configuration",
    long_about = "browserconf reads declarative build options (integrity, licenses, source maps,\n\
                  hot module replacement, chunking, cross-origin policy) and prints the\n\
                  configuration object a bundler consumes."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration as JSON
    Resolve(ResolveArgs),

    /// Print the plugins the build would construct, in order
    Plugins(SourceArgs),
}

/// Where options come from and which bundler they target
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Options file (.toml or .json). Defaults to browserconf.toml or
    /// browserconf.json in the project root when present.
    #[arg(short, long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Project root that relative paths resolve against
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Installed bundler version, e.g. 5 or 4.46.0
    #[arg(short = 'b', long, value_name = "VERSION")]
    pub bundler_version: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Print single-line JSON instead of pretty output
    #[arg(long)]
    pub compact: bool,
}
