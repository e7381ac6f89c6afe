//! browserconf - resolve browser build options into a bundler configuration.

use browserconf_cli::{cli, commands, error, logger};
use clap::Parser;
use miette::{IntoDiagnostic, Result};

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);

    let cwd = std::env::current_dir().into_diagnostic()?;
    let mut stdout = std::io::stdout().lock();

    let result = match &args.command {
        cli::Command::Resolve(resolve_args) => {
            commands::resolve_execute(resolve_args, &cwd, &mut stdout)
        }
        cli::Command::Plugins(source_args) => {
            commands::plugins_execute(source_args, &cwd, &mut stdout)
        }
    };

    result.map_err(error::cli_error_to_miette)
}
