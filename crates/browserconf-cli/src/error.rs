//! Error types for the browserconf CLI.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] browserconf::ConfigError),

    #[error("failed to load build options: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("options file not found: {}", .0.display())]
    OptionsNotFound(PathBuf),

    #[error("unsupported options file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// Convert a CLI error into a miette report with a hint where one helps
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(browserconf::ConfigError::UnsupportedBundlerVersion(version)) => {
            miette::miette!(
                help = "Supported bundler majors are 4 and 5, e.g. `--bundler-version 5.11.0`",
                "Unsupported bundler version: {:?}",
                version
            )
        }
        CliError::OptionsNotFound(path) => miette::miette!(
            help = "Pass an existing file to --options or create browserconf.toml in the project root",
            "Options file not found: {}",
            path.display()
        ),
        CliError::UnsupportedFormat(path) => miette::miette!(
            help = "Options files must end in .toml or .json",
            "Unsupported options file: {}",
            path.display()
        ),
        CliError::Load(e) => miette::miette!(
            help = "Check field names (camelCase) and value types in the options file",
            "Failed to load build options: {}",
            e
        ),
        other => miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_transparent() {
        let err: CliError = browserconf::ConfigError::UnsupportedBundlerVersion("3".into()).into();
        assert_eq!(err.to_string(), "unsupported bundler version: \"3\"");
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = CliError::OptionsNotFound(PathBuf::from("nope.toml"));
        assert!(err.to_string().contains("nope.toml"));
        let report = cli_error_to_miette(err);
        assert!(report.to_string().contains("nope.toml"));
    }
}
