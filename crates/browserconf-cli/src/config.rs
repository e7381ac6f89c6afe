//! Loading build options from files, environment and flags.
//!
//! Priority: CLI flags > `BROWSERCONF_*` environment > options file > defaults.

use std::path::{Path, PathBuf};

use browserconf::{BuildContext, BuildOptions, BundlerVersion};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "BROWSERCONF_";

/// File names probed in the project root, in order
pub const DEFAULT_OPTION_FILES: &[&str] = &["browserconf.toml", "browserconf.json"];

/// Everything the CLI needs to run one assembly
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(flatten)]
    pub options: BuildOptions,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "version_string"
    )]
    pub bundler_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<PathBuf>,
}

impl Settings {
    /// Load settings for the given arguments, resolving the project root
    /// against `cwd` when none is given.
    pub fn load(args: &SourceArgs, cwd: &Path) -> Result<Self> {
        let root = args
            .root
            .as_ref()
            .map(|r| cwd.join(r))
            .unwrap_or_else(|| cwd.to_path_buf());

        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        if let Some(path) = options_file(args.options.as_deref(), &root, cwd)? {
            tracing::debug!(path = %path.display(), "loading options file");
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(&path)),
                Some("json") => figment.merge(Json::file(&path)),
                _ => return Err(CliError::UnsupportedFormat(path)),
            };
        }

        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .map(|key| env_key_to_path(key.as_str()).into())
                .lowercase(false),
        );

        let mut settings: Settings = figment.extract()?;

        // Flags override everything
        if let Some(version) = &args.bundler_version {
            settings.bundler_version = Some(version.clone());
        }
        if args.root.is_some() || settings.project_root.is_none() {
            settings.project_root = Some(root);
        } else if let Some(configured) = settings.project_root.take() {
            settings.project_root = Some(cwd.join(configured));
        }

        Ok(settings)
    }

    /// Build the assembly context. The bundler major defaults to 5.
    pub fn context(&self) -> Result<BuildContext> {
        let version = match &self.bundler_version {
            Some(v) => BundlerVersion::detect(v)?,
            None => BundlerVersion::default(),
        };
        let root = self.project_root.clone().unwrap_or_default();
        Ok(BuildContext::new(root, version))
    }
}

/// Versions arrive as strings from flags but as numbers from TOML or env
#[derive(Deserialize)]
#[serde(untagged)]
enum VersionValue {
    Text(String),
    Major(u64),
    Decimal(f64),
}

fn version_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<VersionValue>::deserialize(deserializer)?.map(|v| match v {
        VersionValue::Text(s) => s,
        VersionValue::Major(n) => n.to_string(),
        VersionValue::Decimal(f) => f.to_string(),
    }))
}

fn options_file(explicit: Option<&Path>, root: &Path, cwd: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        let path = cwd.join(path);
        if !path.is_file() {
            return Err(CliError::OptionsNotFound(path));
        }
        return Ok(Some(path));
    }

    Ok(DEFAULT_OPTION_FILES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file()))
}

/// `SOURCE_MAP_SETTINGS__SCRIPTS` -> `sourceMapSettings.scripts`
pub fn env_key_to_path(key: &str) -> String {
    key.split("__")
        .map(snake_to_camel)
        .collect::<Vec<_>>()
        .join(".")
}

fn snake_to_camel(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for (i, word) in segment.split('_').filter(|w| !w.is_empty()).enumerate() {
        let word = word.to_lowercase();
        if i == 0 {
            out.push_str(&word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
