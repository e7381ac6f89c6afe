//! Build options consumed by the decision layer.
//!
//! `BuildOptions` is the already-validated intent handed down by the
//! surrounding system. `OptionView` is the de-structured, defaulted subset
//! the individual rules read.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::overlay::BundlerVersion;

/// Cross-origin mode declared by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrossOriginMode {
    /// No explicit cross-origin attribute (default)
    #[default]
    None,
    /// `crossorigin="anonymous"`
    Anonymous,
    /// `crossorigin="use-credentials"`
    UseCredentials,
}

/// Which source maps the build should emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceMapSettings {
    /// Emit maps for script assets
    pub scripts: bool,

    /// Emit maps for style assets
    pub styles: bool,

    /// Emit maps without a reference comment in the asset
    pub hidden: bool,

    /// Also emit maps for vendor chunks
    pub vendor: bool,
}

impl SourceMapSettings {
    /// True when any map emission was requested
    pub fn any_requested(&self) -> bool {
        self.scripts || self.styles
    }
}

/// Declared build intent for a browser build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildOptions {
    /// Cross-origin mode; `None` means the user did not set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_origin_mode: Option<CrossOriginMode>,

    /// Embed integrity digests for emitted assets
    pub subresource_integrity_enabled: bool,

    /// Write a consolidated third-party license report
    pub extract_licenses: bool,

    /// Split third-party code reachable from `main` into a vendor chunk
    pub vendor_chunk_enabled: bool,

    /// Split code shared by async chunks into common chunks
    pub common_chunk_enabled: bool,

    /// Packages allowed to be resolved as CommonJS without a warning
    pub allowed_common_js_dependency_list: BTreeSet<String>,

    /// Enable hot module replacement
    pub hot_module_replacement_enabled: bool,

    /// Main entry, relative to the project root
    pub main_entry_path: String,

    /// Source map granularity
    pub source_map_settings: SourceMapSettings,

    /// Build emits multiple variants for different runtime tiers
    pub differential_loading_mode: bool,
}

impl BuildOptions {
    /// Create from serde_json::Value (for programmatic options from an upstream layer)
    ///
    /// # Example
    ///
    /// ```
    /// use browserconf::{BuildOptions, CrossOriginMode};
    /// use serde_json::json;
    ///
    /// let options = BuildOptions::from_value(json!({
    ///     "crossOriginMode": "use-credentials",
    ///     "subresourceIntegrityEnabled": true,
    ///     "mainEntryPath": "src/main.ts"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(options.cross_origin_mode, Some(CrossOriginMode::UseCredentials));
    /// assert!(options.subresource_integrity_enabled);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("options", e))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("options", e))
    }

    /// Read the subset of options the rules depend on, with defaults applied.
    pub fn view(&self) -> OptionView<'_> {
        OptionView {
            cross_origin: self.cross_origin_mode.unwrap_or_default(),
            integrity: self.subresource_integrity_enabled,
            extract_licenses: self.extract_licenses,
            vendor_chunk: self.vendor_chunk_enabled,
            common_chunk: self.common_chunk_enabled,
            allowed_common_js: &self.allowed_common_js_dependency_list,
            hmr: self.hot_module_replacement_enabled,
            main: &self.main_entry_path,
            source_map: self.source_map_settings,
            differential_loading: self.differential_loading_mode,
        }
    }
}

/// Defaulted, read-only view over `BuildOptions`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionView<'a> {
    pub cross_origin: CrossOriginMode,
    pub integrity: bool,
    pub extract_licenses: bool,
    pub vendor_chunk: bool,
    pub common_chunk: bool,
    pub allowed_common_js: &'a BTreeSet<String>,
    pub hmr: bool,
    pub main: &'a str,
    pub source_map: SourceMapSettings,
    pub differential_loading: bool,
}

/// Per-invocation context supplied alongside the options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Project root that relative option paths resolve against. Callers
    /// pass it absolute; it is used exactly as given.
    pub project_root: PathBuf,

    /// Bundler major version detected by the caller
    pub bundler_version: BundlerVersion,
}

impl BuildContext {
    pub fn new(project_root: impl Into<PathBuf>, bundler_version: BundlerVersion) -> Self {
        Self {
            project_root: project_root.into(),
            bundler_version,
        }
    }
}
