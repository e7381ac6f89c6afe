//! Plugin selection.
//!
//! Rules only decide *whether* a plugin is needed and *with which
//! parameters*. They produce declarative [`PluginSpec`] values; turning a spec
//! into a runnable plugin is the job of a [`PluginFactory`].

use serde::{Deserialize, Serialize};

use crate::assemble::ResolvedConfiguration;
use crate::error::Result;
use crate::options::OptionView;

/// Digest algorithm used for integrity attributes
pub const INTEGRITY_HASH_FUNCTION: &str = "sha384";

/// File name of the consolidated license report
pub const LICENSE_REPORT_FILENAME: &str = "3rdpartylicenses.txt";

/// Pattern matching vendor chunk files excluded from maps unless vendor maps are requested
pub const VENDOR_SOURCE_MAP_EXCLUDE: &str = r"vendor.*\.js";

/// One entry in the ordered plugin list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plugin", content = "options", rename_all = "kebab-case")]
pub enum PluginSpec {
    SubresourceIntegrity(IntegrityOptions),
    LicenseExtraction(LicenseOptions),
    SourceMapDevTool(SourceMapDevToolOptions),
    CommonJsUsageWarn(CommonJsUsageOptions),
    HotModuleReplacement,
}

impl PluginSpec {
    /// Stable identifier, identical to the serialised tag
    pub fn name(&self) -> &'static str {
        match self {
            Self::SubresourceIntegrity(_) => "subresource-integrity",
            Self::LicenseExtraction(_) => "license-extraction",
            Self::SourceMapDevTool(_) => "source-map-dev-tool",
            Self::CommonJsUsageWarn(_) => "common-js-usage-warn",
            Self::HotModuleReplacement => "hot-module-replacement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityOptions {
    pub hash_func_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseOptions {
    pub stats: LicenseStats,
    pub per_chunk_output: bool,
    pub output_filename: String,
}

/// Which scan diagnostics the license plugin reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseStats {
    pub warnings: bool,
    pub errors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapDevToolOptions {
    pub filename: String,

    /// Asset name patterns that get maps
    pub include: Vec<String>,

    pub source_root: String,

    pub module_filename_template: String,

    /// `Some(false)` suppresses the `sourceMappingURL` comment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl SourceMapDevToolOptions {
    pub fn new(scripts: bool, styles: bool, hidden: bool, vendor: bool) -> Self {
        let mut include = Vec::new();
        if scripts {
            include.push("js$".to_string());
        }
        if styles {
            include.push("css$".to_string());
        }

        Self {
            filename: "[file].map".to_string(),
            include,
            source_root: "webpack:///".to_string(),
            module_filename_template: "[resource-path]".to_string(),
            append: hidden.then_some(false),
            exclude: (!vendor).then(|| VENDOR_SOURCE_MAP_EXCLUDE.to_string()),
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.append == Some(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonJsUsageOptions {
    pub allowed_dependencies: Vec<String>,
}

/// Rule 1: integrity digests
pub fn integrity_plugin(view: &OptionView<'_>) -> Option<PluginSpec> {
    view.integrity.then(|| {
        PluginSpec::SubresourceIntegrity(IntegrityOptions {
            hash_func_names: vec![INTEGRITY_HASH_FUNCTION.to_string()],
        })
    })
}

/// Rule 2: consolidated license report
pub fn license_plugin(view: &OptionView<'_>) -> Option<PluginSpec> {
    view.extract_licenses.then(|| {
        PluginSpec::LicenseExtraction(LicenseOptions {
            stats: LicenseStats {
                warnings: false,
                errors: false,
            },
            per_chunk_output: false,
            output_filename: LICENSE_REPORT_FILENAME.to_string(),
        })
    })
}

/// Rule 3: source map emission
///
/// Differential builds always hide map references, whatever the user asked for.
pub fn source_map_plugin(view: &OptionView<'_>) -> Option<PluginSpec> {
    let maps = view.source_map;
    if !maps.any_requested() {
        return None;
    }

    let hidden = view.differential_loading || maps.hidden;
    if view.differential_loading && !maps.hidden {
        tracing::debug!("differential loading forces hidden source maps");
    }

    Some(PluginSpec::SourceMapDevTool(SourceMapDevToolOptions::new(
        maps.scripts,
        maps.styles,
        hidden,
        maps.vendor,
    )))
}

/// Rule 4: CommonJS usage warnings, unconditional
pub fn common_js_usage_plugin(view: &OptionView<'_>) -> PluginSpec {
    PluginSpec::CommonJsUsageWarn(CommonJsUsageOptions {
        allowed_dependencies: view.allowed_common_js.iter().cloned().collect(),
    })
}

/// Rule 5: hot module replacement runtime
pub fn hmr_plugin(view: &OptionView<'_>) -> Option<PluginSpec> {
    view.hmr.then_some(PluginSpec::HotModuleReplacement)
}

/// Build the ordered plugin list. Order is the rule order above, never priority-based.
pub fn select_plugins(view: &OptionView<'_>) -> Vec<PluginSpec> {
    let plugins: Vec<PluginSpec> = [
        integrity_plugin(view),
        license_plugin(view),
        source_map_plugin(view),
        Some(common_js_usage_plugin(view)),
        hmr_plugin(view),
    ]
    .into_iter()
    .flatten()
    .collect();

    tracing::debug!(
        plugins = ?plugins.iter().map(PluginSpec::name).collect::<Vec<_>>(),
        "selected plugins"
    );
    plugins
}

/// Turns declarative plugin specs into runnable plugin instances.
pub trait PluginFactory {
    type Plugin;

    fn construct(&self, spec: &PluginSpec) -> Result<Self::Plugin>;
}

/// Construct every plugin of a resolved configuration, preserving list order.
pub fn instantiate_plugins<F: PluginFactory>(
    config: &ResolvedConfiguration,
    factory: &F,
) -> Result<Vec<F::Plugin>> {
    config
        .plugin_specs()?
        .iter()
        .map(|spec| factory.construct(spec))
        .collect()
}
