//! Assembly of the final bundler configuration.
//!
//! Fragments are merged in a fixed order: base settings, module rules, the
//! version overlay, output policy, optimization, plugins, then host-global
//! polyfilling. Later fragments win on scalar keys; `plugins` and
//! `module.rules` concatenate (see [`crate::fragment`]).

use serde::Serialize;
use serde_json::{Value, json};

use crate::cross_origin::resolve_cross_origin;
use crate::error::{ConfigError, Result};
use crate::fragment::{ConfigurationFragment, merge_all};
use crate::optimization::build_optimization;
use crate::options::{BuildContext, BuildOptions};
use crate::overlay::{BundlerVersion, merge_version_overlay};
use crate::plugins::{PluginSpec, select_plugins};
use crate::rules::{ModuleRuleSpec, PathResolver, ProjectRootResolver, build_rules};

/// Package entry fields, most modern first
pub const MAIN_FIELDS: &[&str] = &["es2015", "browser", "module", "main"];

/// The merged configuration handed unmodified to the bundler
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedConfiguration {
    value: Value,
}

impl ResolvedConfiguration {
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Look up a value by dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.value, |value, segment| value.get(segment))
    }

    /// Decode the `plugins` list back into specs
    pub fn plugin_specs(&self) -> Result<Vec<PluginSpec>> {
        let Some(Value::Array(entries)) = self.value.get("plugins") else {
            return Ok(Vec::new());
        };
        entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                serde_json::from_value(entry.clone()).map_err(|e| ConfigError::UnknownPlugin {
                    index,
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Decode `module.rules`
    pub fn module_rules(&self) -> Result<Vec<ModuleRuleSpec>> {
        match self.get("module.rules") {
            Some(rules) => serde_json::from_value(rules.clone())
                .map_err(|e| ConfigError::invalid_value("module.rules", e)),
            None => Ok(Vec::new()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.value)
            .map_err(|e| ConfigError::invalid_value("configuration", e))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.value)
            .map_err(|e| ConfigError::invalid_value("configuration", e))
    }
}

fn base_fragment() -> ConfigurationFragment {
    ConfigurationFragment::new()
        .with("devtool", json!(false))
        .with("resolve.mainFields", json!(MAIN_FIELDS))
}

fn rules_fragment(rules: &[ModuleRuleSpec]) -> ConfigurationFragment {
    ConfigurationFragment::new().with("module.rules", json!(rules))
}

fn plugins_fragment(plugins: &[PluginSpec]) -> ConfigurationFragment {
    ConfigurationFragment::new().with("plugins", json!(plugins))
}

/// Assemble the browser configuration, resolving paths against the context's project root.
///
/// # Example
///
/// ```
/// use browserconf::{assemble, BuildContext, BuildOptions, BundlerVersion};
/// use serde_json::json;
///
/// let options = BuildOptions {
///     subresource_integrity_enabled: true,
///     ..Default::default()
/// };
/// let context = BuildContext::new("/work/app", BundlerVersion::V5);
///
/// let config = assemble(&options, &context);
/// assert_eq!(config.get("output.crossOriginLoading"), Some(&json!("anonymous")));
/// ```
pub fn assemble(options: &BuildOptions, context: &BuildContext) -> ResolvedConfiguration {
    let resolver = ProjectRootResolver::new(&context.project_root);
    assemble_with(options, context.bundler_version, &resolver)
}

/// Assemble with an explicit path resolution collaborator.
pub fn assemble_with(
    options: &BuildOptions,
    version: BundlerVersion,
    resolver: &dyn PathResolver,
) -> ResolvedConfiguration {
    let view = options.view();

    let rules = build_rules(&view, resolver);
    let cross_origin = resolve_cross_origin(view.integrity, view.cross_origin);
    let optimization = build_optimization(&view);
    let plugins = select_plugins(&view);

    let mut config = merge_all([base_fragment(), rules_fragment(&rules)]);
    merge_version_overlay(&mut config, version);
    config.merge(
        ConfigurationFragment::new().with("output.crossOriginLoading", cross_origin.to_value()),
    );
    config.merge(optimization.to_fragment());
    config.merge(plugins_fragment(&plugins));
    config.merge(ConfigurationFragment::new().with("node", json!(false)));

    tracing::debug!(
        version = %version,
        plugins = plugins.len(),
        rules = rules.len(),
        "assembled browser configuration"
    );

    ResolvedConfiguration {
        value: config.into_value(),
    }
}
