//! Command implementations.

use std::io::Write;
use std::path::Path;

use browserconf::{PluginFactory, PluginSpec, ResolvedConfiguration, assemble, instantiate_plugins};

use crate::cli::{ResolveArgs, SourceArgs};
use crate::config::Settings;
use crate::error::Result;

fn resolve(source: &SourceArgs, cwd: &Path) -> Result<ResolvedConfiguration> {
    let settings = Settings::load(source, cwd)?;
    let context = settings.context()?;
    tracing::info!(
        root = %context.project_root.display(),
        bundler = %context.bundler_version,
        "resolving browser configuration"
    );
    Ok(assemble(&settings.options, &context))
}

/// `browserconf resolve`
pub fn resolve_execute(args: &ResolveArgs, cwd: &Path, out: &mut impl Write) -> Result<()> {
    let config = resolve(&args.source, cwd)?;
    let json = if args.compact {
        config.to_json()?
    } else {
        config.to_json_pretty()?
    };
    writeln!(out, "{json}")?;
    Ok(())
}

/// `browserconf plugins`
pub fn plugins_execute(args: &SourceArgs, cwd: &Path, out: &mut impl Write) -> Result<()> {
    let config = resolve(args, cwd)?;
    for line in instantiate_plugins(&config, &DescribingFactory)? {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Stands in for real plugin construction: renders each spec as one line
pub struct DescribingFactory;

impl PluginFactory for DescribingFactory {
    type Plugin = String;

    fn construct(&self, spec: &PluginSpec) -> browserconf::Result<String> {
        let detail = match spec {
            PluginSpec::SubresourceIntegrity(opts) => opts.hash_func_names.join(","),
            PluginSpec::LicenseExtraction(opts) => opts.output_filename.clone(),
            PluginSpec::SourceMapDevTool(opts) => {
                let visibility = if opts.is_hidden() { "hidden" } else { "visible" };
                format!("{} {}", opts.include.join(","), visibility)
            }
            PluginSpec::CommonJsUsageWarn(opts) if opts.allowed_dependencies.is_empty() => {
                "no allowed dependencies".to_string()
            }
            PluginSpec::CommonJsUsageWarn(opts) => {
                format!("allowed: {}", opts.allowed_dependencies.join(","))
            }
            PluginSpec::HotModuleReplacement => return Ok(spec.name().to_string()),
        };
        Ok(format!("{} ({})", spec.name(), detail))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use browserconf::plugins::{CommonJsUsageOptions, IntegrityOptions};

    #[test]
    fn describes_integrity() {
        let spec = PluginSpec::SubresourceIntegrity(IntegrityOptions {
            hash_func_names: vec!["sha384".to_string()],
        });
        assert_eq!(
            DescribingFactory.construct(&spec).unwrap(),
            "subresource-integrity (sha384)"
        );
    }

    #[test]
    fn describes_empty_allow_list() {
        let spec = PluginSpec::CommonJsUsageWarn(CommonJsUsageOptions {
            allowed_dependencies: vec![],
        });
        assert_eq!(
            DescribingFactory.construct(&spec).unwrap(),
            "common-js-usage-warn (no allowed dependencies)"
        );
    }

    #[test]
    fn describes_hmr_by_name() {
        assert_eq!(
            DescribingFactory
                .construct(&PluginSpec::HotModuleReplacement)
                .unwrap(),
            "hot-module-replacement"
        );
    }
}
