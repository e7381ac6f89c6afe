//! Module rules contributed by the decision layer.

use std::path::{Path, PathBuf};

use path_clean::PathClean;
use serde::{Deserialize, Serialize};

use crate::options::OptionView;

/// Loader that injects the hot-reload accept handler into the main entry
pub const HMR_LOADER: &str = "browserconf/hmr-loader";

/// Resolves option paths against the project root
pub trait PathResolver {
    /// Returns an absolute path when the resolver's root is absolute
    fn resolve(&self, path: &Path) -> PathBuf;
}

/// Joins relative paths onto the project root and cleans `.`/`..`
///
/// The root is taken as given. Anchoring a relative root is the caller's job.
#[derive(Debug, Clone)]
pub struct ProjectRootResolver {
    root: PathBuf,
}

impl ProjectRootResolver {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().clean(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PathResolver for ProjectRootResolver {
    fn resolve(&self, path: &Path) -> PathBuf {
        // `join` keeps `path` as-is when it is already absolute
        self.root.join(path).clean()
    }
}

/// A transform rule in `module.rules`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleRuleSpec {
    pub loader: String,
    /// Paths the loader applies to; non-UTF-8 segments are replaced lossily
    pub include: Vec<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, serde_json::Value>,
}

/// Build the extra module rules for this build.
pub fn build_rules(view: &OptionView<'_>, resolver: &dyn PathResolver) -> Vec<ModuleRuleSpec> {
    let mut rules = Vec::new();

    if view.hmr {
        let entry = resolver.resolve(Path::new(view.main));
        tracing::debug!(entry = %entry.display(), "adding hot-reload rule for main entry");
        rules.push(ModuleRuleSpec {
            loader: HMR_LOADER.to_string(),
            include: vec![entry.to_string_lossy().into_owned()],
            options: serde_json::Map::new(),
        });
    }

    rules
}
