//! # browserconf
//!
//! Decision layer between browser build intent and bundler mechanics.
//!
//! Given a validated [`BuildOptions`] and a [`BuildContext`], [`assemble`]
//! decides which optional capabilities are active (integrity hashing,
//! license extraction, source maps, hot module replacement, code
//! splitting, cross-origin policy), parameterises them, and merges the
//! resulting fragments into one [`ResolvedConfiguration`].
//!
//! Assembly is a pure function: no I/O, no caching, no shared state. It is
//! safe to call once per build variant.

pub mod assemble;
pub mod cross_origin;
pub mod error;
pub mod fragment;
pub mod optimization;
pub mod options;
pub mod overlay;
pub mod plugins;
pub mod rules;

pub use assemble::{MAIN_FIELDS, ResolvedConfiguration, assemble, assemble_with};
pub use cross_origin::{CrossOriginLoading, resolve_cross_origin};
pub use error::{ConfigError, Result};
pub use fragment::{CONCATENATED_KEYS, ConfigurationFragment, merge_all};
pub use optimization::{
    CacheGroup, CacheGroups, ChunkFilter, OptimizationPolicy, RequestLimit, RuntimeChunk,
    SplitChunksPolicy, build_optimization,
};
pub use options::{BuildContext, BuildOptions, CrossOriginMode, OptionView, SourceMapSettings};
pub use overlay::{BundlerVersion, VersionOverlay, merge_version_overlay};
pub use plugins::{PluginFactory, PluginSpec, instantiate_plugins, select_plugins};
pub use rules::{HMR_LOADER, ModuleRuleSpec, PathResolver, ProjectRootResolver, build_rules};
