//! Code-splitting and chunk naming policy.
//!
//! Common-code extraction (`default` + `common` groups) and vendor extraction
//! (`defaultVendors`) are separate axes: a build may enable either alone.

use serde::{Serialize, Serializer};
use serde_json::json;

use crate::fragment::ConfigurationFragment;
use crate::options::OptionView;

/// Matches modules resolved from an installed package directory
pub const THIRD_PARTY_MODULE_PATTERN: &str = r"[\\/]node_modules[\\/]";

/// Only the main entry chunk feeds the vendor chunk
pub const VENDOR_SOURCE_CHUNK: &str = "main";

/// The `optimization` subtree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationPolicy {
    pub runtime_chunk: RuntimeChunk,
    pub split_chunks: SplitChunksPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeChunk {
    /// One runtime chunk shared by every entry
    Single,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksPolicy {
    pub max_async_requests: RequestLimit,
    pub cache_groups: CacheGroups,
}

/// Cap on parallel requests when loading split chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestLimit {
    Unbounded,
}

impl Serialize for RequestLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // JSON has no infinity literal
            Self::Unbounded => serializer.serialize_str("Infinity"),
        }
    }
}

/// Disabled groups serialise as `false`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroups {
    #[serde(serialize_with = "group_or_false")]
    pub default: Option<CacheGroup>,
    #[serde(serialize_with = "group_or_false")]
    pub common: Option<CacheGroup>,
    #[serde(serialize_with = "group_or_false")]
    pub vendors: Option<CacheGroup>,
    #[serde(serialize_with = "group_or_false")]
    pub default_vendors: Option<CacheGroup>,
}

fn group_or_false<S: Serializer>(group: &Option<CacheGroup>, serializer: S) -> Result<S::Ok, S::Error> {
    match group {
        Some(group) => group.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub chunks: ChunkFilter,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_chunks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enforce: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<String>,
}

/// Which chunks a cache group selects modules from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkFilter {
    Async,
    /// Only the chunk with exactly this name; the host evaluates the predicate
    NameEquals(String),
}

impl Serialize for ChunkFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        match self {
            Self::Async => serializer.serialize_str("async"),
            Self::NameEquals(name) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("nameEquals", name)?;
                map.end()
            }
        }
    }
}

fn default_group() -> CacheGroup {
    CacheGroup {
        name: None,
        chunks: ChunkFilter::Async,
        min_chunks: Some(2),
        priority: Some(10),
        enforce: None,
        test: None,
    }
}

fn common_group() -> CacheGroup {
    CacheGroup {
        name: Some("common".to_string()),
        chunks: ChunkFilter::Async,
        min_chunks: Some(2),
        priority: Some(5),
        enforce: Some(true),
        test: None,
    }
}

fn vendor_group() -> CacheGroup {
    CacheGroup {
        name: Some("vendor".to_string()),
        chunks: ChunkFilter::NameEquals(VENDOR_SOURCE_CHUNK.to_string()),
        min_chunks: None,
        priority: None,
        enforce: Some(true),
        test: Some(THIRD_PARTY_MODULE_PATTERN.to_string()),
    }
}

pub fn build_optimization(view: &OptionView<'_>) -> OptimizationPolicy {
    tracing::debug!(
        common_chunk = view.common_chunk,
        vendor_chunk = view.vendor_chunk,
        "building split-chunk policy"
    );

    OptimizationPolicy {
        runtime_chunk: RuntimeChunk::Single,
        split_chunks: SplitChunksPolicy {
            max_async_requests: RequestLimit::Unbounded,
            cache_groups: CacheGroups {
                default: view.common_chunk.then(default_group),
                common: view.common_chunk.then(common_group),
                // Built-in vendor group stays off; `defaultVendors` replaces it
                vendors: None,
                default_vendors: view.vendor_chunk.then(vendor_group),
            },
        },
    }
}

impl OptimizationPolicy {
    pub fn to_fragment(&self) -> ConfigurationFragment {
        ConfigurationFragment::new().with("optimization", json!(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::BuildOptions;

    fn policy(common: bool, vendor: bool) -> OptimizationPolicy {
        let options = BuildOptions {
            common_chunk_enabled: common,
            vendor_chunk_enabled: vendor,
            ..Default::default()
        };
        build_optimization(&options.view())
    }

    #[test]
    fn everything_disabled_keeps_runtime_and_limit() {
        let value = json!(policy(false, false));
        assert_eq!(
            value,
            json!({
                "runtimeChunk": "single",
                "splitChunks": {
                    "maxAsyncRequests": "Infinity",
                    "cacheGroups": {
                        "default": false,
                        "common": false,
                        "vendors": false,
                        "defaultVendors": false
                    }
                }
            })
        );
    }

    #[test]
    fn common_chunk_enables_default_and_common() {
        let value = json!(policy(true, false));
        let groups = &value["splitChunks"]["cacheGroups"];
        assert_eq!(
            groups["default"],
            json!({ "chunks": "async", "minChunks": 2, "priority": 10 })
        );
        assert_eq!(
            groups["common"],
            json!({
                "name": "common",
                "chunks": "async",
                "minChunks": 2,
                "priority": 5,
                "enforce": true
            })
        );
        assert_eq!(groups["vendors"], json!(false));
        assert_eq!(groups["defaultVendors"], json!(false));
    }

    #[test]
    fn vendor_chunk_alone() {
        let value = json!(policy(false, true));
        let groups = &value["splitChunks"]["cacheGroups"];
        assert_eq!(groups["default"], json!(false));
        assert_eq!(groups["common"], json!(false));
        assert_eq!(
            groups["defaultVendors"],
            json!({
                "name": "vendor",
                "chunks": { "nameEquals": "main" },
                "enforce": true,
                "test": THIRD_PARTY_MODULE_PATTERN
            })
        );
    }

    #[test]
    fn default_outranks_common() {
        let policy = policy(true, true);
        let groups = &policy.split_chunks.cache_groups;
        assert!(groups.default.as_ref().unwrap().priority > groups.common.as_ref().unwrap().priority);
        assert!(groups.vendors.is_none());
    }

    #[test]
    fn chunk_filters_serialise() {
        assert_eq!(json!(ChunkFilter::Async), json!("async"));
        assert_eq!(
            json!(ChunkFilter::NameEquals(VENDOR_SOURCE_CHUNK.to_string())),
            json!({ "nameEquals": "main" })
        );
    }

    #[test]
    fn fragment_is_rooted_at_optimization() {
        let fragment = policy(false, false).to_fragment();
        assert_eq!(fragment.get("optimization.runtimeChunk"), Some(&json!("single")));
    }
}
