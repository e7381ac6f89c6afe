//! Partial configuration trees and the deep-merge law that combines them.
//!
//! Objects merge key by key. Scalars and ordinary arrays are replaced by the
//! later fragment. The list-valued keys in [`CONCATENATED_KEYS`] are appended
//! instead, so plugins and module rules from every fragment survive.

use serde_json::{Map, Value};

/// Dotted paths whose array values concatenate instead of being replaced.
pub const CONCATENATED_KEYS: &[&str] = &["plugins", "module.rules"];

/// A partial tree of output keys
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationFragment {
    root: Map<String, Value>,
}

impl ConfigurationFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fragment from a JSON object. Non-object values yield an empty fragment.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(root) => Self { root },
            _ => Self::default(),
        }
    }

    /// Set a single value at a dotted path, creating intermediate objects.
    ///
    /// ```
    /// use browserconf::ConfigurationFragment;
    /// use serde_json::json;
    ///
    /// let fragment = ConfigurationFragment::new().with("output.crossOriginLoading", json!(false));
    /// assert_eq!(fragment.get("output.crossOriginLoading"), Some(&json!(false)));
    /// ```
    pub fn with(mut self, path: &str, value: Value) -> Self {
        let mut segments = path.split('.').peekable();
        let mut slot = &mut self.root;
        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                slot.insert(segment.to_string(), value);
                break;
            }
            let entry = slot
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            slot = match entry {
                Value::Object(next) => next,
                _ => return self,
            };
        }
        self
    }

    /// Look up a value by dotted path
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        segments.try_fold(self.root.get(first)?, |value, segment| value.get(segment))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Merge `later` into `self`; `later` wins on conflicting leaves.
    pub fn merge(&mut self, later: ConfigurationFragment) {
        merge_maps(&mut self.root, later.root, "");
    }

    /// Merge and return, for chaining
    pub fn merged(mut self, later: ConfigurationFragment) -> Self {
        self.merge(later);
        self
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }
}

impl From<Value> for ConfigurationFragment {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

fn merge_maps(target: &mut Map<String, Value>, update: Map<String, Value>, prefix: &str) {
    for (key, value) in update {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match target.get_mut(&key) {
            Some(existing) => merge_values(existing, value, &path),
            None => {
                target.insert(key, value);
            }
        }
    }
}

fn merge_values(target: &mut Value, update: Value, path: &str) {
    match (target, update) {
        (Value::Object(target_map), Value::Object(update_map)) => {
            merge_maps(target_map, update_map, path);
        }
        (Value::Array(target_list), Value::Array(update_list))
            if CONCATENATED_KEYS.contains(&path) =>
        {
            tracing::trace!(
                key = path,
                appended = update_list.len(),
                "concatenating list-valued key"
            );
            target_list.extend(update_list);
        }
        (target_slot, update) => {
            *target_slot = update;
        }
    }
}

/// Merge fragments in order, later fragments winning.
pub fn merge_all(fragments: impl IntoIterator<Item = ConfigurationFragment>) -> ConfigurationFragment {
    fragments
        .into_iter()
        .fold(ConfigurationFragment::new(), ConfigurationFragment::merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn later_scalar_wins() {
        let merged = merge_all([
            ConfigurationFragment::new().with("devtool", json!("source-map")),
            ConfigurationFragment::new().with("devtool", json!(false)),
        ]);
        assert_eq!(merged.get("devtool"), Some(&json!(false)));
    }

    #[test]
    fn nested_objects_union() {
        let merged = merge_all([
            ConfigurationFragment::from(json!({ "output": { "path": "dist" } })),
            ConfigurationFragment::from(json!({ "output": { "crossOriginLoading": "anonymous" } })),
        ]);
        assert_eq!(
            merged.into_value(),
            json!({ "output": { "path": "dist", "crossOriginLoading": "anonymous" } })
        );
    }

    #[test]
    fn plugins_concatenate() {
        let merged = merge_all([
            ConfigurationFragment::from(json!({ "plugins": ["a", "b"] })),
            ConfigurationFragment::from(json!({ "plugins": ["b", "c"] })),
        ]);
        assert_eq!(merged.get("plugins"), Some(&json!(["a", "b", "b", "c"])));
    }

    #[test]
    fn module_rules_concatenate() {
        let merged = merge_all([
            ConfigurationFragment::from(json!({ "module": { "rules": [{ "loader": "x" }] } })),
            ConfigurationFragment::from(json!({ "module": { "rules": [{ "loader": "y" }] } })),
        ]);
        assert_eq!(
            merged.get("module.rules"),
            Some(&json!([{ "loader": "x" }, { "loader": "y" }]))
        );
    }

    #[test]
    fn other_arrays_are_replaced() {
        let merged = merge_all([
            ConfigurationFragment::from(json!({ "resolve": { "mainFields": ["main"] } })),
            ConfigurationFragment::from(json!({ "resolve": { "mainFields": ["module"] } })),
        ]);
        assert_eq!(merged.get("resolve.mainFields"), Some(&json!(["module"])));
    }

    #[test]
    fn nested_plugins_key_is_not_concatenated() {
        // Only the top-level `plugins` list is special.
        let merged = merge_all([
            ConfigurationFragment::from(json!({ "resolve": { "plugins": ["a"] } })),
            ConfigurationFragment::from(json!({ "resolve": { "plugins": ["b"] } })),
        ]);
        assert_eq!(merged.get("resolve.plugins"), Some(&json!(["b"])));
    }

    #[test]
    fn object_replaces_scalar() {
        let merged = merge_all([
            ConfigurationFragment::new().with("target", json!("web")),
            ConfigurationFragment::from(json!({ "target": { "kind": "web" } })),
        ]);
        assert_eq!(merged.get("target.kind"), Some(&json!("web")));
    }

    #[test]
    fn with_overwrites_scalar_parent() {
        let fragment = ConfigurationFragment::new()
            .with("node", json!(false))
            .with("node.global", json!(true));
        assert_eq!(fragment.get("node.global"), Some(&json!(true)));
    }

    #[test]
    fn non_object_value_is_empty() {
        assert!(ConfigurationFragment::from_value(json!([1, 2])).is_empty());
    }
}
