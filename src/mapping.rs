//! Endpoint mapping: pattern compilation for templated paths, the
//! (method, path template) → resource table, and its build from the
//! provider's resource list.

use std::collections::BTreeMap;

use regex::Regex;

use crate::client::ApiGatewayClient;
use crate::error::MappingError;

/// Serialize a method and path into the canonical mapping key.
fn endpoint_key(method: &str, path: &str) -> String {
    format!("{method}#{path}") // e.g. POST#/path/to/resource
}

/// Compile an endpoint key into its anchored matcher.
///
/// The key is escaped wholesale, then every escaped `{name}` placeholder
/// becomes a one-or-more non-slash capture, and the result is anchored at
/// both ends. The compiled pattern therefore matches exactly the keys
/// obtained by substituting any non-slash value for each placeholder:
/// no partial-path matches, no cross-segment wildcard matches.
fn compile_key(key: &str) -> Result<Regex, regex::Error> {
    let placeholder = Regex::new(r"\\\{[^/]+?\\\}")?;
    let pattern = format!(
        "^{}$",
        placeholder.replace_all(&regex::escape(key), "([^/]+)")
    );
    Regex::new(&pattern)
}

/// A single mapping entry: the owning resource and its compiled matcher.
#[derive(Debug, Clone)]
struct MappedResource {
    resource_id: String,
    pattern: Regex,
}

/// The (method, path template) → resource table for one transport
/// instance. Built exactly once, read-only afterwards.
///
/// Entries live in a `BTreeMap`, so pattern fallback walks keys in
/// lexicographic order: when a concrete path matches several templates,
/// the lexicographically first entry wins, deterministically.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResourceMapping {
    entries: BTreeMap<String, MappedResource>,
}

impl ResourceMapping {
    /// Register one (resource, method, path) triple, overwriting any
    /// previous entry for the same key. Only called during the one-time
    /// table construction.
    fn add(&mut self, resource_id: &str, method: &str, path: &str) -> Result<(), MappingError> {
        let key = endpoint_key(method, path);
        let pattern = compile_key(&key)?;
        self.entries.insert(
            key,
            MappedResource {
                resource_id: resource_id.to_owned(),
                pattern,
            },
        );
        Ok(())
    }

    /// Resolve a concrete method and path to a resource id.
    ///
    /// An exact template hit skips pattern evaluation entirely; only
    /// then are matchers tried, in key order.
    pub(crate) fn resolve(&self, method: &str, path: &str) -> Option<&str> {
        let key = endpoint_key(method, path);

        if let Some(entry) = self.entries.get(&key) {
            return Some(&entry.resource_id);
        }

        self.entries
            .values()
            .find(|entry| entry.pattern.is_match(&key))
            .map(|entry| entry.resource_id.as_str())
    }

    /// Number of registered entries.
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Human-readable `key → "resource-id->pattern"` view of the table.
    /// Pure read, used for diagnostics.
    pub(crate) fn dump(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(key, entry)| {
                (
                    key.clone(),
                    format!("{}->{}", entry.resource_id, entry.pattern),
                )
            })
            .collect()
    }
}

/// Fetch the API's resource list and build the mapping table from its
/// flattened (resource, path, method) triples.
pub(crate) async fn build_mapping(
    client: &dyn ApiGatewayClient,
    rest_api_id: &str,
) -> Result<ResourceMapping, MappingError> {
    let resources = client
        .fetch_resources(rest_api_id)
        .await
        .map_err(MappingError::GetResources)?;

    let mut mapping = ResourceMapping::default();
    for resource in &resources {
        for method in &resource.methods {
            mapping.add(&resource.id, method, &resource.path)?;
        }
    }

    Ok(mapping)
}
