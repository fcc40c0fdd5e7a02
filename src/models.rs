//! Provider-shape data models.
//!
//! Transport-agnostic types mirroring the API Gateway call shapes the
//! transport consumes and produces. No serde derives here; nothing in
//! these types ever crosses a wire owned by this crate.

use std::collections::{BTreeSet, HashMap};

/// One resource node of a REST API, as returned by the provider.
///
/// Resources form a tree through [`parent_id`], but the transport never
/// traverses it; only the flattened (id, path, method) triples matter.
///
/// [`parent_id`]: ApiResource::parent_id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResource {
    /// Opaque provider-side resource identifier.
    pub id: String,
    /// Parent resource id, absent for the root resource.
    pub parent_id: Option<String>,
    /// Absolute slash-separated path, possibly containing literal
    /// `{name}` placeholder segments.
    pub path: String,
    /// HTTP methods declared on this resource.
    pub methods: BTreeSet<String>,
}

impl ApiResource {
    /// Create a resource with no parent and no methods.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            path: path.into(),
            methods: BTreeSet::new(),
        }
    }

    /// Set the parent resource id.
    #[must_use]
    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Declare the supported HTTP methods.
    #[must_use]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }
}

/// Input of the provider's test-invoke operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeRequest {
    /// Target REST API identifier.
    pub rest_api_id: String,
    /// Resolved resource identifier.
    pub resource_id: String,
    /// HTTP method, verbatim from the request.
    pub http_method: String,
    /// Effective request path, with `?<raw-query>` appended when the
    /// request carried a non-empty query string.
    pub path_with_query_string: String,
    /// Request body as text. `None` means the request had no body, which
    /// the provider treats differently from an empty string.
    pub body: Option<String>,
    /// All request headers, every value preserved per name.
    pub multi_value_headers: HashMap<String, Vec<String>>,
}

/// Output of the provider's test-invoke operation.
#[derive(Debug, Clone, Default)]
pub struct InvokeResponse {
    /// HTTP status reported by the invoked backend.
    pub status: i32,
    /// Response headers, every value preserved per name.
    pub multi_value_headers: HashMap<String, Vec<String>>,
    /// Response body text. The provider sends this for empty and
    /// non-empty responses alike; `None` is tolerated as empty.
    pub body: Option<String>,
    /// Backend latency in milliseconds, for diagnostics only.
    pub latency_ms: i64,
}
