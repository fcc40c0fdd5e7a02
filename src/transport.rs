//! The transport orchestrator: one-time mapping initialization, path
//! normalization, endpoint resolution and the invoke round trip.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{Request, Response, Uri};
use http_body::Body;
use http_body_util::{BodyExt, Full};
use tokio::sync::OnceCell;
use tower::Service;
use tracing::{debug, instrument};

use crate::client::ApiGatewayClient;
use crate::error::{BoxError, MappingError, TransportError};
use crate::mapping::{ResourceMapping, build_mapping};
use crate::request::build_invoke_request;
use crate::response::build_http_response;

/// HTTP transport that serves requests through the provider's
/// test-invoke operation instead of a real network call.
///
/// The mapping from (method, path template) to resource id is fetched
/// from the provider at most once per instance; the outcome, success or
/// failure, is cached for the instance's whole lifetime. Cloning is
/// cheap and clones share that one-time guard, so any number of
/// concurrent callers triggers exactly one resource fetch.
#[derive(Clone)]
pub struct Transport {
    inner: Arc<Inner>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("rest_api_id", &self.inner.rest_api_id)
            .field("invoke_url_host", &self.inner.invoke_url_host)
            .finish_non_exhaustive()
    }
}

struct Inner {
    client: Arc<dyn ApiGatewayClient>,
    rest_api_id: String,
    /// `<api-id>.execute-api.<region>.amazonaws.com`. Absent when the
    /// client reports no region, which disables stage-prefix stripping.
    invoke_url_host: Option<String>,
    mapping: OnceCell<Result<ResourceMapping, MappingError>>,
}

impl Transport {
    /// Create a transport whose mapping table is built lazily on the
    /// first round trip.
    #[must_use]
    pub fn new(client: Arc<dyn ApiGatewayClient>, rest_api_id: impl Into<String>) -> Self {
        let rest_api_id = rest_api_id.into();
        let invoke_url_host = client
            .region()
            .map(|region| format!("{rest_api_id}.execute-api.{region}.amazonaws.com"));

        Self {
            inner: Arc::new(Inner {
                client,
                rest_api_id,
                invoke_url_host,
                mapping: OnceCell::new(),
            }),
        }
    }

    /// Create a transport and build its mapping table immediately,
    /// reporting a fetch failure synchronously instead of deferring it
    /// to the first request.
    ///
    /// # Errors
    /// Returns [`TransportError::Mapping`] when the resource fetch or
    /// pattern compilation fails. The failure is cached: the returned
    /// error is the same one later calls on the instance would replay.
    pub async fn initialized(
        client: Arc<dyn ApiGatewayClient>,
        rest_api_id: impl Into<String>,
    ) -> Result<Self, TransportError> {
        let transport = Self::new(client, rest_api_id);
        transport.mapping().await?;
        Ok(transport)
    }

    /// Diagnostic view of the mapping table as `key → "resource-id->pattern"`,
    /// or `None` until the one-time build has succeeded.
    #[must_use]
    pub fn mappings(&self) -> Option<BTreeMap<String, String>> {
        match self.inner.mapping.get() {
            Some(Ok(mapping)) => Some(mapping.dump()),
            _ => None,
        }
    }

    /// Serve one HTTP request through the provider's test-invoke
    /// operation.
    ///
    /// Requests addressed to the provider's own invoke URL get their
    /// leading stage path segment removed before lookup; custom-domain
    /// paths are used unchanged. Whatever cancellation accompanies the
    /// caller's future propagates into the provider calls; nothing is
    /// retried.
    ///
    /// # Errors
    /// A failed mapping build is sticky and replayed on every call. An
    /// unresolved method+path yields [`TransportError::ResourceNotFound`].
    /// Body-read failures abort before any provider interaction, and
    /// invoke failures are wrapped with their source preserved.
    #[instrument(
        skip_all,
        fields(
            rest_api_id = %self.inner.rest_api_id,
            method = %request.method(),
            path = %request.uri().path(),
        )
    )]
    pub async fn round_trip<B>(
        &self,
        request: Request<B>,
    ) -> Result<Response<Full<Bytes>>, TransportError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let mapping = self.mapping().await?;

        let (parts, body) = request.into_parts();

        let path = if self.is_invoke_url(&parts.uri) {
            strip_stage_prefix(parts.uri.path())
        } else {
            parts.uri.path().to_owned()
        };

        let Some(resource_id) = mapping.resolve(parts.method.as_str(), &path) else {
            return Err(TransportError::ResourceNotFound {
                method: parts.method.clone(),
                uri: parts.uri.clone(),
            });
        };
        let resource_id = resource_id.to_owned();

        let body = body
            .collect()
            .await
            .map_err(|error| TransportError::BodyRead(error.into()))?
            .to_bytes();

        let invoke =
            build_invoke_request(&parts, &body, &self.inner.rest_api_id, &resource_id, &path);
        debug!(
            resource_id = %invoke.resource_id,
            http_method = %invoke.http_method,
            path_with_query_string = %invoke.path_with_query_string,
            has_body = invoke.body.is_some(),
            "invoke input created"
        );

        let output = self
            .inner
            .client
            .invoke(invoke)
            .await
            .map_err(TransportError::Invoke)?;

        debug!(
            status = output.status,
            latency_ms = output.latency_ms,
            "invoke success"
        );

        build_http_response(parts.version, output)
    }

    /// Run the one-time mapping build, or replay its cached outcome.
    async fn mapping(&self) -> Result<&ResourceMapping, TransportError> {
        let inner = &self.inner;
        let outcome = inner
            .mapping
            .get_or_init(|| async {
                debug!(rest_api_id = %inner.rest_api_id, "initializing endpoint mappings");
                let built = build_mapping(inner.client.as_ref(), &inner.rest_api_id).await;
                if let Ok(mapping) = &built {
                    debug!(
                        rest_api_id = %inner.rest_api_id,
                        entries = mapping.len(),
                        mappings = ?mapping.dump(),
                        "mappings ready"
                    );
                }
                built
            })
            .await;

        match outcome {
            Ok(mapping) => Ok(mapping),
            Err(error) => Err(TransportError::Mapping(error.clone())),
        }
    }

    fn is_invoke_url(&self, uri: &Uri) -> bool {
        match (&self.inner.invoke_url_host, uri.host()) {
            (Some(invoke_host), Some(host)) => host.contains(invoke_host.as_str()),
            _ => false,
        }
    }
}

/// Future type returned by the tower [`Service`] impl.
pub type TransportFuture =
    Pin<Box<dyn Future<Output = Result<Response<Full<Bytes>>, TransportError>> + Send>>;

/// Tower plumbing so the transport drops into a generic client stack.
/// Always ready: all backpressure lives in the provider client.
impl Service<Request<Full<Bytes>>> for Transport {
    type Response = Response<Full<Bytes>>;
    type Error = TransportError;
    type Future = TransportFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Full<Bytes>>) -> Self::Future {
        let transport = self.clone();
        Box::pin(async move { transport.round_trip(request).await })
    }
}

/// Remove the leading stage segment from an invoke-URL path.
///
/// `/stage/api/v1/demo` becomes `/api/v1/demo`; a bare `/stage` becomes
/// `/`.
fn strip_stage_prefix(path: &str) -> String {
    let mut segments = path.split('/');
    // A leading '/' yields an empty first segment; the next one is the
    // stage name.
    segments.next();
    if segments.next().is_none() {
        return path.to_owned();
    }

    let remainder = segments.collect::<Vec<_>>().join("/");
    format!("/{remainder}")
}
