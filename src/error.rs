//! Error types for the invoke transport.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Boxed error type used at the crate's collaborator boundaries.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error reported by an [`ApiGatewayClient`] implementation.
///
/// Cloneable (the cause is shared behind an `Arc`) so a failed mapping
/// build can be cached once and replayed verbatim to every caller of the
/// same transport instance. The original error stays reachable through
/// [`std::error::Error::source`] for programmatic matching.
///
/// [`ApiGatewayClient`]: crate::client::ApiGatewayClient
#[derive(Debug, Clone)]
pub struct ClientError(Arc<dyn StdError + Send + Sync + 'static>);

impl ClientError {
    /// Wrap a provider-side error.
    pub fn new<E>(source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self(Arc::new(source))
    }

    /// Borrow the underlying provider error.
    #[must_use]
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.0.as_ref()
    }
}

impl From<BoxError> for ClientError {
    fn from(source: BoxError) -> Self {
        Self(Arc::from(source))
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for ClientError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.0.as_ref() as &(dyn StdError + 'static))
    }
}

/// Failure while building the endpoint mapping table.
///
/// The transport caches this outcome for its whole lifetime: a transport
/// whose first mapping build fails never becomes usable and replays the
/// same error on every subsequent call, hence `Clone`.
#[derive(Error, Debug, Clone)]
pub enum MappingError {
    /// The provider failed or rejected the resource fetch.
    #[error("get resources error: {0}")]
    GetResources(#[source] ClientError),

    /// A resource path produced an uncompilable matcher. Should not occur
    /// for well-formed paths coming from the provider itself.
    #[error("could not compile resource regex: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors surfaced by [`Transport::round_trip`].
///
/// Every failure category is distinguishable so callers can, for
/// instance, map [`TransportError::ResourceNotFound`] to a 404-equivalent
/// and mapping or invoke failures to a 502-equivalent. The transport
/// itself never imposes HTTP status codes on its errors.
///
/// [`Transport::round_trip`]: crate::transport::Transport::round_trip
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransportError {
    /// The one-time mapping build failed. Sticky: replayed on every call
    /// without a second fetch attempt.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// No resource is registered for the request's method and path.
    /// Reflects a configuration mismatch, never retried.
    #[error("resource not found for {method} {uri}")]
    ResourceNotFound {
        /// Method of the unresolved request.
        method: http::Method,
        /// Full request URI, for diagnostics.
        uri: http::Uri,
    },

    /// Reading the inbound request body failed. Aborts the round trip
    /// before any provider interaction.
    #[error("read request body error: {0}")]
    BodyRead(#[source] BoxError),

    /// The provider invoke call failed. The underlying error is kept as
    /// the source so callers can match on it.
    #[error("invoke error: {0}")]
    Invoke(#[source] ClientError),

    /// The invoke output reported a status outside the representable
    /// HTTP range.
    #[error("invalid invoke status {0}")]
    InvalidStatus(i32),

    /// The invoke output carried headers the HTTP response rejected.
    #[error("build response error: {0}")]
    ResponseBuild(#[from] http::Error),
}

impl TransportError {
    /// True when the failure is the distinct resource-not-found kind.
    #[must_use]
    pub fn is_resource_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}
