//! Serve plain HTTP requests through the AWS API Gateway
//! `TestInvokeMethod` operation.
//!
//! The transport lets client code issue ordinary HTTP requests against a
//! custom domain or the API's own invoke URL and have them answered by
//! whatever backend API Gateway has registered for that method and path,
//! without the stage being deployed or reachable over the network:
//!
//! - on first use it fetches the REST API's resource tree once and builds
//!   a `(method, path template) → resource id` table, templated path
//!   segments included;
//! - each request is matched against that table, translated into a
//!   test-invoke input, executed through the provider client, and the
//!   invoke output translated back into an HTTP response;
//! - requests addressed to `<api-id>.execute-api.<region>.amazonaws.com`
//!   get their leading stage path segment stripped before lookup.
//!
//! Exactly one resolve-invoke-translate step per request: no retries, no
//! caching, no connection pooling.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use apigw_invoke_transport::Transport;
//! use http_body_util::Empty;
//!
//! let config = aws_config::load_from_env().await;
//! let client = Arc::new(aws_sdk_apigateway::Client::new(&config));
//!
//! // Eager variant: mapping-build failures surface here, not on the
//! // first request.
//! let transport = Transport::initialized(client, "ortup5gufx").await?;
//!
//! let request = http::Request::get("https://custom-domain.com/api/v1/users/john.doe")
//!     .body(Empty::<bytes::Bytes>::new())?;
//! let response = transport.round_trip(request).await?;
//! ```

mod aws;
mod client;
mod error;
mod mapping;
mod models;
mod request;
mod response;
mod transport;

pub use client::ApiGatewayClient;
pub use error::{BoxError, ClientError, MappingError, TransportError};
pub use models::{ApiResource, InvokeRequest, InvokeResponse};
pub use transport::{Transport, TransportFuture};
