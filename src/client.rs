//! The narrow provider-client abstraction.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::models::{ApiResource, InvokeRequest, InvokeResponse};

/// The three API Gateway operations the transport consumes.
///
/// Kept deliberately narrow so the transport can be exercised against a
/// fake without depending on the full SDK surface. Implemented for
/// `aws_sdk_apigateway::Client` in this crate; authentication, retries
/// and connection lifecycle are the implementation's concern, never the
/// transport's.
#[async_trait]
pub trait ApiGatewayClient: Send + Sync {
    /// Fetch every resource of the REST API, declared methods included.
    async fn fetch_resources(&self, rest_api_id: &str) -> Result<Vec<ApiResource>, ClientError>;

    /// Execute the test-invoke operation against one resolved resource.
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, ClientError>;

    /// Region the client is configured for, when known. Used to compute
    /// the provider invoke host for stage-prefix detection.
    fn region(&self) -> Option<String>;
}
