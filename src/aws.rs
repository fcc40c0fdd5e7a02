//! Binding of [`ApiGatewayClient`] to the AWS SDK client.

use async_trait::async_trait;
use aws_sdk_apigateway::Client;

use crate::client::ApiGatewayClient;
use crate::error::ClientError;
use crate::models::{ApiResource, InvokeRequest, InvokeResponse};

#[async_trait]
impl ApiGatewayClient for Client {
    async fn fetch_resources(&self, rest_api_id: &str) -> Result<Vec<ApiResource>, ClientError> {
        let mut pages = self
            .get_resources()
            .rest_api_id(rest_api_id)
            .embed("methods")
            .into_paginator()
            .items()
            .send();

        let mut resources = Vec::new();
        while let Some(item) = pages.next().await {
            let item = item.map_err(ClientError::new)?;
            resources.push(ApiResource {
                id: item.id.unwrap_or_default(),
                parent_id: item.parent_id,
                path: item.path.unwrap_or_default(),
                methods: item
                    .resource_methods
                    .unwrap_or_default()
                    .into_keys()
                    .collect(),
            });
        }

        Ok(resources)
    }

    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, ClientError> {
        let output = self
            .test_invoke_method()
            .rest_api_id(request.rest_api_id)
            .resource_id(request.resource_id)
            .http_method(request.http_method)
            .path_with_query_string(request.path_with_query_string)
            .set_body(request.body)
            .set_multi_value_headers(Some(request.multi_value_headers))
            .send()
            .await
            .map_err(ClientError::new)?;

        Ok(InvokeResponse {
            status: output.status,
            multi_value_headers: output.multi_value_headers.unwrap_or_default(),
            body: output.body,
            latency_ms: output.latency,
        })
    }

    fn region(&self) -> Option<String> {
        self.config().region().map(ToString::to_string)
    }
}
