//! Translation of provider invoke outputs into HTTP responses.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{Response, StatusCode, Version};
use http_body_util::Full;

use crate::error::TransportError;
use crate::models::InvokeResponse;

/// Build the HTTP response for an invoke output.
///
/// The body is materialized as a [`Full`] so its advertised length is the
/// exact byte length of the output's text (an empty body advertises
/// length 0, not nothing); an output with zero headers yields a response
/// with an empty header map. The protocol version echoes the inbound
/// request's. A missing body field is a provider contract violation and
/// is treated as empty rather than a panic.
pub(crate) fn build_http_response(
    version: Version,
    output: InvokeResponse,
) -> Result<Response<Full<Bytes>>, TransportError> {
    let status = u16::try_from(output.status)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .ok_or(TransportError::InvalidStatus(output.status))?;

    let body = output.body.unwrap_or_default();

    let mut response = Response::builder()
        .status(status)
        .version(version)
        .body(Full::new(Bytes::from(body)))?;

    let headers = response.headers_mut();
    for (name, values) in output.multi_value_headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(http::Error::from)?;
        for value in values {
            let value = HeaderValue::from_str(&value).map_err(http::Error::from)?;
            headers.append(name.clone(), value);
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body::Body;
    use std::collections::HashMap;

    #[test]
    fn test_status_headers_and_body_copied() {
        let output = InvokeResponse {
            status: 200,
            multi_value_headers: HashMap::from([(
                "Content-Type".to_owned(),
                vec!["application/json".to_owned()],
            )]),
            body: Some(r#"{"username":"john.doe","age":33}"#.to_owned()),
            latency_ms: 12,
        };

        let response = build_http_response(Version::HTTP_11, output).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.version(), Version::HTTP_11);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/json"
        );
        assert_eq!(
            response.body().size_hint().exact(),
            Some(r#"{"username":"john.doe","age":33}"#.len() as u64)
        );
    }

    #[test]
    fn test_204_with_empty_body_advertises_zero_length() {
        let output = InvokeResponse {
            status: 204,
            body: Some(String::new()),
            ..InvokeResponse::default()
        };

        let response = build_http_response(Version::HTTP_11, output).unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.body().size_hint().exact(), Some(0));
        assert!(response.headers().is_empty());
    }

    #[test]
    fn test_missing_body_field_treated_as_empty() {
        let output = InvokeResponse {
            status: 200,
            body: None,
            ..InvokeResponse::default()
        };

        let response = build_http_response(Version::HTTP_11, output).unwrap();
        assert_eq!(response.body().size_hint().exact(), Some(0));
    }

    #[test]
    fn test_multi_value_headers_all_appended() {
        let output = InvokeResponse {
            status: 200,
            multi_value_headers: HashMap::from([(
                "Set-Cookie".to_owned(),
                vec!["a=1".to_owned(), "b=2".to_owned()],
            )]),
            body: Some(String::new()),
            ..InvokeResponse::default()
        };

        let response = build_http_response(Version::HTTP_11, output).unwrap();
        let cookies: Vec<_> = response.headers().get_all("set-cookie").iter().collect();
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_out_of_range_status_is_an_error() {
        let output = InvokeResponse {
            status: -1,
            body: Some(String::new()),
            ..InvokeResponse::default()
        };

        let err = build_http_response(Version::HTTP_11, output).unwrap_err();
        assert!(matches!(err, TransportError::InvalidStatus(-1)));
    }
}
