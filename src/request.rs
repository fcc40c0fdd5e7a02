//! Translation of inbound HTTP requests into provider invoke inputs.

use std::collections::HashMap;

use http::request::Parts;

use crate::models::InvokeRequest;

/// Build the provider invoke input for a resolved resource.
///
/// All header values are kept per name; non-UTF-8 values are decoded
/// lossily since the provider only carries text. An empty collected body
/// maps to no body at all: downstream matching distinguishes an absent
/// body from an empty-string one. `path` is the effective lookup path,
/// already stage-stripped when the request used the invoke URL.
pub(crate) fn build_invoke_request(
    parts: &Parts,
    body: &[u8],
    rest_api_id: &str,
    resource_id: &str,
    path: &str,
) -> InvokeRequest {
    let mut multi_value_headers: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in &parts.headers {
        multi_value_headers
            .entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    let mut path_with_query_string = path.to_owned();
    if let Some(query) = parts.uri.query() {
        if !query.is_empty() {
            path_with_query_string.push('?');
            path_with_query_string.push_str(query);
        }
    }

    InvokeRequest {
        rest_api_id: rest_api_id.to_owned(),
        resource_id: resource_id.to_owned(),
        http_method: parts.method.as_str().to_owned(),
        path_with_query_string,
        body: (!body.is_empty()).then(|| String::from_utf8_lossy(body).into_owned()),
        multi_value_headers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts_for(uri: &str) -> Parts {
        let (parts, ()) = http::Request::builder()
            .method(http::Method::PUT)
            .uri(uri)
            .header("Content-Type", "application/json")
            .header("X-Tag", "one")
            .header("X-Tag", "two")
            .body(())
            .unwrap()
            .into_parts();
        parts
    }

    #[test]
    fn test_headers_keep_every_value_per_name() {
        let parts = parts_for("https://custom-domain.com/api/v1/users");
        let input = build_invoke_request(&parts, b"", "abc123", "8143a9", "/api/v1/users");

        assert_eq!(
            input.multi_value_headers.get("x-tag"),
            Some(&vec!["one".to_owned(), "two".to_owned()])
        );
        assert_eq!(
            input.multi_value_headers.get("content-type"),
            Some(&vec!["application/json".to_owned()])
        );
    }

    #[test]
    fn test_query_string_appended_verbatim() {
        let parts = parts_for("https://custom-domain.com/api/v1/users?attributes=age&sort=asc");
        let input = build_invoke_request(&parts, b"", "abc123", "8143a9", "/api/v1/users");

        assert_eq!(
            input.path_with_query_string,
            "/api/v1/users?attributes=age&sort=asc"
        );
    }

    #[test]
    fn test_no_query_string_means_no_question_mark() {
        let parts = parts_for("https://custom-domain.com/api/v1/users");
        let input = build_invoke_request(&parts, b"", "abc123", "8143a9", "/api/v1/users");

        assert_eq!(input.path_with_query_string, "/api/v1/users");
    }

    #[test]
    fn test_empty_body_is_unset_not_empty_string() {
        let parts = parts_for("https://custom-domain.com/api/v1/users");

        let without = build_invoke_request(&parts, b"", "abc123", "8143a9", "/api/v1/users");
        assert_eq!(without.body, None);

        let with = build_invoke_request(&parts, br#"{"a":1}"#, "abc123", "8143a9", "/api/v1/users");
        assert_eq!(with.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn test_method_and_identifiers_copied_verbatim() {
        let parts = parts_for("https://custom-domain.com/api/v1/users");
        let input = build_invoke_request(&parts, b"", "abc123", "8143a9", "/api/v1/users");

        assert_eq!(input.http_method, "PUT");
        assert_eq!(input.rest_api_id, "abc123");
        assert_eq!(input.resource_id, "8143a9");
    }
}
