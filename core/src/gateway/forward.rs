//! Transparent request forwarding
//!
//! Relays an inbound request to the backend and the backend's response back
//! to the client, byte for byte. Only transport headers are adjusted; the
//! payload is never inspected, so the backend API can evolve without
//! touching this layer.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, HeaderMap, Method};
use axum::response::Response;
use bytes::Bytes;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use rand::Rng;

use super::error::GatewayError;
use super::upstream::UpstreamClient;

/// Everything outside the unreserved set and `! ~ * ' ( )` is escaped, so a
/// caller-supplied segment cannot smuggle extra path components.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape one path segment for inclusion in a logical path.
pub fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Inbound headers minus `Host`: the backend serves a different origin than
/// the client perceives.
fn request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = inbound.clone();
    headers.remove(header::HOST);
    headers
}

/// Backend headers minus `Transfer-Encoding`, which is invalid to relay
/// verbatim once the body is re-framed.
fn response_headers(backend: &HeaderMap) -> HeaderMap {
    let mut headers = backend.clone();
    headers.remove(header::TRANSFER_ENCODING);
    headers
}

/// Forward one request to the backend at `logical_path` and relay the
/// response. GET/HEAD requests carry no body; everything else forwards the
/// inbound body unchanged. The backend's status code and headers come back
/// as-is (modulo `Transfer-Encoding`), and the response body is streamed
/// through without buffering. No retry on failure.
pub async fn forward_request(
    upstream: &UpstreamClient,
    logical_path: &str,
    request: Request,
) -> Result<Response, GatewayError> {
    let trace_id: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(6)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    let url = upstream.resolve(logical_path)?;
    let (parts, body) = request.into_parts();
    let method = parts.method;

    tracing::debug!("[{}] {} {} -> {}", trace_id, method, parts.uri.path(), url);

    let mut builder = upstream
        .client()
        .request(method.clone(), url)
        .headers(request_headers(&parts.headers));

    if method != Method::GET && method != Method::HEAD {
        let payload: Bytes = to_bytes(body, usize::MAX).await?;
        builder = builder.body(payload);
    }

    let backend_response = builder.send().await?;
    let status = backend_response.status();

    tracing::info!("[{}] {} {} -> {}", trace_id, method, logical_path, status);

    let headers = response_headers(backend_response.headers());
    let mut response = Response::new(Body::from_stream(backend_response.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn host_is_stripped_and_custom_headers_survive() {
        let mut inbound = HeaderMap::new();
        inbound.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
        inbound.insert("x-custom", HeaderValue::from_static("v"));
        inbound.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer demo-token"),
        );

        let outbound = request_headers(&inbound);
        assert!(outbound.get(header::HOST).is_none());
        assert_eq!(outbound.get("x-custom").unwrap(), "v");
        assert_eq!(
            outbound.get(header::AUTHORIZATION).unwrap(),
            "Bearer demo-token"
        );
    }

    #[test]
    fn transfer_encoding_is_not_relayed() {
        let mut backend = HeaderMap::new();
        backend.insert(
            header::TRANSFER_ENCODING,
            HeaderValue::from_static("chunked"),
        );
        backend.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let relayed = response_headers(&backend);
        assert!(relayed.get(header::TRANSFER_ENCODING).is_none());
        assert_eq!(relayed.get(header::CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn path_segments_are_escaped() {
        assert_eq!(encode_path_segment("orders/2024"), "orders%2F2024");
        assert_eq!(encode_path_segment("DemoEmployees"), "DemoEmployees");
        assert_eq!(encode_path_segment("a b"), "a%20b");
        assert_eq!(encode_path_segment("50%"), "50%25");
        assert_eq!(encode_path_segment("x?y=z"), "x%3Fy%3Dz");
        // Marks that stay bare.
        assert_eq!(encode_path_segment("it's-a_table.v2"), "it's-a_table.v2");
    }
}
