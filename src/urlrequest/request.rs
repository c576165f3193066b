use crate::base::neterror::NetError;
use crate::client::build_client;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use bytes::Bytes;
use std::collections::HashMap;

/// Send one request through an optional proxy.
///
/// - `proxy`: `scheme://[user:pass@]host[:port]`, or `""` for a direct
///   connection. Unparseable or unsupported proxies degrade to direct with a
///   logged warning.
/// - `timeout_secs`: absolute limit for the whole exchange; `0` disables it.
/// - `headers`: set in any order; invalid names or values fail the call.
///
/// The request is validated before a client is built and is executed exactly
/// once. Redirects are returned, not followed.
pub async fn send_request(
    method: &str,
    url: &str,
    proxy: &str,
    timeout_secs: u64,
    body: impl Into<Bytes>,
    headers: &HashMap<String, String>,
) -> Result<HttpResponse, NetError> {
    let mut request = HttpRequest::new(method, url)?;
    request.set_body(body);
    request.set_headers(headers)?;

    let client = build_client(proxy, timeout_secs);
    client.execute(request).await
}
