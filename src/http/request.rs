//! Outbound request description.
//!
//! Everything that can be wrong with a request (method, URL, headers) is
//! rejected here, before a client is built or a socket is opened.

use crate::base::neterror::NetError;
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use std::collections::HashMap;
use url::Url;

/// A fully validated request ready to be executed once.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Bytes,
}

impl HttpRequest {
    /// Validate `method` and `url`. Only `http` and `https` URLs are accepted.
    pub fn new(method: &str, url: &str) -> Result<Self, NetError> {
        let method = Method::from_bytes(method.as_bytes()).map_err(|_| NetError::MethodNotSupported)?;
        let url = Url::parse(url).map_err(|_| NetError::InvalidUrl)?;
        Self::from_parts(method, url)
    }

    pub fn from_parts(method: Method, url: Url) -> Result<Self, NetError> {
        match url.scheme() {
            "http" | "https" => {}
            _ => return Err(NetError::UnknownUrlScheme),
        }
        if url.host_str().is_none() {
            return Err(NetError::InvalidUrl);
        }
        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        })
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<(), NetError> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| NetError::InvalidHeader)?;
        let value = HeaderValue::from_str(value).map_err(|_| NetError::InvalidHeader)?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Set every header in `headers`. Iteration order is irrelevant.
    pub fn set_headers(&mut self, headers: &HashMap<String, String>) -> Result<(), NetError> {
        for (name, value) in headers {
            self.set_header(name, value)?;
        }
        Ok(())
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// `Host` header value: the host plus the port when it is not the
    /// scheme default.
    pub fn host_header(&self) -> Option<String> {
        let host = self.url.host_str()?;
        Some(match self.url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        })
    }

    /// Request target in origin-form (`/path?query`).
    pub fn origin_form(&self) -> String {
        match self.url.query() {
            Some(q) => format!("{}?{}", self.url.path(), q),
            None => self.url.path().to_string(),
        }
    }

    /// Request target in absolute-form, as sent to a forward proxy. The
    /// fragment is never sent.
    pub fn absolute_form(&self) -> String {
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.to_string()
    }

    /// Same request aimed at a new location, used when following redirects.
    pub(crate) fn redirected(&self, url: Url, method: Method, keep_body: bool) -> Self {
        let mut headers = self.headers.clone();
        if !keep_body {
            headers.remove(http::header::CONTENT_LENGTH);
            headers.remove(http::header::CONTENT_TYPE);
        }
        // Host is recomputed for the new target
        headers.remove(http::header::HOST);
        if !same_origin(&self.url, &url) {
            headers.remove(http::header::AUTHORIZATION);
            headers.remove(http::header::COOKIE);
        }
        Self {
            method,
            url,
            headers,
            body: if keep_body { self.body.clone() } else { Bytes::new() },
        }
    }
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}
