use url::Url;

/// Reduce a URL to `scheme://host[:port]`.
///
/// - Input without an `http://` or `https://` prefix is treated as `http`.
/// - Port 443 forces `https` and is dropped.
/// - Default ports are dropped; any other port is kept.
/// - Path, query and credentials are discarded.
///
/// Returns an empty string when the input cannot be parsed.
pub fn normalize_url(input: &str) -> String {
    let with_scheme = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    };

    let url = match Url::parse(&with_scheme) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %e, "cannot normalize URL");
            return String::new();
        }
    };
    let Some(host) = url.host_str() else {
        return String::new();
    };

    match url.port() {
        None => format!("{}://{}", url.scheme(), host),
        Some(443) => format!("https://{}", host),
        Some(port) => format!("{}://{}:{}", url.scheme(), host, port),
    }
}
