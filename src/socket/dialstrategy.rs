//! Turning a proxy descriptor into a way of reaching the target.
//!
//! Exactly one [`DialStrategy`] is active per client:
//! - [`DialStrategy::Direct`]: plain TCP to the target.
//! - [`DialStrategy::HttpProxy`]: forward HTTP proxy. `http` targets are sent
//!   to the proxy in absolute-form; `https` targets are tunnelled with
//!   `CONNECT` before TLS.
//! - [`DialStrategy::Socks5`]: SOCKS5 relay reached over a direct TCP
//!   connection.
//!
//! Misconfiguration never fails the caller: [`DialStrategy::from_proxy_str`]
//! logs the problem and degrades to `Direct`.

use crate::base::neterror::NetError;
use crate::socket::proxy::{ProxyCredentials, ProxyDescriptor, ProxyError, ProxyType};
use http::HeaderValue;
use tokio::net::TcpStream;
use std::net::{IpAddr, SocketAddr};
use tokio_socks::tcp::Socks5Stream;
use tokio_socks::TargetAddr;
use url::Url;

/// How outbound connections are established.
#[derive(Debug, Clone, Default)]
pub enum DialStrategy {
    /// No proxy.
    #[default]
    Direct,
    /// Forward HTTP proxy.
    HttpProxy(HttpProxy),
    /// SOCKS5 relay.
    Socks5(SocksDialer),
}

impl DialStrategy {
    /// Build the strategy for a parsed descriptor.
    ///
    /// Fails for unsupported proxy types and unusable ports; callers decide
    /// whether to fall back to [`DialStrategy::Direct`].
    pub fn build(descriptor: &ProxyDescriptor) -> Result<Self, ProxyError> {
        match descriptor.proxy_type() {
            ProxyType::Http => HttpProxy::new(descriptor).map(DialStrategy::HttpProxy),
            ProxyType::Socks5 => SocksDialer::new(descriptor).map(DialStrategy::Socks5),
            ProxyType::Unrecognized(scheme) => {
                Err(ProxyError::UnsupportedProxyType(scheme.clone()))
            }
        }
    }

    /// Parse and build in one step, degrading to `Direct` on any error.
    ///
    /// An empty string means "no proxy" and is not logged.
    pub fn from_proxy_str(proxy: &str) -> Self {
        if proxy.is_empty() {
            return DialStrategy::Direct;
        }

        match ProxyDescriptor::parse(proxy).and_then(|d| Self::build(&d)) {
            Ok(strategy) => {
                tracing::debug!(strategy = strategy.name(), "proxy configured");
                strategy
            }
            Err(e) => {
                tracing::warn!(error = %e, "invalid proxy configuration, connecting directly");
                DialStrategy::Direct
            }
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, DialStrategy::Direct)
    }

    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            DialStrategy::Direct => "direct",
            DialStrategy::HttpProxy(_) => "http",
            DialStrategy::Socks5(_) => "socks5",
        }
    }

    /// The forward proxy that should receive `target` in absolute-form, if
    /// any. TLS targets are tunnelled instead and get `None`.
    pub fn forward_proxy_for(&self, target: &Url) -> Option<&HttpProxy> {
        match self {
            DialStrategy::HttpProxy(p) if target.scheme() == "http" => Some(p),
            _ => None,
        }
    }
}

/// Forward HTTP proxy endpoint.
#[derive(Clone)]
pub struct HttpProxy {
    url: Url,
    host: String,
    port: u16,
    auth_header: Option<HeaderValue>,
}

impl HttpProxy {
    fn new(descriptor: &ProxyDescriptor) -> Result<Self, ProxyError> {
        let port = descriptor.port_number()?;
        let mut url = Url::parse(&format!("http://{}:{}", descriptor.host(), port))
            .map_err(|_| ProxyError::InvalidProxyUrl)?;

        if let Some(creds) = descriptor.credentials() {
            url.set_username(&creds.username)
                .map_err(|_| ProxyError::InvalidProxyUrl)?;
            url.set_password(Some(creds.password.as_str()))
                .map_err(|_| ProxyError::InvalidProxyUrl)?;
        }

        let auth_header = match descriptor.get_auth_header() {
            Some(value) => {
                let mut header =
                    HeaderValue::from_str(&value).map_err(|_| ProxyError::InvalidProxyUrl)?;
                header.set_sensitive(true);
                Some(header)
            }
            None => None,
        };

        Ok(Self {
            url,
            host: descriptor.host().to_string(),
            port,
            auth_header,
        })
    }

    /// Proxy URL, including userinfo when credentials were given.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Value for the `Proxy-Authorization` header.
    pub fn auth_header(&self) -> Option<&HeaderValue> {
        self.auth_header.as_ref()
    }
}

impl std::fmt::Debug for HttpProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpProxy")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth", &self.auth_header.is_some())
            .finish()
    }
}

/// SOCKS5 relay endpoint.
#[derive(Debug, Clone)]
pub struct SocksDialer {
    host: String,
    port: u16,
    credentials: Option<ProxyCredentials>,
}

/// Field length limits of the RFC 1929 username/password exchange.
const SOCKS_CREDENTIAL_LEN: std::ops::RangeInclusive<usize> = 1..=255;

impl SocksDialer {
    fn new(descriptor: &ProxyDescriptor) -> Result<Self, ProxyError> {
        if let Some(c) = descriptor.credentials() {
            if !SOCKS_CREDENTIAL_LEN.contains(&c.username.len())
                || !SOCKS_CREDENTIAL_LEN.contains(&c.password.len())
            {
                return Err(ProxyError::InvalidSocksCredentials);
            }
        }

        Ok(Self {
            host: descriptor.host().to_string(),
            port: descriptor.port_number()?,
            credentials: descriptor.credentials().cloned(),
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn requires_auth(&self) -> bool {
        self.credentials.is_some()
    }

    /// Open a tunnel to `target_host:target_port` through the relay.
    ///
    /// The relay itself is reached with a direct TCP connection. IP literals
    /// (bracketed or not) are sent as addresses; any other name is resolved
    /// by the relay.
    pub async fn dial(
        &self,
        target_host: &str,
        target_port: u16,
    ) -> Result<Socks5Stream<TcpStream>, NetError> {
        tracing::debug!(
            proxy = %format!("{}:{}", self.host, self.port),
            dest = %format!("{}:{}", target_host, target_port),
            auth = self.requires_auth(),
            "connecting via SOCKS5"
        );

        let socket = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "SOCKS5 relay unreachable");
                NetError::ProxyConnectionFailed
            })?;

        let target = socks_target(target_host, target_port);
        let result = match &self.credentials {
            Some(c) => {
                Socks5Stream::connect_with_password_and_socket(
                    socket,
                    target,
                    &c.username,
                    c.password.as_str(),
                )
                .await
            }
            None => Socks5Stream::connect_with_socket(socket, target).await,
        };

        result.map_err(|e| {
            tracing::debug!(error = %e, "SOCKS5 negotiation failed");
            match e {
                tokio_socks::Error::PasswordAuthFailure(_)
                | tokio_socks::Error::NoAcceptableAuthMethods => NetError::ProxyAuthRequested,
                _ => NetError::SocksConnectionFailed,
            }
        })
    }
}

/// SOCKS5 destination for a URL host, which may be a bracketed IPv6 literal.
fn socks_target(host: &str, port: u16) -> TargetAddr<'_> {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(ip) => TargetAddr::Ip(SocketAddr::new(ip, port)),
        Err(_) => TargetAddr::Domain(host.into(), port),
    }
}
