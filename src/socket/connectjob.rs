use crate::base::neterror::NetError;
use crate::socket::dialstrategy::{DialStrategy, HttpProxy};
use crate::socket::stream::BoxedSocket;
use crate::socket::tls::TlsConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use url::Url;

/// Upper bound on the size of a `CONNECT` response head.
const MAX_TUNNEL_RESPONSE: usize = 8 * 1024;

/// Manages the connection process: DNS -> TCP -> proxy handshake -> TLS.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    pub async fn connect(
        url: &Url,
        strategy: &DialStrategy,
        tls: &TlsConfig,
    ) -> Result<BoxedSocket, NetError> {
        let target_host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let target_port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        let socket = match strategy {
            DialStrategy::Direct => {
                let stream = tcp_connect(target_host, target_port).await?;
                BoxedSocket::new(stream, "tcp")
            }
            DialStrategy::HttpProxy(proxy) => {
                let mut stream = tcp_connect(proxy.host(), proxy.port()).await.map_err(|e| {
                    tracing::debug!(error = %e, "HTTP proxy unreachable");
                    NetError::ProxyConnectionFailed
                })?;

                // Plain http goes to the proxy in absolute-form; only TLS
                // targets need a tunnel.
                if url.scheme() == "https" {
                    establish_tunnel(&mut stream, proxy, target_host, target_port).await?;
                }
                BoxedSocket::new(stream, "tcp")
            }
            DialStrategy::Socks5(dialer) => {
                let stream = dialer.dial(target_host, target_port).await?;
                BoxedSocket::new(stream, "socks5")
            }
        };

        // TLS always happens *after* any tunnel is established
        if url.scheme() == "https" {
            tls_handshake(socket, target_host, tls).await
        } else {
            Ok(socket)
        }
    }
}

async fn tcp_connect(host: &str, port: u16) -> Result<TcpStream, NetError> {
    let addr_str = format!("{}:{}", host, port);
    let addrs = tokio::net::lookup_host(&addr_str).await.map_err(|e| {
        tracing::debug!(host = %host, error = %e, "DNS resolution failed");
        NetError::NameNotResolved
    })?;

    let mut last_err = NetError::NameNotResolved;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                tracing::debug!(addr = %addr, "TCP connected");
                return Ok(stream);
            }
            Err(e) => {
                tracing::debug!(addr = %addr, error = %e, "TCP connect failed");
                last_err = NetError::from(e);
            }
        }
    }
    Err(last_err)
}

/// Send `CONNECT host:port` through an HTTP proxy and wait for a 2xx.
async fn establish_tunnel(
    stream: &mut TcpStream,
    proxy: &HttpProxy,
    target_host: &str,
    target_port: u16,
) -> Result<(), NetError> {
    let target = format!("{}:{}", target_host, target_port);
    let mut connect_req = format!("CONNECT {} HTTP/1.1\r\nHost: {}\r\n", target, target);
    if let Some(auth) = proxy.auth_header().and_then(|v| v.to_str().ok()) {
        connect_req.push_str(&format!("Proxy-Authorization: {}\r\n", auth));
    }
    connect_req.push_str("\r\n");

    stream
        .write_all(connect_req.as_bytes())
        .await
        .map_err(|_| NetError::TunnelConnectionFailed)?;

    // Read byte-wise up to the blank line so no tunnelled bytes are consumed
    let mut head = Vec::with_capacity(256);
    let mut byte = [0u8; 1];
    while !head.ends_with(b"\r\n\r\n") {
        if head.len() >= MAX_TUNNEL_RESPONSE {
            return Err(NetError::TunnelConnectionFailed);
        }
        let n = stream
            .read(&mut byte)
            .await
            .map_err(|_| NetError::TunnelConnectionFailed)?;
        if n == 0 {
            return Err(NetError::TunnelConnectionFailed);
        }
        head.push(byte[0]);
    }

    let status = parse_status_code(&head).ok_or(NetError::TunnelConnectionFailed)?;
    match status {
        200..=299 => {
            tracing::debug!(tunnel = %target, "proxy tunnel established");
            Ok(())
        }
        407 => Err(NetError::ProxyAuthRequested),
        _ => {
            tracing::debug!(tunnel = %target, status, "proxy refused tunnel");
            Err(NetError::TunnelConnectionFailed)
        }
    }
}

/// Extract the status code from an `HTTP/1.x NNN reason` status line.
fn parse_status_code(head: &[u8]) -> Option<u16> {
    let text = std::str::from_utf8(head).ok()?;
    let line = text.lines().next()?;
    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/1.") {
        return None;
    }
    parts.next()?.parse().ok()
}

async fn tls_handshake(
    socket: BoxedSocket,
    host: &str,
    tls: &TlsConfig,
) -> Result<BoxedSocket, NetError> {
    let connector = tls.connector()?;
    let mut config = connector.configure().map_err(|_| NetError::SslProtocolError)?;

    if !tls.verify_certificates {
        config.set_verify_hostname(false);
    }
    let server_name = host.trim_start_matches('[').trim_end_matches(']');
    if !TlsConfig::should_set_sni(host) {
        config.set_use_server_name_indication(false);
    }

    let tls_stream = tokio_boring::connect(config, server_name, socket)
        .await
        .map_err(|e| {
            tracing::debug!(host = %host, error = ?e, "SSL handshake failed");
            NetError::SslProtocolError
        })?;

    Ok(BoxedSocket::new(tls_stream, "tls"))
}
