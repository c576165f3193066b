//! Socket abstraction over the different transports a request can ride on.
//!
//! A connection may be plain TCP, a SOCKS5 tunnel, or TLS layered over either
//! (including TLS inside an HTTP `CONNECT` tunnel). [`BoxedSocket`] erases the
//! concrete type so the HTTP layer sees a single stream.

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_boring::SslStream;
use tokio_socks::tcp::Socks5Stream;

/// A trait for any socket that supports async read/write operations.
pub trait StreamSocket: AsyncRead + AsyncWrite + Unpin + Send + Sync + 'static {}

impl StreamSocket for TcpStream {}

impl StreamSocket for Socks5Stream<TcpStream> {}

impl<S: StreamSocket> StreamSocket for SslStream<S> {}

impl StreamSocket for BoxedSocket {}

/// Type-erased connected socket.
pub struct BoxedSocket {
    inner: Pin<Box<dyn StreamSocket>>,
    kind: &'static str,
}

impl BoxedSocket {
    /// Create a new BoxedSocket from any StreamSocket.
    pub fn new<S: StreamSocket>(socket: S, kind: &'static str) -> Self {
        Self {
            inner: Box::pin(socket),
            kind,
        }
    }

    /// Transport label (`tcp`, `socks5`, `tls`).
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl fmt::Debug for BoxedSocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedSocket").field("kind", &self.kind).finish()
    }
}

impl AsyncRead for BoxedSocket {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        self.inner.as_mut().poll_read(cx, buf)
    }
}

impl AsyncWrite for BoxedSocket {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<std::io::Result<usize>> {
        self.inner.as_mut().poll_write(cx, buf)
    }

    fn poll_flush(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        self.inner.as_mut().poll_flush(cx)
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
        self.inner.as_mut().poll_shutdown(cx)
    }
}
