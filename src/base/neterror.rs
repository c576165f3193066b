use thiserror::Error;

/// Errors surfaced by request construction and execution.
///
/// Codes follow Chromium's `net_error_list.h` where an equivalent exists;
/// crate-specific conditions live in the `-10000` range.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum NetError {
    // Request construction
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Method not supported")]
    MethodNotSupported,
    #[error("Invalid header name or value")]
    InvalidHeader,

    // Transport
    #[error("Operation timed out")]
    TimedOut,
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("Tunnel connection failed")]
    TunnelConnectionFailed,
    #[error("SOCKS connection failed")]
    SocksConnectionFailed,
    #[error("Proxy auth requested")]
    ProxyAuthRequested,
    #[error("Proxy connection failed")]
    ProxyConnectionFailed,
    #[error("Invalid response")]
    InvalidResponse,
    #[error("Empty response")]
    EmptyResponse,
    #[error("Invalid redirect")]
    InvalidRedirect,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Failed to read response body")]
    HttpBodyError,

    // Body decoding
    #[error("Response body is not valid UTF-8")]
    InvalidUtf8,
    #[error("Response body is not valid JSON")]
    JsonParseError,
}

impl NetError {
    /// Numeric code, logged as `code` alongside the error.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::TimedOut => -7,
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionFailed => -104,
            NetError::NameNotResolved => -105,
            NetError::SslProtocolError => -107,
            NetError::TunnelConnectionFailed => -111,
            NetError::SocksConnectionFailed => -120,
            NetError::ProxyAuthRequested => -127,
            NetError::ProxyConnectionFailed => -130,
            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme => -302,
            NetError::InvalidRedirect => -303,
            NetError::TooManyRedirects => -310,
            NetError::InvalidResponse => -320,
            NetError::MethodNotSupported => -322,
            NetError::EmptyResponse => -324,
            // Crate-specific codes
            NetError::InvalidHeader => -10000,
            NetError::HttpBodyError => -10001,
            NetError::InvalidUtf8 => -10002,
            NetError::JsonParseError => -10003,
        }
    }

    /// True for errors raised while building the request, before any
    /// connection is attempted.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            NetError::InvalidUrl
                | NetError::UnknownUrlScheme
                | NetError::MethodNotSupported
                | NetError::InvalidHeader
        )
    }

    /// True for DNS, connect, TLS, proxy handshake, timeout and protocol
    /// failures during execution.
    pub fn is_transport_error(&self) -> bool {
        !self.is_request_error()
            && !matches!(self, NetError::InvalidUtf8 | NetError::JsonParseError)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, NetError::TimedOut)
    }
}

impl From<std::io::Error> for NetError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
            ErrorKind::ConnectionReset => NetError::ConnectionReset,
            ErrorKind::ConnectionAborted | ErrorKind::UnexpectedEof => NetError::ConnectionClosed,
            ErrorKind::TimedOut => NetError::TimedOut,
            _ => NetError::ConnectionFailed,
        }
    }
}
