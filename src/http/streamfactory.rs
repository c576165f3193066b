use crate::base::neterror::NetError;
use crate::http::request::HttpRequest;
use crate::socket::connectjob::ConnectJob;
use crate::socket::dialstrategy::DialStrategy;
use crate::socket::stream::BoxedSocket;
use crate::socket::tls::TlsConfig;
use bytes::Bytes;
use http::header::{HeaderValue, HOST, PROXY_AUTHORIZATION};
use http::{Request, Response, Version};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use tokio::spawn;

/// An HTTP/1.1 connection ready to carry one request.
/// Equivalent to net::HttpStream.
pub struct HttpStream {
    sender: http1::SendRequest<Full<Bytes>>,
}

impl HttpStream {
    /// Run the HTTP/1.1 handshake over an established socket and spawn the
    /// connection driver. The driver ends when the stream is dropped.
    pub async fn handshake(socket: BoxedSocket) -> Result<Self, NetError> {
        let kind = socket.kind();
        let io = TokioIo::new(socket);

        let (sender, conn) = http1::handshake(io).await.map_err(|e| {
            tracing::debug!(error = %e, "HTTP/1.1 handshake failed");
            NetError::ConnectionFailed
        })?;

        spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(transport = kind, error = %e, "connection driver ended with error");
            }
        });

        Ok(Self { sender })
    }

    pub async fn send_request(
        &mut self,
        req: Request<Full<Bytes>>,
    ) -> Result<Response<Incoming>, NetError> {
        self.sender.send_request(req).await.map_err(|e| {
            tracing::debug!(error = %e, "request failed");
            if e.is_parse() || e.is_parse_status() {
                NetError::InvalidResponse
            } else if e.is_incomplete_message() {
                NetError::EmptyResponse
            } else {
                NetError::ConnectionClosed
            }
        })
    }
}

/// Opens connections according to a dial strategy and TLS configuration.
#[derive(Debug, Clone)]
pub struct HttpStreamFactory {
    strategy: DialStrategy,
    tls: TlsConfig,
}

impl HttpStreamFactory {
    pub fn new(strategy: DialStrategy, tls: TlsConfig) -> Self {
        Self { strategy, tls }
    }

    pub fn strategy(&self) -> &DialStrategy {
        &self.strategy
    }

    pub fn tls(&self) -> &TlsConfig {
        &self.tls
    }

    /// Open a fresh connection for `request`'s target.
    pub async fn create_stream(&self, request: &HttpRequest) -> Result<HttpStream, NetError> {
        let socket = ConnectJob::connect(request.url(), &self.strategy, &self.tls).await?;
        HttpStream::handshake(socket).await
    }

    /// Convert `request` into its wire form for this strategy.
    ///
    /// A forward HTTP proxy receives the absolute-form target and the
    /// `Proxy-Authorization` header; everything else gets origin-form.
    pub fn wire_request(&self, request: &HttpRequest) -> Result<Request<Full<Bytes>>, NetError> {
        let forward = self.strategy.forward_proxy_for(request.url());
        let target = match forward {
            Some(_) => request.absolute_form(),
            None => request.origin_form(),
        };

        let mut req = Request::builder()
            .method(request.method().clone())
            .uri(target)
            .version(Version::HTTP_11)
            .body(Full::new(request.body().clone()))
            .map_err(|_| NetError::InvalidUrl)?;

        let headers = req.headers_mut();
        *headers = request.headers().clone();

        if !headers.contains_key(HOST) {
            let host = request.host_header().ok_or(NetError::InvalidUrl)?;
            let value = HeaderValue::from_str(&host).map_err(|_| NetError::InvalidUrl)?;
            headers.insert(HOST, value);
        }

        if let Some(auth) = forward.and_then(|p| p.auth_header()) {
            headers.insert(PROXY_AUTHORIZATION, auth.clone());
        }

        Ok(req)
    }
}
