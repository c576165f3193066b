//! Socket and connection management.
//!
//! - [`proxy`]: proxy descriptor parsing
//! - [`dialstrategy`]: direct, forward HTTP proxy, or SOCKS5 dialing
//! - [`connectjob`]: DNS → TCP → proxy handshake → TLS connection flow
//! - [`stream`]: type-erased socket handed to the HTTP layer
//! - [`tls`]: TLS configuration with BoringSSL

pub mod connectjob;
pub mod dialstrategy;
pub mod proxy;
pub mod stream;
pub mod tls;
