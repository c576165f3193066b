use crate::base::neterror::NetError;

#[test]
fn test_net_error_codes() {
    // Chromium numbering
    assert_eq!(NetError::TimedOut.as_i32(), -7);
    assert_eq!(NetError::ConnectionRefused.as_i32(), -102);
    assert_eq!(NetError::SocksConnectionFailed.as_i32(), -120);
    assert_eq!(NetError::ProxyAuthRequested.as_i32(), -127);
    assert_eq!(NetError::TooManyRedirects.as_i32(), -310);

    // Crate-specific range
    assert_eq!(NetError::InvalidHeader.as_i32(), -10000);
    assert_eq!(NetError::JsonParseError.as_i32(), -10003);
}

#[test]
fn test_error_classification() {
    assert!(NetError::InvalidUrl.is_request_error());
    assert!(NetError::MethodNotSupported.is_request_error());
    assert!(!NetError::InvalidUrl.is_transport_error());

    assert!(NetError::TimedOut.is_transport_error());
    assert!(NetError::SocksConnectionFailed.is_transport_error());
    assert!(NetError::TunnelConnectionFailed.is_transport_error());
    assert!(!NetError::JsonParseError.is_transport_error());
}

#[test]
fn test_io_error_mapping() {
    use std::io::{Error, ErrorKind};

    assert_eq!(
        NetError::from(Error::from(ErrorKind::ConnectionRefused)),
        NetError::ConnectionRefused
    );
    assert_eq!(NetError::from(Error::from(ErrorKind::TimedOut)), NetError::TimedOut);
    assert_eq!(
        NetError::from(Error::from(ErrorKind::PermissionDenied)),
        NetError::ConnectionFailed
    );
}
