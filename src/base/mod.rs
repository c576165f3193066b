//! Base types and error handling.
//!
//! - [`NetError`]: request and transport error codes, numbered after
//!   Chromium's `net_error_list.h`

pub mod neterror;

pub use neterror::NetError;

#[cfg(test)]
mod tests;
