//! Request-level entry points and helpers.
//!
//! - [`request`]: one-shot `send_request`
//! - [`normalize`]: reduce a URL to `scheme://host[:port]`
//! - [`useragent`]: random User-Agent strings and tokens

pub mod normalize;
pub mod request;
pub mod useragent;

pub use normalize::normalize_url;
pub use request::send_request;
pub use useragent::{random_string, random_user_agent};
