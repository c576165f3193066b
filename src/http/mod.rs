pub mod redirect;
pub mod request;
pub mod response;
pub mod streamfactory;

// Re-exports for convenience
pub use redirect::RedirectPolicy;
pub use request::HttpRequest;
pub use response::HttpResponse;
