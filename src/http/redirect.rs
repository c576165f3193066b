//! Redirect handling.
//!
//! By default redirects are never followed: the 3xx response is returned to
//! the caller as-is after the hop is logged. Callers that inspect `Location`
//! themselves rely on this. [`RedirectPolicy::Limited`] opts into following.

use crate::base::neterror::NetError;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use http::{Method, StatusCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectPolicy {
    /// Return every redirect response unchanged.
    #[default]
    None,
    /// Follow up to `n` redirects; one more fails with
    /// [`NetError::TooManyRedirects`].
    Limited(usize),
}

impl RedirectPolicy {
    /// Decide what to do with `response` to `request` after `hops` redirects
    /// have already been followed.
    ///
    /// Returns the next request to send, or `None` to hand `response` back.
    pub(crate) fn next_request(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        hops: usize,
    ) -> Result<Option<HttpRequest>, NetError> {
        let Some(location) = response.location() else {
            return Ok(None);
        };
        let target = request.url().join(location);

        let max = match self {
            RedirectPolicy::None => {
                match &target {
                    Ok(to) => tracing::info!(from = %request.url(), to = %to, "redirect not followed"),
                    Err(_) => tracing::info!(from = %request.url(), to = %location, "redirect not followed"),
                }
                return Ok(None);
            }
            RedirectPolicy::Limited(max) => *max,
        };

        let (method, keep_body) = match response.status() {
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND | StatusCode::SEE_OTHER => {
                if request.method() == Method::HEAD {
                    (Method::HEAD, false)
                } else {
                    (Method::GET, false)
                }
            }
            StatusCode::TEMPORARY_REDIRECT | StatusCode::PERMANENT_REDIRECT => {
                (request.method().clone(), true)
            }
            // 300, 304 and friends are not redirects to follow
            _ => return Ok(None),
        };

        if hops >= max {
            return Err(NetError::TooManyRedirects);
        }

        let to = target.map_err(|_| NetError::InvalidRedirect)?;
        if !matches!(to.scheme(), "http" | "https") {
            return Err(NetError::InvalidRedirect);
        }

        tracing::info!(from = %request.url(), to = %to, hop = hops + 1, "following redirect");
        Ok(Some(request.redirected(to, method, keep_body)))
    }
}
