//! Blocking HTTP plumbing shared by the service clients.

use std::time::Duration;

use reqwest::blocking::{Client, Response};

use crate::foundation::error::{ReelError, ReelResult};

const USER_AGENT: &str = concat!("reelcast/", env!("CARGO_PKG_VERSION"));

/// Build a blocking client whose every request is bounded by `timeout`.
pub fn blocking_client(timeout: Duration) -> ReelResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ReelError::service(format!("failed to build http client: {e}")))
}

/// Turn a non-2xx response into a service error carrying the body text.
pub(crate) fn ensure_success(res: Response, what: &str) -> ReelResult<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().unwrap_or_default();
    Err(ReelError::service(format!(
        "{what} failed: {status}: {}",
        body.trim()
    )))
}
