// src/core/net.rs
// Blocking HTTP GET with a bounded timeout.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::FetchError;

pub fn client(timeout: Duration) -> Result<Client, FetchError> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// GET `url` and return the body. Any non-2xx status is an error.
pub fn http_get(client: &Client, url: &str) -> Result<String, FetchError> {
    logd!("GET {url}");
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
    }
    let body = resp.text()?;
    logd!("GET {url}: {} bytes", body.len());
    Ok(body)
}
