//! Thin authenticated JSON client for the Satellite REST APIs.
//!
//! Two operations only, both blocking: an authenticated GET with query
//! parameters and an authenticated POST with a JSON body. There is no retry,
//! no backoff and no rate limiting; a transport or decode failure is fatal
//! for the run.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::Credentials;
use crate::error::{ApiError, Result};

/// Seam between the workflow and the network.
///
/// The production implementation is [`ApiClient`]; tests drive the workflow
/// with a scripted in-memory implementation instead.
pub trait Api {
    /// Issue an authenticated GET and parse the response body as JSON.
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value>;

    /// Issue an authenticated POST with a JSON body and parse the response
    /// body as JSON.
    fn post_json(&self, url: &str, body: &Value) -> Result<Value>;
}

/// Blocking HTTP client with Basic auth against a Satellite server.
pub struct ApiClient {
    client: Client,
    credentials: Credentials,
}

impl ApiClient {
    /// Creates a client. TLS verification is normally disabled since
    /// Satellite installs commonly use self-signed certificates.
    pub fn new(credentials: Credentials, ssl_verify: bool) -> Result<Self> {
        let user_agent = format!("errata2cv/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .user_agent(user_agent)
            .danger_accept_invalid_certs(!ssl_verify)
            // Server-side errata searches and task polls can be slow; the
            // poll loop supplies its own pacing, so no request deadline.
            .timeout(None::<Duration>)
            .build()?;

        Ok(Self {
            client,
            credentials,
        })
    }

    fn decode(method: &'static str, url: &str, response: reqwest::blocking::Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status,
            }
            .into());
        }

        let body: Value = response.json().map_err(|source| ApiError::Decode {
            method,
            url: url.to_string(),
            source,
        })?;
        debug!("Request result: {}", body);
        Ok(body)
    }
}

impl Api for ApiClient {
    fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        debug!("Request: GET {}", url);
        if !query.is_empty() {
            debug!("Request data: {:?}", query);
        }
        let response = self
            .client
            .get(url)
            .query(query)
            .basic_auth(
                &self.credentials.username,
                Some(&self.credentials.password),
            )
            .send()
            .map_err(|source| ApiError::Transport {
                method: "GET",
                url: url.to_string(),
                source,
            })?;
        Self::decode("GET", url, response)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        debug!("Request: POST {}", url);
        debug!("Request data: {}", body);
        let response = self
            .client
            .post(url)
            .json(body)
            .basic_auth(
                &self.credentials.username,
                Some(&self.credentials.password),
            )
            .send()
            .map_err(|source| ApiError::Transport {
                method: "POST",
                url: url.to_string(),
                source,
            })?;
        Self::decode("POST", url, response)
    }
}
