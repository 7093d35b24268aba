//! Onfido API client.
//!
//! Owns the HTTP connection pool, the base endpoint and the API token. The
//! resource operations live next to it (see `documents.rs`) and all funnel
//! through [`Client::execute`], which applies the non-2xx failure policy.

use client_core::observability::{TracedClientExt, TracedRequest};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Url;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::{Duration, Instant};

use super::metrics::{record_request, DECODE_ERROR};
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError};

/// Client for the Onfido API.
///
/// Cloning is cheap and clones share the underlying connection pool.
/// Dropping a returned future cancels the in-flight request.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    token: Secret<String>,
}

impl Client {
    /// Create a client for the default endpoint.
    pub fn new(token: impl Into<String>) -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::new(token))
    }

    /// Create a client from `ONFIDO_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_config(ClientConfig::load()?)
    }

    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        let token = match config.token {
            Some(token) if !token.expose_secret().is_empty() => token,
            _ => return Err(ClientError::MissingToken),
        };

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: normalize_endpoint(&config.endpoint),
            token,
        })
    }

    /// Point the client at a different base URL.
    pub fn with_endpoint(mut self, endpoint: impl AsRef<str>) -> Self {
        self.endpoint = normalize_endpoint(endpoint.as_ref());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Absolute URL for a resource below the endpoint, such as
    /// `["documents", id]`.
    ///
    /// Each segment is percent-encoded as a single path segment, so an ID can
    /// never add path components or a query string.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ClientError::InvalidUrl(format!(
                "{:?} is not a valid path segment",
                segment
            )));
        }

        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.endpoint, e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidUrl(format!("{} cannot be a base URL", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    pub(crate) fn get(&self, url: &Url) -> TracedRequest {
        self.authorize(self.http.traced_get(url.as_str()))
    }

    pub(crate) fn post(&self, url: &Url) -> TracedRequest {
        self.authorize(self.http.traced_post(url.as_str()))
    }

    fn authorize(&self, request: TracedRequest) -> TracedRequest {
        request.header(
            AUTHORIZATION.as_str(),
            &format!("Token token={}", self.token.expose_secret()),
        )
    }

    /// Send a request, fail on any non-2xx status and read the body with
    /// `read`.
    ///
    /// The error carries the response body. Every call is recorded once under
    /// `operation` in the request metrics, after the body has been read, so a
    /// 2xx response whose body cannot be decoded counts as `decode_error`.
    pub(crate) async fn execute<T, F, Fut>(
        &self,
        operation: &'static str,
        request: TracedRequest,
        read: F,
    ) -> Result<T, ClientError>
    where
        F: FnOnce(reqwest::Response) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        let start = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                record_request(operation, "error", start.elapsed());
                tracing::error!(operation, error = %e, "Onfido request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!(
                        operation,
                        status = %status,
                        error = %e,
                        "Failed to read Onfido error response body"
                    );
                    String::new()
                }
            };
            record_request(operation, status.as_str(), start.elapsed());

            let error = ApiError::new(status, body);
            tracing::error!(
                operation,
                status = %status,
                message = %error.message(),
                "Onfido API returned error status"
            );
            return Err(error.into());
        }

        match read(response).await {
            Ok(value) => {
                record_request(operation, status.as_str(), start.elapsed());
                Ok(value)
            }
            Err(e) => {
                record_request(operation, DECODE_ERROR, start.elapsed());
                tracing::error!(
                    operation,
                    status = %status,
                    error = %e,
                    "Failed to read Onfido response"
                );
                Err(e)
            }
        }
    }

    /// Send a request expecting a JSON body and decode it.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: TracedRequest,
    ) -> Result<T, ClientError> {
        self.execute(
            operation,
            request.header(ACCEPT.as_str(), "application/json"),
            |response| decode_json(operation, response),
        )
        .await
    }
}

pub(crate) async fn decode_json<T: DeserializeOwned>(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let body = response.text().await?;
    tracing::debug!(operation, body_len = body.len(), "Onfido response received");

    Ok(serde_json::from_str(&body)?)
}

fn normalize_endpoint(endpoint: &str) -> String {
    endpoint.trim_end_matches('/').to_string()
}
