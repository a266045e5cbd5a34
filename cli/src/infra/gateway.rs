//! Authenticated HTTP gateway to the Cloud Controller.
//!
//! Every remote failure is converted to an [`ApiError`] here, so nothing
//! above this layer sees a raw `reqwest` error.

use std::time::Duration;

use anyhow::{Context, Result};
use cf_common::ApiError;
use futures_util::TryStreamExt as _;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::LogStream;
use crate::domain::config::CfConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for one JSON request, body included. Log streams are exempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// HTTP client bound to one Cloud Controller target and access token.
#[derive(Clone)]
pub struct CloudControllerGateway {
    client: Client,
    target: String,
    access_token: String,
}

impl CloudControllerGateway {
    /// Build a gateway for the configured target.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &CfConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cf/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            client,
            target: config.target.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    /// Absolute URL for an API `path` such as `/v2/apps/guid`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.target)
    }

    /// `GET` a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.get(self.url(path)).timeout(REQUEST_TIMEOUT);
        let response = self.send(request).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::transport(format!("invalid response from {path}: {e}")))
    }

    /// `PUT` a JSON body and return the response headers.
    pub async fn put_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<HeaderMap, ApiError> {
        let request = self.client.put(self.url(path)).json(body).timeout(REQUEST_TIMEOUT);
        let response = self.send(request).await?;
        Ok(response.headers().clone())
    }

    /// `GET` an absolute URL and expose the body as a byte stream.
    pub async fn get_stream(&self, url: &str) -> Result<LogStream, ApiError> {
        let response = self.send(self.client.get(url)).await?;
        let stream = response
            .bytes_stream()
            .map_err(|e| ApiError::transport(e.to_string()));
        Ok(Box::pin(stream))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .header(AUTHORIZATION, authorization_value(&self.access_token))
            .build()
            .map_err(|e| ApiError::transport(e.to_string()))?;
        let (method, url) = (request.method().clone(), request.url().clone());
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| ApiError::transport(format!("error performing request: {e}")))?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "cloud controller request");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), &body))
    }
}

/// Tokens saved with their scheme (`"bearer abc"`) are sent as-is; bare
/// tokens get the `bearer` scheme.
fn authorization_value(token: &str) -> String {
    if token.contains(' ') {
        token.to_string()
    } else {
        format!("bearer {token}")
    }
}
