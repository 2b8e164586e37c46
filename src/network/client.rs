//! HTTP client for outbound provider requests

use crate::config::OutgoingSettings;
use anyhow::Result;
use reqwest::{Client, Response};
use serde::Serialize;
use std::time::Duration;

/// HTTP client wrapper with gateway-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .build()?;

        Ok(Self {
            client,
            user_agent: format!("placefinder-rs/{}", crate::VERSION),
        })
    }

    /// GET request with query parameters
    pub async fn get_with_params(&self, url: &str, params: &[(&str, &str)]) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// POST a JSON body with a bearer credential and an explicit timeout
    pub async fn post_json_bearer<T: Serialize + ?Sized>(
        &self,
        url: &str,
        token: &str,
        body: &T,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let response = self
            .client
            .post(url)
            .timeout(timeout)
            .bearer_auth(token)
            .header("User-Agent", &self.user_agent)
            .json(body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Parse response into HttpResponse
    async fn parse_response(response: Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(HttpResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

/// HTTP response captured as status plus body text
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl HttpResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
