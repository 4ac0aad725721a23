//! Generic HTTP SMS gateway provider
//!
//! Posts one JSON document per send to a REST gateway, authenticated with
//! HTTP basic auth. The request timeout is enforced by the HTTP client;
//! timeouts are reported as [`SendError::Timeout`] so the rotation policies
//! upstream can count them, while every other transport or gateway failure
//! is a plain provider error.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

use vr_core::delivery::SmsSender;
use vr_core::errors::SendError;

use crate::InfraError;

/// HTTP gateway configuration
#[derive(Debug, Clone)]
pub struct HttpSmsConfig {
    /// Gateway endpoint receiving send requests
    pub endpoint: String,
    /// Basic auth username / API key
    pub api_key: String,
    /// Basic auth password / API secret
    pub api_secret: String,
    /// Timeout for one gateway request in milliseconds
    pub request_timeout_ms: u64,
}

impl HttpSmsConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        let endpoint = std::env::var("SMS_GATEWAY_ENDPOINT")
            .map_err(|_| InfraError::Config("SMS_GATEWAY_ENDPOINT not set".to_string()))?;
        let api_key = std::env::var("SMS_GATEWAY_API_KEY")
            .map_err(|_| InfraError::Config("SMS_GATEWAY_API_KEY not set".to_string()))?;
        let api_secret = std::env::var("SMS_GATEWAY_API_SECRET")
            .map_err(|_| InfraError::Config("SMS_GATEWAY_API_SECRET not set".to_string()))?;

        Ok(Self {
            endpoint,
            api_key,
            api_secret,
            request_timeout_ms: std::env::var("SMS_GATEWAY_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1_000),
        })
    }
}

#[derive(Serialize)]
struct GatewayRequest<'a> {
    template_id: &'a str,
    params: &'a [String],
    recipients: &'a [String],
}

/// SMS provider speaking to a REST gateway
pub struct HttpSmsSender {
    http: reqwest::Client,
    config: HttpSmsConfig,
    auth_header: String,
}

impl HttpSmsSender {
    pub fn new(config: HttpSmsConfig) -> Result<Self, InfraError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        let auth_header = format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", config.api_key, config.api_secret))
        );

        Ok(Self {
            http,
            config,
            auth_header,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfraError> {
        Self::new(HttpSmsConfig::from_env()?)
    }
}

#[async_trait]
impl SmsSender for HttpSmsSender {
    async fn send(
        &self,
        template_id: &str,
        args: &[String],
        recipients: &[String],
    ) -> Result<(), SendError> {
        let body = GatewayRequest {
            template_id,
            params: args,
            recipients,
        };

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, &self.auth_header)
            .json(&body)
            .send()
            .await;

        match response {
            Err(err) if err.is_timeout() => {
                error!(template_id = template_id, "SMS gateway request timed out");
                Err(SendError::Timeout)
            }
            Err(err) => Err(SendError::Provider {
                message: format!("gateway request failed: {err}"),
            }),
            Ok(response) if response.status().is_success() => {
                debug!(template_id = template_id, "SMS gateway accepted message");
                Ok(())
            }
            Ok(response) => Err(SendError::Provider {
                message: format!("gateway returned {}", response.status()),
            }),
        }
    }
}
