//! HTTP client for a remote plan generator service.

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use reqwest::Client;

use super::{
    stream::StreamAssembler,
    wire::{self, WireRequest},
    GenerateRequest, GenerateResponse, GeneratorFailure, PlanGenerator,
};
use crate::{
    config::GeneratorConfig,
    error::{ClutchError, Result},
};

/// Longest slice of an error body quoted in a failure reason.
const ERROR_BODY_LIMIT: usize = 200;

/// Plan generator reached over HTTP.
///
/// Each request is a single `POST` of a [`WireRequest`] to the configured
/// endpoint. With `streaming` enabled the body is read chunk by chunk through
/// a [`StreamAssembler`] instead of in one piece.
pub struct HttpPlanGenerator {
    endpoint: String,
    api_key: Option<String>,
    streaming: bool,
    http: Client,
}

impl HttpPlanGenerator {
    /// Create a client from configuration.
    ///
    /// Reads the bearer token from the environment variable named in the
    /// config, if any.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClutchError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        debug!(
            "generator endpoint {} (timeout {}s, streaming {})",
            config.endpoint, config.timeout_secs, config.streaming
        );
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            streaming: config.streaming,
            http,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the request and return the raw response body.
    async fn send(&self, request: &GenerateRequest) -> std::result::Result<String, GeneratorFailure> {
        let mut builder = self.http.post(&self.endpoint).json(&WireRequest::from(request));
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GeneratorFailure::new(format!("request to {} failed: {e}", self.endpoint)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let excerpt: String = body.chars().take(ERROR_BODY_LIMIT).collect();
            warn!("generator returned {status}: {excerpt}");
            return Err(GeneratorFailure::new(format!("generator returned {status}: {excerpt}")));
        }

        if !self.streaming {
            return response
                .text()
                .await
                .map_err(|e| GeneratorFailure::new(format!("failed to read response body: {e}")));
        }

        let mut assembler = StreamAssembler::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(|e| GeneratorFailure::new(format!("stream interrupted: {e}")))?;
            if assembler.push(&chunk) {
                break;
            }
        }
        assembler.finish()
    }
}

#[async_trait]
impl PlanGenerator for HttpPlanGenerator {
    async fn generate(
        &self,
        request: GenerateRequest,
    ) -> std::result::Result<GenerateResponse, GeneratorFailure> {
        let mode = request.mode();
        info!("requesting {} generation", mode.as_str());
        let body = self.send(&request).await?;
        debug!("received {} byte {} response", body.len(), mode.as_str());
        wire::parse_response(mode, &body)
    }
}
