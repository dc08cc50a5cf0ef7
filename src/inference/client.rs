use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::error::EndpointError;
use super::types::{ErrorBody, GenerationParameters, GenerationRequest, normalize_output};
use crate::capability::TextGenerator;
use crate::config::TailorConfig;

/// One-shot client for the Hugging Face text-generation endpoint.
pub struct InferenceClient {
    api_token: String,
    client: Client,
    url: String,
    parameters: GenerationParameters,
}

impl InferenceClient {
    /// Create a client for `{base_url}/{model}`.
    pub fn with_base_url(
        api_token: String,
        base_url: &str,
        model: &str,
        parameters: GenerationParameters,
        timeout: Duration,
    ) -> Result<Self, EndpointError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            api_token,
            client,
            url: format!("{}/{}", base_url.trim_end_matches('/'), model),
            parameters,
        })
    }

    pub fn from_config(config: &TailorConfig) -> Result<Self, EndpointError> {
        Self::with_base_url(
            config.api_token.clone(),
            &config.endpoint_url,
            &config.model,
            config.generation_parameters(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Send a raw generation request and return the undecoded JSON body.
    pub async fn text_generation(&self, req: &GenerationRequest) -> Result<Value, EndpointError> {
        let mut request = self.client.post(&self.url).json(req);
        if !self.api_token.is_empty() {
            request = request.bearer_auth(&self.api_token);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or(body);
            return Err(EndpointError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| EndpointError::ParseError(e.to_string()))
    }
}

impl TextGenerator for InferenceClient {
    async fn generate(&self, prompt: &str) -> Result<String, EndpointError> {
        let req = GenerationRequest {
            inputs: prompt.to_string(),
            parameters: self.parameters,
        };
        debug!(url = %self.url, prompt_chars = prompt.chars().count(), "sending generation request");
        let raw = self.text_generation(&req).await?;
        let text = normalize_output(&raw);
        debug!(response_chars = text.chars().count(), "generation complete");
        Ok(text)
    }
}
