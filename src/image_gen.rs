//! # Feature: Image Generation
//!
//! Client for the Replicate predictions API. Each call creates one prediction
//! for a single square PNG and waits for it to settle.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial release with flux-schnell via Replicate

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::config::Config;

/// Fixed output parameters sent with every generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageOptions {
    pub num_outputs: u32,
    pub aspect_ratio: &'static str,
    pub output_format: &'static str,
    pub output_quality: u32,
    pub disable_safety_checker: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        ImageOptions {
            num_outputs: 1,
            aspect_ratio: "1:1",
            output_format: "png",
            output_quality: 90,
            disable_safety_checker: false,
        }
    }
}

/// An external image generation service
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Generate one image and return its URL
    async fn generate_image(&self, prompt: &str, options: &ImageOptions) -> Result<String>;

    fn name(&self) -> &str;
}

#[derive(Serialize)]
struct PredictionRequest<'a> {
    input: PredictionInput<'a>,
}

#[derive(Serialize)]
struct PredictionInput<'a> {
    prompt: &'a str,
    #[serde(flatten)]
    options: &'a ImageOptions,
}

#[derive(Deserialize, Debug)]
struct Prediction {
    id: Option<String>,
    status: String,
    output: Option<Value>,
    error: Option<Value>,
    urls: Option<PredictionUrls>,
}

#[derive(Deserialize, Debug)]
struct PredictionUrls {
    get: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ReplicateError {
    detail: Option<String>,
    title: Option<String>,
}

#[derive(Clone)]
pub struct ReplicateClient {
    api_token: String,
    model: String,
    api_base: String,
    poll_interval: Duration,
    client: reqwest::Client,
}

impl ReplicateClient {
    pub fn new(api_token: String, model: String) -> Self {
        ReplicateClient {
            api_token,
            model,
            api_base: crate::config::DEFAULT_REPLICATE_API_BASE.to_string(),
            poll_interval: Duration::from_millis(500),
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from config, or `None` when no token is configured
    pub fn from_config(config: &Config) -> Option<Self> {
        let token = config.replicate_api_token.clone()?;
        Some(
            ReplicateClient::new(token, config.replicate_model.clone())
                .with_api_base(&config.replicate_api_base)
                .with_poll_interval(config.poll_interval()),
        )
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    fn predictions_url(&self) -> String {
        format!("{}/models/{}/predictions", self.api_base, self.model)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Prediction> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&response_text)
                .map_err(|e| anyhow!("Failed to parse Replicate response: {}", e))
        } else if let Ok(error_response) = serde_json::from_str::<ReplicateError>(&response_text) {
            let message = error_response
                .detail
                .or(error_response.title)
                .unwrap_or_else(|| format!("status {}", status));
            error!("Replicate API error: {} (status {})", message, status);
            Err(anyhow!("Replicate error: {}", message))
        } else {
            error!("Replicate API error (status {}): {}", status, response_text);
            Err(anyhow!("Replicate API error (status {})", status))
        }
    }

    /// Poll a prediction until it reaches a terminal status
    async fn wait_for(&self, mut prediction: Prediction) -> Result<Prediction> {
        while matches!(prediction.status.as_str(), "starting" | "processing") {
            let poll_url = prediction
                .urls
                .as_ref()
                .and_then(|u| u.get.clone())
                .ok_or_else(|| anyhow!("Replicate prediction has no poll URL"))?;

            debug!(
                "Prediction {} is {}, polling again in {:?}",
                prediction.id.as_deref().unwrap_or("<unknown>"),
                prediction.status,
                self.poll_interval
            );
            tokio::time::sleep(self.poll_interval).await;
            prediction = self.send(self.client.get(&poll_url)).await?;
        }
        Ok(prediction)
    }

    /// Download an image from URL to bytes
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>> {
        download_image(&self.client, url).await
    }
}

#[async_trait]
impl ImageProvider for ReplicateClient {
    async fn generate_image(&self, prompt: &str, options: &ImageOptions) -> Result<String> {
        info!(
            "Generating image with {} | Prompt: '{}'",
            self.model,
            prompt.chars().take(100).collect::<String>()
        );

        let request = PredictionRequest {
            input: PredictionInput { prompt, options },
        };

        debug!("Sending request to Replicate predictions API");
        let created = self
            .send(
                self.client
                    .post(self.predictions_url())
                    .header("Prefer", "wait")
                    .json(&request),
            )
            .await?;

        let prediction = self.wait_for(created).await?;

        match prediction.status.as_str() {
            "succeeded" => {
                let url = first_output_url(prediction.output.as_ref())
                    .ok_or_else(|| anyhow!("No image URL in Replicate output"))?;
                info!("Image generated successfully | URL length: {}", url.len());
                Ok(url)
            }
            status => {
                let message = match prediction.error {
                    Some(Value::String(message)) => message,
                    Some(other) if !other.is_null() => other.to_string(),
                    _ => format!("Prediction {}", status),
                };
                error!("Replicate prediction {}: {}", status, message);
                Err(anyhow!(message))
            }
        }
    }

    fn name(&self) -> &str {
        "replicate"
    }
}

fn first_output_url(output: Option<&Value>) -> Option<String> {
    match output? {
        Value::String(url) => Some(url.clone()),
        Value::Array(items) => items.first()?.as_str().map(str::to_string),
        _ => None,
    }
}

/// Fetch a generated image. An empty body counts as a failure.
pub async fn download_image(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await?
        .error_for_status()
        .map_err(|e| {
            error!("Image fetch rejected: {}", e);
            anyhow!("Failed to download image: {}", e.status().map_or_else(|| e.to_string(), |s| s.to_string()))
        })?;

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(anyhow!("Downloaded image from {} is empty", url));
    }
    debug!("Fetched image | {} bytes", bytes.len());
    Ok(bytes.to_vec())
}
