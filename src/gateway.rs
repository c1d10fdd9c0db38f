//! # Generation Gateway
//!
//! Transport-agnostic entry point for icon generation. Validates a request,
//! builds the four prompts and runs the four provider calls concurrently.
//! Results are all-or-nothing: one failed call fails the whole request.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use futures::future::{join_all, try_join_all};
use log::{error, info, warn};
use std::sync::Arc;

use crate::config::Config;
use crate::error::IconError;
use crate::image_gen::{ImageOptions, ImageProvider, ReplicateClient};
use crate::models::{GeneratedIcon, GenerationMetadata, GenerationRequest, GenerationResponse};
use crate::prompt::{build_prompts, IconPrompt};
use crate::styles;

/// How the four provider calls are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationPolicy {
    /// Drop the remaining calls at the first failure
    FailFast,
    /// Let every call settle, then report the first failure in index order
    WaitAll,
}

pub const AGGREGATION_POLICY: AggregationPolicy = AggregationPolicy::FailFast;

#[derive(Clone)]
pub struct IconGateway {
    provider: Option<Arc<dyn ImageProvider>>,
    options: ImageOptions,
    policy: AggregationPolicy,
}

impl IconGateway {
    /// `None` means no provider credential is configured
    pub fn new(provider: Option<Arc<dyn ImageProvider>>) -> Self {
        IconGateway {
            provider,
            options: ImageOptions::default(),
            policy: AGGREGATION_POLICY,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let provider = ReplicateClient::from_config(config)
            .map(|client| Arc::new(client) as Arc<dyn ImageProvider>);
        IconGateway::new(provider)
    }

    pub fn with_policy(mut self, policy: AggregationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> AggregationPolicy {
        self.policy
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse, IconError> {
        if request.theme.is_empty() || request.style.is_empty() {
            return Err(IconError::Validation(
                "Prompt and style are required".to_string(),
            ));
        }
        let style = styles::require(&request.style)?;

        let provider = self.provider.as_ref().ok_or_else(|| {
            error!("❌ REPLICATE_API_TOKEN not found");
            IconError::Configuration("REPLICATE_API_TOKEN is not configured".to_string())
        })?;

        let prompts = build_prompts(&request.theme, style, &request.colors);

        info!(
            "🎨 Starting generation of {} icons with {} | Theme: '{}' | Style: {}",
            prompts.len(),
            provider.name(),
            request.theme,
            style.id
        );

        let icons = match self.policy {
            AggregationPolicy::FailFast => {
                try_join_all(prompts.iter().map(|p| self.generate_one(provider.as_ref(), p))).await?
            }
            AggregationPolicy::WaitAll => {
                join_all(prompts.iter().map(|p| self.generate_one(provider.as_ref(), p)))
                    .await
                    .into_iter()
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        info!("✅ Generation complete!");

        Ok(GenerationResponse {
            success: true,
            icons,
            metadata: GenerationMetadata {
                theme: request.theme,
                style: style.id.to_string(),
                colors: request.colors,
            },
        })
    }

    async fn generate_one(
        &self,
        provider: &dyn ImageProvider,
        prompt: &IconPrompt,
    ) -> Result<GeneratedIcon, IconError> {
        let url = provider
            .generate_image(&prompt.text, &self.options)
            .await
            .map_err(|e| {
                warn!("Icon {} failed: {}", prompt.index, e);
                IconError::Generation(e.to_string())
            })?;

        Ok(GeneratedIcon {
            url,
            index: prompt.index,
            concept: prompt.concept.clone(),
        })
    }
}
