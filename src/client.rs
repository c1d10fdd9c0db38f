//! # Icon Client
//!
//! HTTP client for the generation API plus the form handling, grid rendering
//! and download helpers used by the `iconmaker` command.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use log::{debug, error, info, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use crate::image_gen::download_image;
use crate::models::{ErrorBody, GeneratedIcon, GenerationRequest, GenerationResponse, StyleSummary};
use crate::styles;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";

/// Brand colors accepted by the form
pub const MAX_BRAND_COLORS: usize = 3;

/// Pause between sequential downloads
pub const DOWNLOAD_DELAY: Duration = Duration::from_millis(500);

/// User input before it becomes a request
#[derive(Debug, Clone, Default)]
pub struct IconForm {
    pub theme: String,
    pub style: String,
    pub colors: Vec<String>,
}

impl IconForm {
    pub fn new(theme: impl Into<String>, style: impl Into<String>, colors: Vec<String>) -> Self {
        IconForm {
            theme: theme.into(),
            style: style.into(),
            colors,
        }
    }

    /// Trim the theme, drop blank colors, and check what the server would reject anyway
    pub fn into_request(self) -> Result<GenerationRequest> {
        let theme = self.theme.trim().to_string();
        if theme.is_empty() {
            return Err(anyhow!("Icon set theme is required"));
        }
        if styles::lookup(&self.style).is_none() {
            return Err(anyhow!("Unknown style preset '{}'", self.style));
        }

        let colors: Vec<String> = self
            .colors
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        if colors.len() > MAX_BRAND_COLORS {
            return Err(anyhow!("At most {} brand colors are allowed", MAX_BRAND_COLORS));
        }

        Ok(GenerationRequest::new(theme, self.style, colors))
    }
}

#[derive(Clone)]
pub struct IconClient {
    api_url: String,
    client: reqwest::Client,
}

impl IconClient {
    pub fn new(api_url: &str) -> Self {
        IconClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn generate_icons(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        info!("Requesting icon set | Theme: '{}' | Style: {}", request.theme, request.style);

        let response = self
            .client
            .post(format!("{}/generate", self.api_url))
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&response_text)
                .map_err(|e| anyhow!("Failed to parse generation response: {}", e))
        } else {
            let body: ErrorBody = serde_json::from_str(&response_text).unwrap_or_default();
            error!("Generation failed (status {}): {}", status, response_text);
            Err(anyhow!(body
                .details
                .or(body.error)
                .unwrap_or_else(|| "Failed to generate icons".to_string())))
        }
    }

    pub async fn list_styles(&self) -> Result<Vec<StyleSummary>> {
        let response = self
            .client
            .get(format!("{}/styles", self.api_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    /// Download one icon into `dir`, returning the written path
    pub async fn download_icon(&self, icon: &GeneratedIcon, theme: &str, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(icon_filename(theme, icon.index));
        debug!("Downloading icon {} to {}", icon.index, path.display());

        let bytes = download_image(&self.client, &icon.url).await?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        Ok(path)
    }

    /// Download every icon one after another, pausing between each.
    /// A failed icon doesn't stop the rest.
    pub async fn download_all(&self, response: &GenerationResponse, dir: &Path) -> DownloadSummary {
        let mut summary = DownloadSummary::default();
        for (i, icon) in response.icons.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(DOWNLOAD_DELAY).await;
            }
            match self.download_icon(icon, &response.metadata.theme, dir).await {
                Ok(path) => summary.saved.push(path),
                Err(e) => {
                    warn!("Icon {} download failed: {}", icon.index, e);
                    summary.failed.push((icon.index, e));
                }
            }
        }
        summary
    }
}

/// The icon with the given 1-based number
pub fn find_icon(response: &GenerationResponse, index: usize) -> Result<&GeneratedIcon> {
    response.icons.iter().find(|i| i.index == index).ok_or_else(|| {
        warn!("Response has no icon number {}", index);
        anyhow!("No icon number {} in the generated set", index)
    })
}

/// Outcome of a bulk download
#[derive(Debug, Default)]
pub struct DownloadSummary {
    pub saved: Vec<PathBuf>,
    /// Icon index and the reason it wasn't saved
    pub failed: Vec<(usize, anyhow::Error)>,
}

impl DownloadSummary {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

fn unsafe_filename_chars() -> &'static Regex {
    static UNSAFE: OnceLock<Regex> = OnceLock::new();
    UNSAFE.get_or_init(|| Regex::new(r#"(?:[\s/\\<>:"|?*\x00-\x1f]|\.\.)+"#).unwrap())
}

/// `<theme, lowercased, whitespace, separators and ".." runs as "-">-<index>.png`
pub fn icon_filename(theme: &str, index: usize) -> String {
    format!(
        "{}-{}.png",
        unsafe_filename_chars().replace_all(&theme.to_lowercase(), "-"),
        index
    )
}

/// Text rendering of a generated set
pub fn render_grid(response: &GenerationResponse) -> String {
    let mut output = String::from("🖼️  Generated Icon Set\n");
    output.push_str(&format!(
        "[Theme: {}]  [Style: {}]\n",
        response.metadata.theme, response.metadata.style
    ));
    if !response.metadata.colors.is_empty() {
        output.push_str(&format!("[Colors: {}]\n", response.metadata.colors.join(", ")));
    }
    output.push_str("─────────────────────────────────────────────────────\n");

    for icon in &response.icons {
        output.push_str(&format!("Icon {}  {:<32} {}\n", icon.index, icon.concept, icon.url));
    }
    output
}

/// Text rendering of a failed request
pub fn render_error(message: &str) -> String {
    format!("❌ Generation failed\n   {}\n", message)
}
