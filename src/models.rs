//! Wire types shared by the server and the client.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
///
/// The theme travels as `prompt` on the wire. Missing or `null` fields
/// deserialize to empty values so the gateway can report them as validation
/// errors instead of the body failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[serde(rename = "prompt", default, deserialize_with = "null_as_default")]
    pub theme: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub style: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub colors: Vec<String>,
}

impl GenerationRequest {
    pub fn new(theme: impl Into<String>, style: impl Into<String>, colors: Vec<String>) -> Self {
        GenerationRequest {
            theme: theme.into(),
            style: style.into(),
            colors,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedIcon {
    pub url: String,
    /// 1-based position, matching the prompt it came from
    pub index: usize,
    pub concept: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub theme: String,
    pub style: String,
    pub colors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub icons: Vec<GeneratedIcon>,
    pub metadata: GenerationMetadata,
}

/// Error envelope returned with 4xx/5xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Entry of `GET /api/styles`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}
