//! # Style Catalog
//!
//! Fixed set of visual style presets. Each preset carries the prompt fragment
//! injected verbatim into every generation prompt for a request.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.0.0: Initial catalog with 5 presets

use serde::Serialize;

use crate::error::IconError;

/// Describes a style preset
#[derive(Debug, Clone, Serialize)]
pub struct StylePreset {
    /// Identifier clients send in the `style` field (case-sensitive)
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Short description shown next to the choice
    pub description: &'static str,
    /// Text used verbatim in generation prompts
    #[serde(skip)]
    pub prompt_fragment: &'static str,
}

/// All registered presets, in display order
pub const STYLE_PRESETS: &[StylePreset] = &[
    StylePreset {
        id: "Pastels",
        name: "Pastels",
        description: "Soft edges, pastel palette, gentle gradients",
        prompt_fragment: "soft edges, pastel color palette, gentle gradients, airy minimalism, light and dreamy aesthetic",
    },
    StylePreset {
        id: "Bubbles",
        name: "Bubbles",
        description: "Round bubbly shapes, glossy highlights",
        prompt_fragment: "round bubbly shapes, glossy highlights, playful curves, shiny bubble-like surfaces",
    },
    StylePreset {
        id: "Neon Soft",
        name: "Neon Soft",
        description: "Glowing edges, soft neon rim lights",
        prompt_fragment: "glowing edges, soft neon rim lights, dark-to-color contrast, luminous glow effect",
    },
    StylePreset {
        id: "Clay Cute",
        name: "Clay Cute",
        description: "Soft 3D clay-like rendering, matte texture",
        prompt_fragment: "soft 3D clay-like rendering, matte texture, rounded edges, tactile appearance",
    },
    StylePreset {
        id: "Flat Pro",
        name: "Flat Pro",
        description: "Professional flat vector style, bold shapes",
        prompt_fragment: "professional flat vector style, bold shapes, sharp edges, limited color palette, clean lines",
    },
];

/// Preset used when a client doesn't pick one
pub const DEFAULT_STYLE: &str = "Pastels";

/// Get all presets
pub fn get_styles() -> &'static [StylePreset] {
    STYLE_PRESETS
}

/// Get a preset by its exact identifier
pub fn lookup(id: &str) -> Option<&'static StylePreset> {
    STYLE_PRESETS.iter().find(|s| s.id == id)
}

/// Like [`lookup`], but an unknown identifier is a validation error
pub fn require(id: &str) -> Result<&'static StylePreset, IconError> {
    lookup(id).ok_or_else(|| IconError::Validation("Invalid style preset".to_string()))
}

/// Format presets as a display list
pub fn format_styles_list() -> String {
    let mut output = String::from("🎨 Style presets\n\n");
    for style in STYLE_PRESETS {
        output.push_str(&format!("{:<12} {}\n", style.id, style.description));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_presets() {
        assert_eq!(get_styles().len(), 5);
    }

    #[test]
    fn test_lookup_by_id() {
        let neon = lookup("Neon Soft");
        assert!(neon.is_some());
        assert!(neon.unwrap().prompt_fragment.contains("neon rim lights"));

        assert!(lookup("Unknown").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("pastels").is_none());
        assert!(lookup("PASTELS").is_none());
        assert!(lookup("Pastels").is_some());
    }

    #[test]
    fn test_require_unknown_is_validation_error() {
        let err = require("Watercolor").unwrap_err();
        assert!(matches!(err, IconError::Validation(_)));
        assert_eq!(err.to_string(), "Invalid style preset");
    }

    #[test]
    fn test_style_ids_unique() {
        let mut ids: Vec<_> = get_styles().iter().map(|s| s.id).collect();
        let original_len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), original_len, "Style IDs should be unique");
    }

    #[test]
    fn test_default_style_is_registered() {
        assert!(lookup(DEFAULT_STYLE).is_some());
    }

    #[test]
    fn test_serialized_preset_hides_prompt_fragment() {
        let value = serde_json::to_value(lookup("Flat Pro").unwrap()).unwrap();
        assert_eq!(value["id"], "Flat Pro");
        assert!(value.get("prompt_fragment").is_none());
    }
}
