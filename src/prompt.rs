//! # Prompt Builder
//!
//! Turns a theme, a style preset and optional brand colors into the four
//! prompts sent to the image provider. Output is a pure function of the inputs.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::styles::StylePreset;

/// Number of icons generated per request
pub const ICON_COUNT: usize = 4;

const VARIATION_ROLES: [&str; ICON_COUNT] = ["primary", "secondary", "alternative", "complementary"];

/// A prompt paired with the variation concept it was built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconPrompt {
    /// 1-based position in the set
    pub index: usize,
    pub concept: String,
    pub text: String,
}

/// The four variation concepts for a theme, in fixed order
pub fn icon_variations(theme: &str) -> [String; ICON_COUNT] {
    VARIATION_ROLES.map(|role| format!("{} {} icon", role, theme))
}

fn color_guidance(colors: &[String]) -> String {
    if colors.is_empty() {
        String::new()
    } else {
        format!("Use this color palette: {}. ", colors.join(", "))
    }
}

/// Build the four prompts for a request
pub fn build_prompts(theme: &str, style: &StylePreset, colors: &[String]) -> Vec<IconPrompt> {
    let guidance = color_guidance(colors);

    icon_variations(theme)
        .into_iter()
        .enumerate()
        .map(|(i, concept)| {
            let index = i + 1;
            let text = format!(
                "A single clean icon of {concept} related to \"{theme}\". \n\
                 {guidance}Style: {fragment}. \n\
                 Requirements:\n\
                 - 512x512 resolution\n\
                 - Simple, recognizable silhouette\n\
                 - Consistent line weight and shading\n\
                 - NO text, letters, or watermarks\n\
                 - Uniform background\n\
                 - icon number {index} of {ICON_COUNT} (ensure distinct from others)\n\
                 - Center the icon in the frame\n\
                 - Professional icon design",
                fragment = style.prompt_fragment,
            );
            IconPrompt { index, concept, text }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::lookup;

    fn pastels() -> &'static StylePreset {
        lookup("Pastels").unwrap()
    }

    #[test]
    fn test_variations_in_fixed_order() {
        let variations = icon_variations("Space");
        assert_eq!(
            variations,
            [
                "primary Space icon".to_string(),
                "secondary Space icon".to_string(),
                "alternative Space icon".to_string(),
                "complementary Space icon".to_string(),
            ]
        );
    }

    #[test]
    fn test_builds_exactly_four_numbered_prompts() {
        let prompts = build_prompts("Toys", pastels(), &[]);
        assert_eq!(prompts.len(), ICON_COUNT);
        for (i, prompt) in prompts.iter().enumerate() {
            assert_eq!(prompt.index, i + 1);
            assert!(prompt.text.contains(&format!("icon number {} of 4", i + 1)));
        }
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let colors = vec!["#FF5733".to_string(), "teal".to_string()];
        let first = build_prompts("Nature", lookup("Clay Cute").unwrap(), &colors);
        let second = build_prompts("Nature", lookup("Clay Cute").unwrap(), &colors);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_color_clause_without_colors() {
        for prompt in build_prompts("Food", pastels(), &[]) {
            assert!(!prompt.text.contains("color palette:"));
        }
    }

    #[test]
    fn test_every_prompt_lists_all_colors() {
        let colors = vec!["#FF5733".to_string(), "#33FF57".to_string(), "navy".to_string()];
        for prompt in build_prompts("Food", pastels(), &colors) {
            assert!(prompt
                .text
                .contains("Use this color palette: #FF5733, #33FF57, navy. Style:"));
        }
    }

    #[test]
    fn test_prompt_embeds_concept_theme_and_style() {
        let style = lookup("Flat Pro").unwrap();
        let prompts = build_prompts("Space", style, &[]);
        let first = &prompts[0];
        assert_eq!(first.concept, "primary Space icon");
        assert!(first
            .text
            .starts_with("A single clean icon of primary Space icon related to \"Space\". \n"));
        assert!(first.text.contains(&format!("Style: {}. \n", style.prompt_fragment)));
        assert!(first.text.ends_with("- Professional icon design"));
    }

    #[test]
    fn test_exact_prompt_text() {
        let prompts = build_prompts("Cats", lookup("Bubbles").unwrap(), &["pink".to_string()]);
        let expected = "A single clean icon of complementary Cats icon related to \"Cats\". \n\
Use this color palette: pink. Style: round bubbly shapes, glossy highlights, playful curves, shiny bubble-like surfaces. \n\
Requirements:\n\
- 512x512 resolution\n\
- Simple, recognizable silhouette\n\
- Consistent line weight and shading\n\
- NO text, letters, or watermarks\n\
- Uniform background\n\
- icon number 4 of 4 (ensure distinct from others)\n\
- Center the icon in the frame\n\
- Professional icon design";
        assert_eq!(prompts[3].text, expected);
    }
}
