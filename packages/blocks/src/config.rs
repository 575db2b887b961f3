//! Configuration records for the leaf block variants.
//!
//! Every record deserializes with `#[serde(default)]`, so a partial JSON config is merged
//! onto the variant's defaults.

use serde::{Deserialize, Serialize};

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    pub fn as_str(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
            Align::Right => "right",
        }
    }
}

/// Vertical alignment inside a column slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "top",
            VerticalAlign::Middle => "middle",
            VerticalAlign::Bottom => "bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    None,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::None => "none",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub text: String,
    /// Pixels
    pub font_size: u32,
    pub color: String,
    pub align: Align,
    pub line_height: f64,
    pub font_weight: String,
    pub padding: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            text: "Your text here...".to_string(),
            font_size: 16,
            color: "#000000".to_string(),
            align: Align::Left,
            line_height: 1.5,
            font_weight: "normal".to_string(),
            padding: "16px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ButtonConfig {
    pub text: String,
    pub url: String,
    pub bg_color: String,
    pub text_color: String,
    pub width: String,
    pub align: Align,
    pub border_radius: String,
    pub padding: String,
    pub font_size: u32,
    pub font_weight: String,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            text: "Click here".to_string(),
            url: "https://example.com".to_string(),
            bg_color: "#0f172a".to_string(),
            text_color: "#ffffff".to_string(),
            width: "auto".to_string(),
            align: Align::Center,
            border_radius: "8px".to_string(),
            padding: "12px 24px".to_string(),
            font_size: 16,
            font_weight: "bold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageConfig {
    pub src: String,
    pub alt: String,
    /// CSS width, `100%` or `600px`
    pub width: String,
    pub align: Align,
    pub padding: String,
    /// Optional link target; empty means the image is not wrapped in a link
    pub link: String,
    pub border_radius: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            src: "https://placehold.co/600x400/e5e7eb/6b7280?text=Image".to_string(),
            alt: "Image".to_string(),
            width: "100%".to_string(),
            align: Align::Center,
            padding: "16px".to_string(),
            link: String::new(),
            border_radius: "0px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividerConfig {
    pub color: String,
    /// Line thickness in pixels
    pub height: u32,
    pub width: String,
    pub style: BorderStyle,
    pub padding: String,
}

impl Default for DividerConfig {
    fn default() -> Self {
        Self {
            color: "#e5e7eb".to_string(),
            height: 1,
            width: "100%".to_string(),
            style: BorderStyle::Solid,
            padding: "16px 0".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpacerConfig {
    pub height: u32,
}

impl Default for SpacerConfig {
    fn default() -> Self {
        Self { height: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlConfig {
    /// Raw, unsanitized markup as typed by the user
    pub html: String,
    pub show_warning: bool,
    pub padding: String,
    pub background_color: String,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            html: "<p style=\"padding: 20px; text-align: center; color: #374151;\">Enter your HTML code here...</p>"
                .to_string(),
            show_warning: true,
            padding: "0px".to_string(),
            background_color: "transparent".to_string(),
        }
    }
}

/// Leading integer of a CSS length (`"24px"` → 24)
pub fn px_value(value: &str) -> Option<u32> {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// A free-form config string reduced to a single CSS value. Anything from the first `;`, `{`
/// or `}` on is dropped, so a field cannot add declarations to an inline style.
pub fn css_value(value: &str) -> &str {
    value
        .split(|c| matches!(c, ';' | '{' | '}'))
        .next()
        .unwrap_or_default()
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_config_merges_onto_defaults() {
        let config: TextConfig = serde_json::from_value(json!({ "text": "Hi" })).unwrap();
        assert_eq!(config.text, "Hi");
        assert_eq!(config.font_size, 16);
        assert_eq!(config.padding, "16px");
    }

    #[test]
    fn test_camel_case_fields() {
        let value = serde_json::to_value(ButtonConfig::default()).unwrap();
        assert_eq!(value["bgColor"], json!("#0f172a"));
        assert_eq!(value["borderRadius"], json!("8px"));
    }

    #[test]
    fn test_px_value() {
        assert_eq!(px_value("24px"), Some(24));
        assert_eq!(px_value(" 16 "), Some(16));
        assert_eq!(px_value("auto"), None);
    }

    #[test]
    fn test_css_value_keeps_one_declaration() {
        assert_eq!(css_value("#ff0000"), "#ff0000");
        assert_eq!(css_value(" 12px 24px "), "12px 24px");
        assert_eq!(css_value("red; display:flex"), "red");
        assert_eq!(css_value("red} .x{color:blue"), "red");
        assert_eq!(css_value(";"), "");
    }
}
