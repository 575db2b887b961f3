//! # Article blocks
//!
//! An article groups an image, a title and a description behind one link. Articles can be
//! assembled from existing text and button blocks and broken back apart into an image and
//! two text blocks.

use crate::config::{px_value, Align, BorderStyle, ImageConfig, TextConfig};
use crate::{Block, BlockConfig, BlockError, IdGenerator};
use serde::{Deserialize, Serialize};

const PLACEHOLDER_IMAGE: &str =
    "https://placehold.co/1200x600/dbeafe/1e40af.png?text=Article&font=roboto";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleImage {
    pub src: String,
    pub alt: String,
    pub width: String,
    pub border_radius: String,
}

impl Default for ArticleImage {
    fn default() -> Self {
        Self {
            src: PLACEHOLDER_IMAGE.to_string(),
            alt: "Article image".to_string(),
            width: "100%".to_string(),
            border_radius: "8px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleTitle {
    pub text: String,
    /// CSS length, `"24px"`
    pub font_size: String,
    pub font_weight: String,
    pub color: String,
    pub margin_top: String,
    pub margin_bottom: String,
}

impl Default for ArticleTitle {
    fn default() -> Self {
        Self {
            text: "Article title".to_string(),
            font_size: "24px".to_string(),
            font_weight: "bold".to_string(),
            color: "#0f172a".to_string(),
            margin_top: "16px".to_string(),
            margin_bottom: "8px".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleDescription {
    pub text: String,
    pub font_size: String,
    pub font_weight: String,
    pub color: String,
    pub line_height: String,
}

impl Default for ArticleDescription {
    fn default() -> Self {
        Self {
            text: "Article description. Click to edit this text and add your content."
                .to_string(),
            font_size: "16px".to_string(),
            font_weight: "normal".to_string(),
            color: "#64748b".to_string(),
            line_height: "1.6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleLink {
    pub url: String,
    pub target: String,
}

impl Default for ArticleLink {
    fn default() -> Self {
        Self {
            url: "#".to_string(),
            target: "_blank".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleConfig {
    pub image: ArticleImage,
    pub title: ArticleTitle,
    pub description: ArticleDescription,
    pub link: ArticleLink,
    pub padding: String,
    pub background_color: String,
    pub border_width: String,
    pub border_color: String,
    pub border_style: BorderStyle,
    pub border_radius: String,
    /// Feed item this article will be filled from (`item.0`), not interpreted yet
    pub rss_field: Option<String>,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            image: ArticleImage::default(),
            title: ArticleTitle::default(),
            description: ArticleDescription::default(),
            link: ArticleLink::default(),
            padding: "16px".to_string(),
            background_color: "transparent".to_string(),
            border_width: "0px".to_string(),
            border_color: "#e5e7eb".to_string(),
            border_style: BorderStyle::Solid,
            border_radius: "8px".to_string(),
            rss_field: None,
        }
    }
}

impl ArticleConfig {
    /// Assemble an article from a selection of blocks, in selection order.
    ///
    /// The first non-empty text becomes the title and every later text overwrites the
    /// description. Every button with a url overwrites the link. Images are ignored, the
    /// placeholder image is kept.
    pub fn from_blocks(sources: &[&Block]) -> Self {
        let mut config = ArticleConfig::default();
        config.title.text = "Title".to_string();
        config.description.text = "Description".to_string();
        let mut title_taken = false;

        for block in sources {
            match block.config() {
                BlockConfig::Text(text) => {
                    if !title_taken {
                        if !text.text.is_empty() {
                            config.title.text = text.text.clone();
                            title_taken = true;
                        }
                        config.title.font_size = format!("{}px", text.font_size);
                        config.title.color = text.color.clone();
                    } else {
                        if !text.text.is_empty() {
                            config.description.text = text.text.clone();
                        }
                        config.description.font_size = format!("{}px", text.font_size);
                        config.description.color = text.color.clone();
                    }
                }
                BlockConfig::Button(button) if !button.url.is_empty() => {
                    config.link.url = button.url.clone();
                }
                _ => {}
            }
        }

        config
    }
}

/// Split an article into `[image, title text, description text]`, each with a fresh id
pub fn break_article(block: &Block, ids: &mut IdGenerator) -> Result<[Block; 3], BlockError> {
    let article = block
        .article()
        .ok_or_else(|| BlockError::NotAnArticle(block.id().to_string()))?;
    let text_defaults = TextConfig::default();

    let image = ImageConfig {
        src: article.image.src.clone(),
        alt: article.image.alt.clone(),
        width: article.image.width.clone(),
        border_radius: article.image.border_radius.clone(),
        ..ImageConfig::default()
    };

    let title = TextConfig {
        text: article.title.text.clone(),
        font_size: px_value(&article.title.font_size).unwrap_or(24),
        font_weight: article.title.font_weight.clone(),
        color: article.title.color.clone(),
        align: Align::Left,
        ..text_defaults.clone()
    };

    let description = TextConfig {
        text: article.description.text.clone(),
        font_size: px_value(&article.description.font_size).unwrap_or(text_defaults.font_size),
        font_weight: article.description.font_weight.clone(),
        color: article.description.color.clone(),
        line_height: article
            .description
            .line_height
            .trim()
            .parse()
            .unwrap_or(text_defaults.line_height),
        align: Align::Left,
        ..text_defaults
    };

    Ok([
        Block::new(ids.new_id(), BlockConfig::Image(image)),
        Block::new(ids.new_id(), BlockConfig::Text(title)),
        Block::new(ids.new_id(), BlockConfig::Text(description)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BlockType, ButtonConfig};

    fn text(id: &str, content: &str) -> Block {
        Block::new(
            id,
            BlockConfig::Text(TextConfig {
                text: content.to_string(),
                ..TextConfig::default()
            }),
        )
    }

    #[test]
    fn test_from_blocks_takes_title_then_description() {
        let t1 = text("t1", "Hello");
        let t2 = text("t2", "World");
        let button = Block::new(
            "b",
            BlockConfig::Button(ButtonConfig {
                url: "https://news.example.com".to_string(),
                ..ButtonConfig::default()
            }),
        );

        let config = ArticleConfig::from_blocks(&[&t1, &t2, &button]);
        assert_eq!(config.title.text, "Hello");
        assert_eq!(config.title.font_size, "16px");
        assert_eq!(config.description.text, "World");
        assert_eq!(config.link.url, "https://news.example.com");
    }

    #[test]
    fn test_later_texts_overwrite_description() {
        let blocks = [text("a", "One"), text("b", "Two"), text("c", "Three")];
        let refs: Vec<&Block> = blocks.iter().collect();

        let config = ArticleConfig::from_blocks(&refs);
        assert_eq!(config.title.text, "One");
        assert_eq!(config.description.text, "Three");
    }

    #[test]
    fn test_images_are_ignored() {
        let image = Block::new("i", BlockType::Image.default_config());
        let config = ArticleConfig::from_blocks(&[&image]);
        assert_eq!(config.image.src, PLACEHOLDER_IMAGE);
        assert_eq!(config.title.text, "Title");
    }

    #[test]
    fn test_break_article_order() {
        let mut ids = IdGenerator::from_seed("a".to_string());
        let t1 = text("t1", "Hello");
        let t2 = text("t2", "World");
        let article = Block::new(
            "art",
            BlockConfig::Article(ArticleConfig::from_blocks(&[&t1, &t2])),
        );

        let [image, title, description] = break_article(&article, &mut ids).unwrap();
        assert_eq!(image.kind(), BlockType::Image);

        let BlockConfig::Text(title) = title.config() else {
            panic!("expected text");
        };
        assert_eq!(title.text, "Hello");
        assert_eq!(title.font_size, 16);
        assert_eq!(title.font_weight, "bold");

        let BlockConfig::Text(description) = description.config() else {
            panic!("expected text");
        };
        assert_eq!(description.text, "World");
        assert_eq!(description.line_height, 1.6);
    }

    #[test]
    fn test_break_non_article_fails() {
        let mut ids = IdGenerator::from_seed("a".to_string());
        let block = text("t1", "Hello");
        assert_eq!(
            break_article(&block, &mut ids).unwrap_err(),
            BlockError::NotAnArticle("t1".to_string())
        );
    }
}
