//! Property-panel schemas: the ordered list of editable fields per block type

use crate::BlockType;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Input widget and its constraints
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum Widget {
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<&'static str>,
    },
    Textarea {
        rows: u32,
    },
    Number {
        min: f64,
        max: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        step: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<&'static str>,
    },
    Color,
    Select {
        options: Vec<SelectOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyField {
    /// Dotted configuration path
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub widget: Widget,
}

fn field(name: &'static str, label: &'static str, widget: Widget) -> PropertyField {
    PropertyField {
        name,
        label,
        widget,
    }
}

fn text(placeholder: &'static str) -> Widget {
    Widget::Text {
        placeholder: Some(placeholder),
    }
}

fn number(min: f64, max: f64, unit: Option<&'static str>) -> Widget {
    Widget::Number {
        min,
        max,
        step: None,
        unit,
    }
}

fn select(options: &[(&'static str, &'static str)]) -> Widget {
    Widget::Select {
        options: options
            .iter()
            .map(|&(value, label)| SelectOption { value, label })
            .collect(),
    }
}

const ALIGN: [(&str, &str); 3] = [("left", "Left"), ("center", "Center"), ("right", "Right")];

const BORDER_STYLE: [(&str, &str); 4] = [
    ("solid", "Solid"),
    ("dashed", "Dashed"),
    ("dotted", "Dotted"),
    ("none", "None"),
];

pub fn property_schema(kind: BlockType) -> Vec<PropertyField> {
    match kind {
        BlockType::Text => vec![
            field("text", "Text", Widget::Textarea { rows: 4 }),
            field("fontSize", "Font size", number(10.0, 48.0, Some("px"))),
            field(
                "fontWeight",
                "Font weight",
                select(&[("normal", "Normal"), ("bold", "Bold"), ("600", "Semi-bold")]),
            ),
            field("color", "Color", Widget::Color),
            field("align", "Alignment", select(&ALIGN)),
            field(
                "lineHeight",
                "Line height",
                Widget::Number {
                    min: 1.0,
                    max: 3.0,
                    step: Some(0.1),
                    unit: None,
                },
            ),
            field("padding", "Padding", text("16px")),
        ],
        BlockType::Button => vec![
            field("text", "Button text", text("Click here")),
            field("url", "URL", text("https://...")),
            field("bgColor", "Background color", Widget::Color),
            field("textColor", "Text color", Widget::Color),
            field("align", "Alignment", select(&ALIGN)),
            field("fontSize", "Font size", number(10.0, 24.0, Some("px"))),
            field("borderRadius", "Border radius", text("8px")),
            field("padding", "Padding", text("12px 24px")),
        ],
        BlockType::Image => vec![
            field("src", "Image URL", text("https://...")),
            field("alt", "Alt text", text("Image description")),
            field("width", "Width", text("100%")),
            field("link", "Link (optional)", text("https://...")),
            field("align", "Alignment", select(&ALIGN)),
            field("padding", "Padding", text("16px")),
        ],
        BlockType::Divider => vec![
            field("color", "Color", Widget::Color),
            field("height", "Thickness", number(1.0, 10.0, Some("px"))),
            field("width", "Width", text("100%")),
            field("style", "Style", select(&BORDER_STYLE[..3])),
            field("padding", "Padding", text("16px 0")),
        ],
        BlockType::Spacer => vec![field("height", "Height", number(8.0, 200.0, Some("px")))],
        BlockType::Html => vec![
            field("html", "HTML code", Widget::Textarea { rows: 10 }),
            field("padding", "Container padding", text("0px")),
            field("backgroundColor", "Background color", Widget::Color),
        ],
        BlockType::Columns | BlockType::Columns3 => vec![
            field("gap", "Gap between columns", text("16px")),
            field("padding", "Container padding", text("16px")),
            field("backgroundColor", "Container background", Widget::Color),
            field("borderWidth", "Border width", text("0px")),
            field("borderColor", "Border color", Widget::Color),
            field("borderStyle", "Border style", select(&BORDER_STYLE)),
            field("borderRadius", "Border radius", text("0px")),
        ],
        BlockType::Article => vec![
            field("image.src", "Image URL", text("https://...")),
            field("image.alt", "Alt text", text("Image description")),
            field("image.borderRadius", "Image border radius", text("8px")),
            field("title.text", "Title", text("Article title")),
            field("title.fontSize", "Title size", text("24px")),
            field("title.color", "Title color", Widget::Color),
            field("description.text", "Description", Widget::Textarea { rows: 3 }),
            field("description.fontSize", "Description size", text("16px")),
            field("description.color", "Description color", Widget::Color),
            field("link.url", "Article link", text("https://...")),
            field(
                "link.target",
                "Open in",
                select(&[("_blank", "New tab"), ("_self", "Same tab")]),
            ),
            field("padding", "Padding", text("16px")),
            field("backgroundColor", "Background color", Widget::Color),
            field("borderRadius", "Border radius", text("8px")),
        ],
    }
}

/// Fields of one column slot inside a container
pub fn column_property_schema() -> Vec<PropertyField> {
    vec![
        field(
            "verticalAlign",
            "Vertical alignment",
            select(&[("top", "Top"), ("middle", "Middle"), ("bottom", "Bottom")]),
        ),
        field("horizontalAlign", "Horizontal alignment", select(&ALIGN)),
        field("padding", "Padding", text("16px")),
        field("backgroundColor", "Background color", Widget::Color),
        field("borderWidth", "Border width", text("0px")),
        field("borderColor", "Border color", Widget::Color),
        field("borderStyle", "Border style", select(&BORDER_STYLE)),
        field("borderRadius", "Border radius", text("0px")),
    ]
}
