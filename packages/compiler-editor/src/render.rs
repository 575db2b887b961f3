use crate::{ArticleNumbering, EditorContext, EditorRenderOptions};
use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use mailblocks_blocks::{
    css_value, email_warnings, sanitize_html, Align, ArticleConfig, Block, BlockConfig, BlockType,
    ButtonConfig, ColumnsConfig, DividerConfig, HtmlConfig, ImageConfig, Selection,
    SpacerConfig, TextConfig,
};

/// Full canvas: every top-level block in its selectable wrapper
pub fn render_canvas(
    blocks: &[Block],
    selection: &Selection,
    options: &EditorRenderOptions,
) -> String {
    if blocks.is_empty() {
        return format!(
            "<div class=\"canvas-empty\"><p>{}</p></div>",
            encode_text(&options.empty_canvas_text)
        );
    }

    let numbering = ArticleNumbering::compute(blocks);
    let ctx = EditorContext::new(selection, &numbering, options);

    let mut out = String::new();
    for block in blocks {
        let mut classes = vec!["block-wrapper"];
        match selection {
            Selection::MultiBlock { .. } if selection.is_in_multi(block.id()) => {
                classes.push("multi-selected")
            }
            _ if selection.is_block_selected(block.id()) => classes.push("selected"),
            _ => {}
        }

        out.push_str(&format!(
            "<div class=\"{}\" data-block-id=\"{}\" data-block-type=\"{}\" draggable=\"true\"><div class=\"block-content\">",
            classes.join(" "),
            attr(block.id()),
            block.kind().tag()
        ));
        out.push_str(&render_editor(block, &ctx));
        out.push_str("</div></div>");
    }
    out
}

/// Editor markup of one block; containers include their nested blocks
pub fn render_editor(block: &Block, ctx: &EditorContext) -> String {
    match block.config() {
        BlockConfig::Text(config) => render_text(config),
        BlockConfig::Button(config) => render_button(config),
        BlockConfig::Image(config) => render_image(config),
        BlockConfig::Divider(config) => render_divider(config),
        BlockConfig::Spacer(config) => render_spacer(config),
        BlockConfig::Html(config) => render_html(config),
        BlockConfig::Columns(config) => render_columns(block.id(), config, ctx),
        BlockConfig::Article(config) => render_article(config, ctx.numbering.index_of(block.id())),
    }
}

fn text_content(text: &str) -> String {
    encode_text(text).replace('\n', "<br>")
}

fn render_text(config: &TextConfig) -> String {
    let style = format!(
        "padding: {}; text-align: {}; font-size: {}px; color: {}; line-height: {}; font-weight: {};",
        css_value(&config.padding),
        config.align.as_str(),
        config.font_size,
        css_value(&config.color),
        config.line_height,
        css_value(&config.font_weight)
    );
    format!(
        "<div class=\"text-block\" style=\"{}\">{}</div>",
        attr(&style),
        text_content(&config.text)
    )
}

fn render_button(config: &ButtonConfig) -> String {
    let style = format!(
        "display: inline-block; background-color: {}; color: {}; padding: {}; border-radius: {}; text-decoration: none; font-size: {}px; font-weight: {}; font-family: Arial, sans-serif; width: {};",
        css_value(&config.bg_color),
        css_value(&config.text_color),
        css_value(&config.padding),
        css_value(&config.border_radius),
        config.font_size,
        css_value(&config.font_weight),
        css_value(&config.width)
    );
    format!(
        "<div style=\"text-align: {}; padding: 16px;\"><a href=\"{}\" style=\"{}\">{}</a></div>",
        config.align.as_str(),
        attr(&config.url),
        attr(&style),
        encode_text(&config.text)
    )
}

fn image_margin(align: Align) -> &'static str {
    match align {
        Align::Center => "0 auto",
        Align::Right => "0 0 0 auto",
        Align::Left => "0",
    }
}

fn render_image(config: &ImageConfig) -> String {
    let style = format!(
        "max-width: 100%; width: {}; height: auto; display: block; margin: {}; border-radius: {};",
        css_value(&config.width),
        image_margin(config.align),
        css_value(&config.border_radius)
    );
    let img = format!(
        "<img src=\"{}\" alt=\"{}\" style=\"{}\">",
        attr(&config.src),
        attr(&config.alt),
        attr(&style)
    );
    let content = if config.link.is_empty() {
        img
    } else {
        format!("<a href=\"{}\">{img}</a>", attr(&config.link))
    };
    format!(
        "<div style=\"padding: {};\">{content}</div>",
        attr(css_value(&config.padding))
    )
}

fn render_divider(config: &DividerConfig) -> String {
    let rule = format!(
        "border: none; border-top: {}px {} {}; width: {}; margin: 0;",
        config.height,
        config.style.as_str(),
        css_value(&config.color),
        css_value(&config.width)
    );
    format!(
        "<div style=\"padding: {};\"><hr style=\"{}\"></div>",
        attr(css_value(&config.padding)),
        attr(&rule)
    )
}

fn render_spacer(config: &SpacerConfig) -> String {
    format!(
        "<div class=\"spacer-block\" style=\"height: {h}px; position: relative;\"><span class=\"spacer-label\">{h}px</span></div>",
        h = config.height
    )
}

fn render_html(config: &HtmlConfig) -> String {
    let markup = sanitize_html(&config.html);
    let warnings = email_warnings(&markup);

    let style = format!(
        "padding: {}; background-color: {}; border: 1px dashed #e5e7eb; border-radius: 8px; position: relative;",
        css_value(&config.padding),
        css_value(&config.background_color)
    );
    let mut out = format!(
        "<div class=\"html-block\" style=\"{}\"><div class=\"block-badge\">HTML</div>",
        attr(&style)
    );

    if config.show_warning && !warnings.is_empty() {
        out.push_str("<div class=\"html-warnings\"><div class=\"html-warnings-title\">Warnings:</div>");
        for warning in warnings {
            out.push_str(&format!(
                "<div class=\"html-warning\">{}</div>",
                encode_text(warning.message())
            ));
        }
        out.push_str("</div>");
    }

    out.push_str(&format!("<div style=\"min-height: 40px;\">{markup}</div></div>"));
    out
}

/// Share of the container width each column gets, as a CSS percentage
fn column_percent(count: usize) -> String {
    let percent = 100.0 / count.max(1) as f64;
    format!("{}%", (percent * 1000.0).round() / 1000.0)
}

fn render_columns(container_id: &str, config: &ColumnsConfig, ctx: &EditorContext) -> String {
    let container_style = format!(
        "display: flex; gap: {}; padding: {}; background-color: {}; border: {} {} {}; border-radius: {};",
        css_value(&config.gap),
        css_value(&config.padding),
        css_value(&config.background_color),
        css_value(&config.border_width),
        config.border_style.as_str(),
        css_value(&config.border_color),
        css_value(&config.border_radius)
    );
    let id = attr(container_id);
    let width = column_percent(config.slot_count());

    let mut out = format!(
        "<div class=\"columns-container\" data-container-id=\"{id}\" data-slot-count=\"{}\" style=\"{}\">",
        config.slot_count(),
        attr(&container_style)
    );

    for (index, slot) in config.columns().iter().enumerate() {
        let selected = if ctx.selection.is_column_selected(container_id, index) {
            " selected"
        } else {
            ""
        };
        let style = format!(
            "flex: 1 1 0; width: {width}; min-height: 100px; padding: {}; background-color: {}; border: {} {} {}; border-radius: {}; text-align: {}; vertical-align: {};",
            css_value(&slot.padding),
            css_value(&slot.background_color),
            css_value(&slot.border_width),
            slot.border_style.as_str(),
            css_value(&slot.border_color),
            css_value(&slot.border_radius),
            slot.horizontal_align.as_str(),
            slot.vertical_align.as_str()
        );
        out.push_str(&format!(
            "<div class=\"column-drop-zone{selected}\" data-parent-block-id=\"{id}\" data-column-index=\"{index}\" style=\"{}\">",
            attr(&style)
        ));

        if slot.is_empty() {
            out.push_str(&format!(
                "<div class=\"column-empty\">{}</div>",
                encode_text(&ctx.options.empty_column_text)
            ));
        }
        for nested in slot.blocks() {
            out.push_str(&render_nested(container_id, index, nested, ctx));
        }

        out.push_str("</div>");
    }

    out.push_str("</div>");
    out
}

fn render_nested(container_id: &str, column_index: usize, block: &Block, ctx: &EditorContext) -> String {
    let mut classes = vec!["nested-block"];
    match ctx.selection {
        Selection::Nested(entry)
            if entry.block_id == block.id()
                && entry.container_id == container_id
                && entry.column_index == column_index =>
        {
            classes.push("selected")
        }
        Selection::MultiNested { .. } if ctx.selection.is_nested_selected(block.id()) => {
            classes.push("multi-selected")
        }
        _ => {}
    }

    let mut out = format!(
        "<div class=\"{}\" data-block-id=\"{}\" data-block-type=\"{}\" data-parent-block-id=\"{}\" data-column-index=\"{column_index}\" draggable=\"true\">",
        classes.join(" "),
        attr(block.id()),
        block.kind().tag(),
        attr(container_id)
    );

    if ctx.options.nested_toolbar {
        out.push_str("<div class=\"nested-block-toolbar\">");
        out.push_str("<button class=\"nested-block-action\" data-action=\"duplicate\" title=\"Duplicate\"></button>");
        if block.kind() == BlockType::Article {
            out.push_str("<button class=\"nested-block-action\" data-action=\"break-article\" title=\"Break article\"></button>");
        }
        out.push_str("<button class=\"nested-block-action text-danger\" data-action=\"delete\" title=\"Delete\"></button>");
        out.push_str("</div>");
    }

    out.push_str(&render_editor(block, ctx));
    out.push_str("</div>");
    out
}

fn render_article(config: &ArticleConfig, index: Option<usize>) -> String {
    let container_style = format!(
        "position: relative; padding: {}; background-color: {}; border: {} {} {}; border-radius: {};",
        css_value(&config.padding),
        css_value(&config.background_color),
        css_value(&config.border_width),
        config.border_style.as_str(),
        css_value(&config.border_color),
        css_value(&config.border_radius)
    );
    let badge = match index {
        Some(index) => format!("Article {index}"),
        None => "Article".to_string(),
    };
    let image_style = format!(
        "width: {}; border-radius: {}; display: block;",
        css_value(&config.image.width),
        css_value(&config.image.border_radius)
    );
    let title_style = format!(
        "font-size: {}; font-weight: {}; color: {}; margin: {} 0 {} 0; line-height: 1.3;",
        css_value(&config.title.font_size),
        css_value(&config.title.font_weight),
        css_value(&config.title.color),
        css_value(&config.title.margin_top),
        css_value(&config.title.margin_bottom)
    );
    let description_style = format!(
        "font-size: {}; font-weight: {}; color: {}; line-height: {}; margin: 0;",
        css_value(&config.description.font_size),
        css_value(&config.description.font_weight),
        css_value(&config.description.color),
        css_value(&config.description.line_height)
    );

    format!(
        concat!(
            "<div class=\"article-block\" style=\"{}\">",
            "<div class=\"block-badge article-badge\">{}</div>",
            "<div style=\"margin-bottom: 12px;\"><img src=\"{}\" alt=\"{}\" style=\"{}\"></div>",
            "<h3 style=\"{}\">{}</h3>",
            "<p style=\"{}\">{}</p>",
            "</div>"
        ),
        attr(&container_style),
        badge,
        attr(&config.image.src),
        attr(&config.image.alt),
        attr(&image_style),
        attr(&title_style),
        encode_text(&config.title.text),
        attr(&description_style),
        text_content(&config.description.text)
    )
}
