//! Email markup for each block variant. Layout is tables only: no flex, no grid, no
//! positioning.

use crate::context::{CompileError, Context, EMAIL_WIDTH};
use html_escape::{encode_double_quoted_attribute as attr, encode_text};
use mailblocks_blocks::{
    css_value, neutralize_email_layout, px_value, sanitize_html, ArticleConfig, Block, BlockConfig,
    ButtonConfig, ColumnsConfig, DividerConfig, HtmlConfig, ImageConfig, SpacerConfig, TextConfig,
};

const TABLE: &str =
    "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\">";

pub(crate) fn compile_block(block: &Block, ctx: &mut Context) -> Result<(), CompileError> {
    if ctx.options.strict {
        let validation = block.validate();
        if !validation.valid {
            return Err(CompileError::InvalidBlock {
                id: block.id().to_string(),
                errors: validation.errors,
            });
        }
    }

    match block.config() {
        BlockConfig::Text(config) => compile_text(config, ctx),
        BlockConfig::Button(config) => compile_button(config, ctx),
        BlockConfig::Image(config) => compile_image(config, ctx),
        BlockConfig::Divider(config) => compile_divider(config, ctx),
        BlockConfig::Spacer(config) => compile_spacer(config, ctx),
        BlockConfig::Html(config) => compile_html(config, ctx),
        BlockConfig::Columns(config) => return compile_columns(config, ctx),
        BlockConfig::Article(config) => compile_article(config, ctx),
    }
    Ok(())
}

/// Open `<table><tr><td style=...>` and indent for the cell content
fn open_cell(ctx: &mut Context, style: &str) {
    ctx.add_line(TABLE);
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line(&format!("<td style=\"{}\">", attr(style)));
    ctx.indent();
}

fn close_cell(ctx: &mut Context) {
    ctx.dedent();
    ctx.add_line("</td>");
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
}

/// Escaped text with line breaks kept
fn text_content(text: &str) -> String {
    encode_text(text).replace('\n', "<br>")
}

/// Value for a `width` attribute: pixel lengths lose their unit, percentages are kept
fn width_attribute(width: &str) -> String {
    let width = width.trim();
    width.strip_suffix("px").unwrap_or(width).to_string()
}

fn compile_text(config: &TextConfig, ctx: &mut Context) {
    let style = format!(
        "padding: {}; text-align: {}; font-size: {}px; color: {}; line-height: {}; font-weight: {}; font-family: Arial, sans-serif;",
        css_value(&config.padding),
        config.align.as_str(),
        config.font_size,
        css_value(&config.color),
        config.line_height,
        css_value(&config.font_weight)
    );
    open_cell(ctx, &style);
    ctx.add_line(&text_content(&config.text));
    close_cell(ctx);
}

fn compile_button(config: &ButtonConfig, ctx: &mut Context) {
    let url = attr(&config.url);
    let fill = attr(css_value(&config.bg_color));

    open_cell(ctx, &format!("padding: 16px; text-align: {};", config.align.as_str()));

    ctx.add_line("<!--[if mso]>");
    ctx.add_line(&format!(
        "<v:roundrect xmlns:v=\"urn:schemas-microsoft-com:vml\" xmlns:w=\"urn:schemas-microsoft-com:office:word\" href=\"{url}\" style=\"height:auto;v-text-anchor:middle;width:auto;\" arcsize=\"10%\" stroke=\"f\" fillcolor=\"{fill}\">"
    ));
    ctx.indent();
    ctx.add_line("<w:anchorlock/>");
    ctx.add_line("<center>");
    ctx.dedent();
    ctx.add_line("<![endif]-->");

    let style = format!(
        "background-color: {}; border-radius: {}; color: {}; display: inline-block; font-family: Arial, sans-serif; font-size: {}px; font-weight: {}; line-height: 1.5; text-align: center; text-decoration: none; padding: {}; -webkit-text-size-adjust: none; mso-hide: all;",
        css_value(&config.bg_color),
        css_value(&config.border_radius),
        css_value(&config.text_color),
        config.font_size,
        css_value(&config.font_weight),
        css_value(&config.padding)
    );
    ctx.add_line(&format!(
        "<a href=\"{url}\" style=\"{}\">{}</a>",
        attr(&style),
        encode_text(&config.text)
    ));

    ctx.add_line("<!--[if mso]>");
    ctx.indent();
    ctx.add_line("</center>");
    ctx.dedent();
    ctx.add_line("</v:roundrect>");
    ctx.add_line("<![endif]-->");

    close_cell(ctx);
}

fn compile_image(config: &ImageConfig, ctx: &mut Context) {
    let style = format!(
        "padding: {}; text-align: {};",
        css_value(&config.padding),
        config.align.as_str()
    );
    open_cell(ctx, &style);

    let image_style = if px_value(&config.border_radius).unwrap_or(0) == 0 {
        "max-width: 100%; height: auto; display: block; border: 0;".to_string()
    } else {
        format!(
            "max-width: 100%; height: auto; display: block; border: 0; border-radius: {};",
            css_value(&config.border_radius)
        )
    };
    let img = format!(
        "<img src=\"{}\" alt=\"{}\" width=\"{}\" style=\"{}\" border=\"0\">",
        attr(&config.src),
        attr(&config.alt),
        attr(&width_attribute(&config.width)),
        attr(&image_style)
    );

    if config.link.is_empty() {
        ctx.add_line(&img);
    } else {
        ctx.add_line(&format!(
            "<a href=\"{}\" style=\"display: block;\">{img}</a>",
            attr(&config.link)
        ));
    }

    close_cell(ctx);
}

fn compile_divider(config: &DividerConfig, ctx: &mut Context) {
    open_cell(ctx, &format!("padding: {};", css_value(&config.padding)));

    ctx.add_line(&format!(
        "<table role=\"presentation\" align=\"center\" width=\"{}\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\">",
        attr(&width_attribute(&config.width))
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    let rule = format!(
        "border-top: {}px {} {}; line-height: 1px; font-size: 1px;",
        config.height,
        config.style.as_str(),
        css_value(&config.color)
    );
    ctx.add_line(&format!("<td style=\"{}\">&nbsp;</td>", attr(&rule)));
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");

    close_cell(ctx);
}

fn compile_spacer(config: &SpacerConfig, ctx: &mut Context) {
    ctx.add_line(TABLE);
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line(&format!(
        "<td style=\"height: {h}px; line-height: {h}px; font-size: 1px;\">&nbsp;</td>",
        h = config.height
    ));
    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
}

fn compile_html(config: &HtmlConfig, ctx: &mut Context) {
    let markup = neutralize_email_layout(&sanitize_html(&config.html));
    let style = format!(
        "padding: {}; background-color: {};",
        css_value(&config.padding),
        css_value(&config.background_color)
    );
    open_cell(ctx, &style);
    ctx.add_line(&markup);
    close_cell(ctx);
}

/// Pixel width of each email column
pub(crate) fn column_width(gap: u32, count: usize) -> u32 {
    let count = count.max(1) as u32;
    EMAIL_WIDTH.saturating_sub(gap.saturating_mul(count - 1)) / count
}

fn compile_columns(config: &ColumnsConfig, ctx: &mut Context) -> Result<(), CompileError> {
    let gap = px_value(&config.gap).unwrap_or(16);
    let count = config.slot_count();
    let width = column_width(gap, count);

    let container = format!(
        "padding: {}; background-color: {}; border: {} {} {}; border-radius: {};",
        css_value(&config.padding),
        css_value(&config.background_color),
        css_value(&config.border_width),
        config.border_style.as_str(),
        css_value(&config.border_color),
        css_value(&config.border_radius)
    );
    ctx.add_line(&format!(
        "<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"{}\">",
        attr(&container)
    ));
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();

    for (index, slot) in config.columns().iter().enumerate() {
        let padding_right = if index + 1 < count {
            format!("{gap}px")
        } else {
            css_value(&slot.padding).to_string()
        };
        let style = format!(
            "padding: {}; padding-right: {}; background-color: {}; border: {} {} {}; border-radius: {}; text-align: {};",
            css_value(&slot.padding),
            padding_right,
            css_value(&slot.background_color),
            css_value(&slot.border_width),
            slot.border_style.as_str(),
            css_value(&slot.border_color),
            css_value(&slot.border_radius),
            slot.horizontal_align.as_str()
        );
        ctx.add_line(&format!(
            "<td width=\"{width}\" valign=\"{}\" style=\"{}\">",
            slot.vertical_align.as_str(),
            attr(&style)
        ));
        ctx.indent();
        for nested in slot.blocks() {
            compile_block(nested, ctx)?;
        }
        ctx.dedent();
        ctx.add_line("</td>");
    }

    ctx.dedent();
    ctx.add_line("</tr>");
    ctx.dedent();
    ctx.add_line("</table>");
    Ok(())
}

fn compile_article(config: &ArticleConfig, ctx: &mut Context) {
    let container = format!(
        "padding: {}; background-color: {}; border: {} {} {}; border-radius: {};",
        css_value(&config.padding),
        css_value(&config.background_color),
        css_value(&config.border_width),
        config.border_style.as_str(),
        css_value(&config.border_color),
        css_value(&config.border_radius)
    );
    open_cell(ctx, &container);

    let linked = !config.link.url.is_empty();
    if linked {
        ctx.add_line(&format!(
            "<a href=\"{}\" target=\"{}\" style=\"text-decoration: none; color: inherit;\">",
            attr(&config.link.url),
            attr(&config.link.target)
        ));
    }

    open_cell(ctx, "padding-bottom: 12px;");
    let image_style = format!(
        "width: 100%; max-width: 100%; border-radius: {}; display: block;",
        css_value(&config.image.border_radius)
    );
    ctx.add_line(&format!(
        "<img src=\"{}\" alt=\"{}\" width=\"100%\" style=\"{}\">",
        attr(&config.image.src),
        attr(&config.image.alt),
        attr(&image_style)
    ));
    close_cell(ctx);

    let title_style = format!(
        "font-size: {}; font-weight: {}; color: {}; margin: {} 0 {} 0; line-height: 1.3;",
        css_value(&config.title.font_size),
        css_value(&config.title.font_weight),
        css_value(&config.title.color),
        css_value(&config.title.margin_top),
        css_value(&config.title.margin_bottom)
    );
    ctx.add_line(&format!(
        "<h3 style=\"{}\">{}</h3>",
        attr(&title_style),
        encode_text(&config.title.text)
    ));

    let description_style = format!(
        "font-size: {}; font-weight: {}; color: {}; line-height: {}; margin: 0;",
        css_value(&config.description.font_size),
        css_value(&config.description.font_weight),
        css_value(&config.description.color),
        css_value(&config.description.line_height)
    );
    ctx.add_line(&format!(
        "<p style=\"{}\">{}</p>",
        attr(&description_style),
        text_content(&config.description.text)
    ));

    if linked {
        ctx.add_line("</a>");
    }
    close_cell(ctx);
}
