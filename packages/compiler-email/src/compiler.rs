use crate::blocks::compile_block;
use crate::context::{CompileError, CompileOptions, Context};
use html_escape::{encode_double_quoted_attribute, encode_text};
use mailblocks_blocks::Block;

/// Email markup for a single block
pub fn render_email(block: &Block, options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    compile_block(block, &mut ctx)?;
    Ok(ctx.get_output())
}

/// Email markup for a block list, concatenated in order
pub fn render_blocks(blocks: &[Block], options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    for block in blocks {
        compile_block(block, &mut ctx)?;
    }
    Ok(ctx.get_output())
}

/// Compile a block list to a standalone email document
pub fn generate_document(blocks: &[Block], options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line(&format!(
        "<html lang=\"{}\">",
        encode_double_quoted_attribute(&options.lang)
    ));

    compile_head(&mut ctx);

    ctx.add_line("<body style=\"margin: 0; padding: 0; background-color: #f3f4f6;\">");
    ctx.indent();
    ctx.add_line("<table role=\"presentation\" width=\"100%\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: #f3f4f6;\">");
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line("<td align=\"center\" style=\"padding: 20px 0;\">");
    ctx.indent();
    ctx.add_line("<table role=\"presentation\" width=\"600\" cellpadding=\"0\" cellspacing=\"0\" border=\"0\" style=\"background-color: #ffffff; max-width: 600px;\">");
    ctx.indent();
    ctx.add_line("<tr>");
    ctx.indent();
    ctx.add_line("<td>");
    ctx.indent();

    for block in blocks {
        compile_block(block, &mut ctx)?;
    }

    for closing in ["</td>", "</tr>", "</table>", "</td>", "</tr>", "</table>"] {
        ctx.dedent();
        ctx.add_line(closing);
    }
    ctx.dedent();
    ctx.add_line("</body>");
    ctx.add_line("</html>");

    tracing::debug!(blocks = blocks.len(), "generated email document");
    Ok(ctx.get_output())
}

fn compile_head(ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=edge\">");
    let title = encode_text(&ctx.options.title).into_owned();
    ctx.add_line(&format!("<title>{title}</title>"));

    ctx.add_line("<!--[if mso]>");
    ctx.add_line("<noscript>");
    ctx.indent();
    ctx.add_line("<xml>");
    ctx.indent();
    ctx.add_line("<o:OfficeDocumentSettings>");
    ctx.indent();
    ctx.add_line("<o:PixelsPerInch>96</o:PixelsPerInch>");
    ctx.dedent();
    ctx.add_line("</o:OfficeDocumentSettings>");
    ctx.dedent();
    ctx.add_line("</xml>");
    ctx.dedent();
    ctx.add_line("</noscript>");
    ctx.add_line("<![endif]-->");

    ctx.add_line("<style>");
    ctx.indent();
    ctx.add_line("body { margin: 0; padding: 0; font-family: Arial, sans-serif; }");
    ctx.add_line("table { border-collapse: collapse; }");
    ctx.add_line("img { border: 0; display: block; }");
    ctx.dedent();
    ctx.add_line("</style>");

    ctx.dedent();
    ctx.add_line("</head>");
}
