//! # Raw HTML sanitizing
//!
//! Custom HTML blocks are sanitized before either renderer sees them. The sanitizer is a
//! denylist applied repeatedly until the markup stops changing, so fragments split around a
//! removed tag cannot reassemble into a live one.

use regex::{Captures, Regex};
use serde::Serialize;
use std::sync::OnceLock;

const DENIED_TAGS: [&str; 7] = ["script", "iframe", "object", "embed", "form", "input", "button"];

struct Patterns {
    /// One per denied tag: opening tag, content, closing tag
    paired: Vec<Regex>,
    /// Any remaining opening, closing, self-closing or unterminated denied tag
    stray: Regex,
    event_handler: Regex,
    javascript_url: Regex,
    /// Url-valued attribute with its value, which may hide a scheme behind character references
    url_attribute: Regex,
    numeric_reference: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let paired = DENIED_TAGS
            .iter()
            .map(|tag| {
                Regex::new(&format!(r"(?is)<\s*{tag}\b[^>]*>.*?<\s*/\s*{tag}\s*>"))
                    .unwrap_or_else(|e| panic!("invalid sanitizer pattern for {tag}: {e}"))
            })
            .collect();

        Patterns {
            paired,
            stray: Regex::new(&format!(
                r"(?i)<\s*/?\s*(?:{})\b[^>]*>?",
                DENIED_TAGS.join("|")
            ))
            .unwrap_or_else(|e| panic!("invalid sanitizer pattern: {e}")),
            event_handler: Regex::new(
                r#"(?i)([\s/"'])on[a-z]+\s*=\s*(?:"[^"]*"?|'[^']*'?|[^\s>]*)"#,
            )
            .unwrap_or_else(|e| panic!("invalid sanitizer pattern: {e}")),
            javascript_url: Regex::new(r"(?i)j\s*a\s*v\s*a\s*s\s*c\s*r\s*i\s*p\s*t\s*:")
                .unwrap_or_else(|e| panic!("invalid sanitizer pattern: {e}")),
            url_attribute: Regex::new(
                r#"(?i)([\s/"'])(?:href|src|action|formaction|xlink:href|background|poster)\s*=\s*("[^"]*"|'[^']*'|[^\s>]*)"#,
            )
            .unwrap_or_else(|e| panic!("invalid sanitizer pattern: {e}")),
            numeric_reference: Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9]+);?")
                .unwrap_or_else(|e| panic!("invalid sanitizer pattern: {e}")),
        }
    })
}

fn sanitize_pass(html: &str) -> String {
    let patterns = patterns();
    let mut out = html.to_string();

    for paired in &patterns.paired {
        out = paired.replace_all(&out, "").into_owned();
    }
    out = patterns.stray.replace_all(&out, "").into_owned();
    out = patterns.event_handler.replace_all(&out, "${1}").into_owned();
    out = patterns.javascript_url.replace_all(&out, "").into_owned();
    patterns
        .url_attribute
        .replace_all(&out, |caps: &Captures| {
            if is_script_url(&caps[2]) {
                caps[1].to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Whether an attribute value resolves to a script url once the browser has decoded it
fn is_script_url(raw: &str) -> bool {
    let value = raw.trim_matches(|c| c == '"' || c == '\'');
    // Browsers accept numeric references without the trailing `;`
    let value = patterns().numeric_reference.replace_all(value, "&#$1;");
    let decoded = html_escape::decode_html_entities(&value);
    let scheme: String = decoded
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take_while(|c| *c != ':')
        .collect::<String>()
        .to_ascii_lowercase();
    decoded.contains(':') && matches!(scheme.as_str(), "javascript" | "vbscript")
}

/// Strip denied tags, event-handler attributes and `javascript:` urls, including urls whose
/// scheme is spelled with character references
pub fn sanitize_html(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = sanitize_pass(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Markup that renders but is not supported by every email client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmailWarning {
    MediaTag,
    FlexGrid,
    StyleBlock,
    Positioning,
}

impl EmailWarning {
    pub fn message(&self) -> &'static str {
        match self {
            EmailWarning::MediaTag => {
                "<video>, <audio>, <canvas> and <svg> tags are not supported by all email clients"
            }
            EmailWarning::FlexGrid => {
                "Flexbox and Grid are not supported by all email clients, use tables instead"
            }
            EmailWarning::StyleBlock => "<style> blocks are often ignored, use inline CSS instead",
            EmailWarning::Positioning => {
                "absolute/fixed positioning is not supported by all email clients"
            }
        }
    }
}

struct WarningPatterns {
    media: Regex,
    flex_grid: Regex,
    style: Regex,
    positioning: Regex,
}

fn warning_patterns() -> &'static WarningPatterns {
    static PATTERNS: OnceLock<WarningPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |pattern: &str| {
            Regex::new(pattern).unwrap_or_else(|e| panic!("invalid warning pattern: {e}"))
        };
        WarningPatterns {
            media: compile(r"(?i)<\s*(?:video|audio|canvas|svg)\b"),
            flex_grid: compile(r"(?i)display\s*:\s*(?:inline-)?(?:flex|grid)\b"),
            style: compile(r"(?i)<\s*style\b"),
            positioning: compile(r"(?i)position\s*:\s*(?:absolute|fixed)\b"),
        }
    })
}

/// Email-compatibility advisories for already sanitized markup
pub fn email_warnings(html: &str) -> Vec<EmailWarning> {
    let patterns = warning_patterns();
    [
        (&patterns.media, EmailWarning::MediaTag),
        (&patterns.flex_grid, EmailWarning::FlexGrid),
        (&patterns.style, EmailWarning::StyleBlock),
        (&patterns.positioning, EmailWarning::Positioning),
    ]
    .into_iter()
    .filter(|(pattern, _)| pattern.is_match(html))
    .map(|(_, warning)| warning)
    .collect()
}

/// Replace flex and grid display values with `block` so email markup stays table-only
pub fn neutralize_email_layout(html: &str) -> String {
    warning_patterns()
        .flex_grid
        .replace_all(html, "display: block")
        .into_owned()
}
