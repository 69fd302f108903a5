//! Rendering preview lines to HTML, plain text and ANSI terminal output

use super::{Line, LineKind, PreviewNode};

/// Options for HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlOptions {
    /// URL schemes allowed in `href`/`src`. Relative URLs are always allowed.
    pub allowed_schemes: Vec<String>,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self { allowed_schemes: vec!["http".into(), "https".into(), "mailto".into()] }
    }
}

/// Check whether a URL is relative or uses an allowed scheme.
///
/// # Examples
///
/// ```
/// use casalogy::preview::render::is_safe_url;
///
/// let allowed = vec!["https".to_string()];
/// assert!(is_safe_url("https://casalogy.com/scrubs", &allowed));
/// assert!(is_safe_url("/products/42", &allowed));
/// assert!(!is_safe_url("javascript:alert(1)", &allowed));
/// ```
pub fn is_safe_url(url: &str, allowed_schemes: &[String]) -> bool {
    let url = url.trim();
    if url.chars().any(|c| c.is_control()) {
        return false;
    }
    let scheme_end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(idx) if url[idx..].starts_with(':') => {
            let scheme = &url[..idx];
            allowed_schemes.iter().any(|s| s.eq_ignore_ascii_case(scheme))
        }
        _ => true,
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render lines as an HTML fragment.
///
/// Consecutive bullet lines form one `<ul>`; other non-empty lines become
/// `<p>` and empty lines `<br>`. Links and images with a disallowed URL
/// scheme degrade to their text.
///
/// # Examples
///
/// ```
/// use casalogy::preview::{parse, render_html, HtmlOptions};
///
/// let html = render_html(&parse("**Soft** <cotton>"), &HtmlOptions::default());
/// assert_eq!(html, "<p><strong>Soft</strong> &lt;cotton&gt;</p>");
/// ```
pub fn render_html(lines: &[Line], options: &HtmlOptions) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in lines {
        let mut content = String::new();
        html_nodes(&line.nodes, options, &mut content);

        if line.kind == LineKind::Bullet {
            items.push(format!("<li>{}</li>", content));
            continue;
        }

        if !items.is_empty() {
            blocks.push(format!("<ul>{}</ul>", items.concat()));
            items.clear();
        }
        if line.is_empty() {
            blocks.push("<br>".to_string());
        } else {
            blocks.push(format!("<p>{}</p>", content));
        }
    }

    if !items.is_empty() {
        blocks.push(format!("<ul>{}</ul>", items.concat()));
    }

    blocks.join("\n")
}

fn html_nodes(nodes: &[PreviewNode], options: &HtmlOptions, out: &mut String) {
    for node in nodes {
        match node {
            PreviewNode::Text(text) => out.push_str(&escape_html(text)),
            PreviewNode::Bold(children) => {
                out.push_str("<strong>");
                html_nodes(children, options, out);
                out.push_str("</strong>");
            }
            PreviewNode::Italic(children) => {
                out.push_str("<em>");
                html_nodes(children, options, out);
                out.push_str("</em>");
            }
            PreviewNode::Link { href, text } => {
                if is_safe_url(href, &options.allowed_schemes) {
                    out.push_str(&format!(
                        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                        escape_html(href.trim()),
                        escape_html(text)
                    ));
                } else {
                    tracing::warn!(href = %href, "dropping link with disallowed scheme");
                    out.push_str(&escape_html(text));
                }
            }
            PreviewNode::Image { src, alt } => {
                if is_safe_url(src, &options.allowed_schemes) {
                    out.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\">",
                        escape_html(src.trim()),
                        escape_html(alt)
                    ));
                } else {
                    tracing::warn!(src = %src, "dropping image with disallowed scheme");
                    out.push_str(&escape_html(alt));
                }
            }
        }
    }
}

/// Render lines as plain text: markup removed, links followed by their URL.
pub fn render_plain(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            let mut out = String::new();
            if line.kind == LineKind::Bullet {
                out.push_str("• ");
            }
            plain_nodes(&line.nodes, &mut out);
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn plain_nodes(nodes: &[PreviewNode], out: &mut String) {
    for node in nodes {
        match node {
            PreviewNode::Text(text) => out.push_str(text),
            PreviewNode::Bold(children) | PreviewNode::Italic(children) => {
                plain_nodes(children, out)
            }
            PreviewNode::Link { href, text } => out.push_str(&format!("{} ({})", text, href)),
            PreviewNode::Image { alt, .. } => out.push_str(&format!("[{}]", alt)),
        }
    }
}

// SGR on/off pairs, so nested styles don't reset each other
const BOLD: (&str, &str) = ("\x1b[1m", "\x1b[22m");
const ITALIC: (&str, &str) = ("\x1b[3m", "\x1b[23m");
const UNDERLINE: (&str, &str) = ("\x1b[4m", "\x1b[24m");
const DIM: (&str, &str) = ("\x1b[2m", "\x1b[22m");

/// Render lines for a terminal using SGR styling.
pub fn render_ansi(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            let mut out = String::new();
            if line.kind == LineKind::Bullet {
                out.push_str("  • ");
            }
            ansi_nodes(&line.nodes, &mut out);
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn ansi_nodes(nodes: &[PreviewNode], out: &mut String) {
    for node in nodes {
        match node {
            PreviewNode::Text(text) => out.push_str(text),
            PreviewNode::Bold(children) => {
                out.push_str(BOLD.0);
                ansi_nodes(children, out);
                out.push_str(BOLD.1);
            }
            PreviewNode::Italic(children) => {
                out.push_str(ITALIC.0);
                ansi_nodes(children, out);
                out.push_str(ITALIC.1);
            }
            PreviewNode::Link { href, text } => {
                out.push_str(&format!("{}{}{} <{}>", UNDERLINE.0, text, UNDERLINE.1, href))
            }
            PreviewNode::Image { src, alt } => {
                out.push_str(&format!("{}[image: {}] <{}>{}", DIM.0, alt, src, DIM.1))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::parse;

    fn html(input: &str) -> String {
        render_html(&parse(input), &HtmlOptions::default())
    }

    #[test]
    fn test_html_paragraphs_and_breaks() {
        assert_eq!(html("one\n\ntwo"), "<p>one</p>\n<br>\n<p>two</p>");
    }

    #[test]
    fn test_html_bullets_grouped() {
        assert_eq!(
            html("Features:\n- Soft\n- *Light*\nDone"),
            "<p>Features:</p>\n<ul><li>Soft</li><li><em>Light</em></li></ul>\n<p>Done</p>"
        );
    }

    #[test]
    fn test_html_trailing_bullets() {
        assert_eq!(html("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    }

    #[test]
    fn test_html_link_and_image() {
        assert_eq!(
            html("[Size guide](https://casalogy.com/size?a=1&b=2)"),
            "<p><a href=\"https://casalogy.com/size?a=1&amp;b=2\" target=\"_blank\" rel=\"noopener noreferrer\">Size guide</a></p>"
        );
        assert_eq!(html("![front](/img/front.png)"), "<p><img src=\"/img/front.png\" alt=\"front\"></p>");
    }

    #[test]
    fn test_html_escapes_raw_html() {
        assert_eq!(
            html("<script>alert('x')</script>"),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</p>"
        );
        assert_eq!(
            html("![\" onerror=\"x](/a.png)"),
            "<p><img src=\"/a.png\" alt=\"&quot; onerror=&quot;x\"></p>"
        );
    }

    #[test]
    fn test_html_disallowed_scheme_degrades() {
        assert_eq!(html("[click](javascript:alert(1))"), "<p>click)</p>");
        assert_eq!(html("![pic](data:image/png;base64,AAAA)"), "<p>pic</p>");
    }

    #[test]
    fn test_custom_schemes() {
        let options = HtmlOptions { allowed_schemes: vec!["tel".to_string()] };
        let rendered = render_html(&parse("[call](tel:555) [web](https://x)"), &options);
        assert_eq!(rendered, "<p><a href=\"tel:555\" target=\"_blank\" rel=\"noopener noreferrer\">call</a> web</p>");
    }

    #[test]
    fn test_is_safe_url() {
        let allowed = HtmlOptions::default().allowed_schemes;
        assert!(is_safe_url("HTTPS://example.com", &allowed));
        assert!(is_safe_url("mailto:care@casalogy.com", &allowed));
        assert!(is_safe_url("images/a.png", &allowed));
        assert!(is_safe_url("/a?x=http:y", &allowed));
        assert!(!is_safe_url(" javascript:void(0)", &allowed));
        assert!(!is_safe_url("java\nscript:x", &allowed));
    }

    #[test]
    fn test_plain() {
        assert_eq!(
            render_plain(&parse("- **Soft** [guide](/g)\n![a](b)")),
            "• Soft guide (/g)\n[a]"
        );
    }

    #[test]
    fn test_ansi() {
        assert_eq!(
            render_ansi(&parse("**b** *i*")),
            "\x1b[1mb\x1b[22m \x1b[3mi\x1b[23m"
        );
    }
}
