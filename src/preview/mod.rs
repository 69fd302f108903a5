//! Live preview for product description markup
//!
//! Product descriptions are stored as raw markup. The admin form shows a
//! best-effort preview built from a small markdown-like syntax:
//!
//! - `**bold**` and `*italic*`
//! - `[text](url)` links and `![alt](src)` images
//! - `- item` / `• item` bullet lines
//!
//! Parsing never fails. Markup that does not match is shown literally.

pub mod parser;
pub mod render;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

pub use parser::{parse, parse_line};
pub use render::{render_ansi, render_html, render_plain, HtmlOptions};

/// An inline element of a preview line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum PreviewNode {
    Text(String),
    Bold(Vec<PreviewNode>),
    Italic(Vec<PreviewNode>),
    Link { href: String, text: String },
    Image { src: String, alt: String },
}

impl PreviewNode {
    pub fn text(s: impl Into<String>) -> Self {
        PreviewNode::Text(s.into())
    }
}

/// Block-level role of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    #[default]
    Paragraph,
    Bullet,
}

/// One `\n`-delimited line of input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Line {
    pub kind: LineKind,
    pub nodes: Vec<PreviewNode>,
}

impl Line {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Visible text of a node sequence, ignoring images.
///
/// This is the input line minus the markup that was consumed.
pub fn plain_text(nodes: &[PreviewNode]) -> String {
    let mut out = String::new();
    collect_text(nodes, &mut out);
    out
}

fn collect_text(nodes: &[PreviewNode], out: &mut String) {
    for node in nodes {
        match node {
            PreviewNode::Text(text) | PreviewNode::Link { text, .. } => out.push_str(text),
            PreviewNode::Bold(children) | PreviewNode::Italic(children) => {
                collect_text(children, out)
            }
            PreviewNode::Image { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_ignores_images() {
        let nodes = vec![
            PreviewNode::text("a "),
            PreviewNode::Bold(vec![PreviewNode::text("b")]),
            PreviewNode::Image { src: "x.png".to_string(), alt: "pic".to_string() },
            PreviewNode::Link { href: "/c".to_string(), text: "c".to_string() },
        ];
        assert_eq!(plain_text(&nodes), "a bc");
    }

    #[test]
    fn test_node_json_shape() {
        let node = PreviewNode::Link { href: "/c".to_string(), text: "c".to_string() };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "link");
        assert_eq!(json["content"]["href"], "/c");

        let bold = serde_json::to_value(PreviewNode::Bold(vec![PreviewNode::text("x")])).unwrap();
        assert_eq!(bold["content"][0]["content"], "x");
    }
}
