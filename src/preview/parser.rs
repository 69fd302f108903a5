//! Builds preview nodes from tokenized lines

use super::tokenizer::{split_images, tokenize, Segment, Token};
use super::{Line, LineKind, PreviewNode};

/// Line prefixes that turn a line into a bullet item.
const BULLET_MARKERS: &[&str] = &["- ", "• "];

/// Parse description markup into preview lines.
///
/// Empty input yields no lines; otherwise there is one line per
/// `\n`-separated segment, so a trailing newline yields a trailing empty line.
///
/// # Examples
///
/// ```
/// use casalogy::preview::{parse, PreviewNode};
///
/// let lines = parse("**Hello** world");
/// assert_eq!(lines[0].nodes, vec![
///     PreviewNode::Bold(vec![PreviewNode::text("Hello")]),
///     PreviewNode::text(" world"),
/// ]);
/// ```
pub fn parse(text: &str) -> Vec<Line> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(parse_line).collect()
}

/// Parse a single line (no `\n`).
pub fn parse_line(line: &str) -> Line {
    let (kind, body) = strip_bullet(line);
    let mut nodes = Vec::new();

    for segment in split_images(body) {
        match segment {
            Segment::Span(span) => build_span(tokenize(&span), &mut nodes),
            Segment::Image { alt, src } => nodes.push(PreviewNode::Image { src, alt }),
        }
    }

    Line { kind, nodes }
}

fn strip_bullet(line: &str) -> (LineKind, &str) {
    for marker in BULLET_MARKERS {
        if let Some(rest) = line.strip_prefix(marker) {
            return (LineKind::Bullet, rest);
        }
    }
    (LineKind::Paragraph, line)
}

/// Pair `**` delimiters left to right; a trailing unpaired one is literal.
/// Tokens outside bold regions go through emphasis pairing run by run, so
/// italic never spans a bold region.
fn build_span(tokens: Vec<Token>, out: &mut Vec<PreviewNode>) {
    let strong_total = tokens.iter().filter(|t| **t == Token::Strong).count();
    let strong_paired = strong_total - strong_total % 2;

    let mut strong_seen = 0;
    let mut run: Vec<Token> = Vec::new();
    let mut bold: Option<Vec<Token>> = None;

    for token in tokens {
        if token != Token::Strong {
            match bold.as_mut() {
                Some(children) => children.push(token),
                None => run.push(token),
            }
            continue;
        }

        strong_seen += 1;
        if strong_seen > strong_paired {
            run.push(Token::Text("**".to_string()));
            continue;
        }

        match bold.take() {
            None => {
                emit_run(std::mem::take(&mut run), out);
                bold = Some(Vec::new());
            }
            Some(children) => {
                let mut nodes = Vec::new();
                for child in children {
                    push_node(&mut nodes, leaf(child));
                }
                out.push(PreviewNode::Bold(nodes));
            }
        }
    }

    emit_run(run, out);
}

/// Pair lone `*` delimiters left to right within a run without bold.
fn emit_run(tokens: Vec<Token>, out: &mut Vec<PreviewNode>) {
    let emphasis_total = tokens.iter().filter(|t| **t == Token::Emphasis).count();
    let emphasis_paired = emphasis_total - emphasis_total % 2;

    let mut emphasis_seen = 0;
    let mut italic: Option<Vec<PreviewNode>> = None;

    for token in tokens {
        if token == Token::Emphasis {
            emphasis_seen += 1;
            if emphasis_seen <= emphasis_paired {
                match italic.take() {
                    None => italic = Some(Vec::new()),
                    Some(children) => out.push(PreviewNode::Italic(children)),
                }
                continue;
            }
        }

        match italic.as_mut() {
            Some(children) => push_node(children, leaf(token)),
            None => push_node(out, leaf(token)),
        }
    }
}

/// Node for a token that is not acting as a delimiter.
fn leaf(token: Token) -> PreviewNode {
    match token {
        Token::Text(text) => PreviewNode::Text(text),
        Token::Link { text, href } => PreviewNode::Link { href, text },
        Token::Strong => PreviewNode::text("**"),
        Token::Emphasis => PreviewNode::text("*"),
    }
}

/// Append a node, merging adjacent text.
fn push_node(nodes: &mut Vec<PreviewNode>, node: PreviewNode) {
    if let PreviewNode::Text(text) = &node {
        if text.is_empty() {
            return;
        }
        if let Some(PreviewNode::Text(last)) = nodes.last_mut() {
            last.push_str(text);
            return;
        }
    }
    nodes.push(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::plain_text;

    fn text(s: &str) -> PreviewNode {
        PreviewNode::text(s)
    }

    fn bold(children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Bold(children)
    }

    fn italic(children: Vec<PreviewNode>) -> PreviewNode {
        PreviewNode::Italic(children)
    }

    fn link(text: &str, href: &str) -> PreviewNode {
        PreviewNode::Link { href: href.to_string(), text: text.to_string() }
    }

    fn nodes(line: &str) -> Vec<PreviewNode> {
        parse_line(line).nodes
    }

    #[test]
    fn test_empty_input_has_no_lines() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_trailing_newline_adds_empty_line() {
        let lines = parse("one\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].nodes, vec![text("one")]);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_plain_line_is_single_text() {
        let line = "Soft-touch fabric, 4-way stretch (XS to 3XL).";
        assert_eq!(nodes(line), vec![text(line)]);
    }

    #[test]
    fn test_bold() {
        assert_eq!(nodes("**Hello** world"), vec![bold(vec![text("Hello")]), text(" world")]);
    }

    #[test]
    fn test_italic() {
        assert_eq!(nodes("an *easy* fit"), vec![text("an "), italic(vec![text("easy")]), text(" fit")]);
    }

    #[test]
    fn test_bold_and_italic_side_by_side() {
        assert_eq!(
            nodes("**New** and *improved*"),
            vec![bold(vec![text("New")]), text(" and "), italic(vec![text("improved")])]
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            nodes("before ![alt](http://x/y.png) after"),
            vec![
                text("before "),
                PreviewNode::Image { src: "http://x/y.png".to_string(), alt: "alt".to_string() },
                text(" after"),
            ]
        );
    }

    #[test]
    fn test_unterminated_bold_is_literal() {
        assert_eq!(nodes("**unterminated bold"), vec![text("**unterminated bold")]);
    }

    #[test]
    fn test_third_strong_is_literal() {
        assert_eq!(nodes("**a** b **c"), vec![bold(vec![text("a")]), text(" b **c")]);
    }

    #[test]
    fn test_unpaired_italic_is_literal() {
        assert_eq!(nodes("*a* b *c"), vec![italic(vec![text("a")]), text(" b *c")]);
        assert_eq!(nodes("5 * 3"), vec![text("5 * 3")]);
    }

    #[test]
    fn test_italic_does_not_span_bold() {
        assert_eq!(
            nodes("*a **b** c*"),
            vec![text("*a "), bold(vec![text("b")]), text(" c*")]
        );
    }

    #[test]
    fn test_star_inside_bold_is_literal() {
        assert_eq!(nodes("**a*b*c**"), vec![bold(vec![text("a*b*c")])]);
    }

    #[test]
    fn test_link_inside_bold() {
        assert_eq!(nodes("**[Shop](/shop)**"), vec![bold(vec![link("Shop", "/shop")])]);
    }

    #[test]
    fn test_link_inside_italic() {
        assert_eq!(nodes("*[Shop](/shop)*"), vec![italic(vec![link("Shop", "/shop")])]);
    }

    #[test]
    fn test_emphasis_does_not_cross_images() {
        assert_eq!(
            nodes("**a ![i](s) b**"),
            vec![
                text("**a "),
                PreviewNode::Image { src: "s".to_string(), alt: "i".to_string() },
                text(" b**"),
            ]
        );
    }

    #[test]
    fn test_empty_bold() {
        assert_eq!(nodes("****"), vec![bold(vec![])]);
    }

    #[test]
    fn test_triple_asterisks() {
        assert_eq!(nodes("***a***"), vec![bold(vec![text("*a")]), text("*")]);
    }

    #[test]
    fn test_bullets() {
        let lines = parse("- Breathable\n• Wrinkle-free\n-not a bullet");
        assert_eq!(lines[0].kind, LineKind::Bullet);
        assert_eq!(lines[0].nodes, vec![text("Breathable")]);
        assert_eq!(lines[1].kind, LineKind::Bullet);
        assert_eq!(lines[1].nodes, vec![text("Wrinkle-free")]);
        assert_eq!(lines[2].kind, LineKind::Paragraph);
        assert_eq!(lines[2].nodes, vec![text("-not a bullet")]);
    }

    #[test]
    fn test_bullet_with_markup() {
        let line = parse_line("- **Antimicrobial** finish");
        assert_eq!(line.kind, LineKind::Bullet);
        assert_eq!(line.nodes, vec![bold(vec![text("Antimicrobial")]), text(" finish")]);
    }

    #[test]
    fn test_lines_are_independent() {
        let lines = parse("**open\nclose**");
        assert_eq!(lines[0].nodes, vec![text("**open")]);
        assert_eq!(lines[1].nodes, vec![text("close**")]);
    }

    #[test]
    fn test_text_preserved_minus_markup() {
        let cases = [
            ("**Hello** world", "Hello world"),
            ("see [our guide](/size-guide) for *fit*", "see our guide for fit"),
            ("x ![pic](p.png) y", "x  y"),
            ("**never closed and *half", "**never closed and *half"),
            ("*a **b** c*", "*a b c*"),
        ];
        for (input, expected) in cases {
            assert_eq!(plain_text(&nodes(input)), expected, "{}", input);
        }
    }

    #[test]
    fn test_no_adjacent_text_nodes() {
        let result = nodes("a ** b * c [d");
        assert_eq!(result, vec![text("a ** b * c [d")]);
    }
}
