//! Token extraction from a single line of description markup

/// A piece of a line after image extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text that may still contain emphasis and links
    Span(String),
    /// `![alt](src)`
    Image { alt: String, src: String },
}

/// A token within a text span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal characters
    Text(String),
    /// `**`
    Strong,
    /// A lone `*` with no `*` on either side
    Emphasis,
    /// `[text](href)`, never formatted further
    Link { text: String, href: String },
}

/// Match `[label](target)` at the start of `s`.
///
/// Both parts are non-greedy: the label ends at the first `](` and the target
/// at the first `)` after it. Returns the label, the target and the number of
/// bytes consumed.
fn bracketed(s: &str) -> Option<(&str, &str, usize)> {
    let body = s.strip_prefix('[')?;
    let label_end = body.find("](")?;
    let target_start = label_end + 2;
    let target_len = body[target_start..].find(')')?;

    let label = &body[..label_end];
    let target = &body[target_start..target_start + target_len];
    Some((label, target, 1 + target_start + target_len + 1))
}

/// Split a line into text spans and images.
///
/// Images are matched leftmost-first; unmatched `![` stays in the text.
///
/// # Examples
///
/// ```
/// use casalogy::preview::tokenizer::{split_images, Segment};
///
/// let segments = split_images("a ![logo](/l.png) b");
/// assert_eq!(segments, vec![
///     Segment::Span("a ".to_string()),
///     Segment::Image { alt: "logo".to_string(), src: "/l.png".to_string() },
///     Segment::Span(" b".to_string()),
/// ]);
/// ```
pub fn split_images(line: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut cursor = 0;

    while let Some(offset) = line[cursor..].find("![") {
        let start = cursor + offset;
        match bracketed(&line[start + 1..]) {
            Some((alt, src, len)) => {
                if start > plain_start {
                    segments.push(Segment::Span(line[plain_start..start].to_string()));
                }
                segments.push(Segment::Image { alt: alt.to_string(), src: src.to_string() });
                cursor = start + 1 + len;
                plain_start = cursor;
            }
            None => cursor = start + 1,
        }
    }

    if plain_start < line.len() {
        segments.push(Segment::Span(line[plain_start..].to_string()));
    }

    segments
}

/// Tokenize a text span (no images) into text, emphasis delimiters and links.
///
/// A run of asterisks becomes one [`Token::Strong`] per pair; a leftover
/// asterisk touching the run is literal text. Only a lone `*` is an
/// emphasis delimiter.
///
/// # Examples
///
/// ```
/// use casalogy::preview::tokenizer::{tokenize, Token};
///
/// let tokens = tokenize("**hi** *there*");
/// assert_eq!(tokens, vec![
///     Token::Strong,
///     Token::Text("hi".to_string()),
///     Token::Strong,
///     Token::Text(" ".to_string()),
///     Token::Emphasis,
///     Token::Text("there".to_string()),
///     Token::Emphasis,
/// ]);
/// ```
pub fn tokenize(span: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < span.len() {
        let rest = &span[i..];

        if rest.starts_with('*') {
            let run = rest.bytes().take_while(|&b| b == b'*').count();
            if run == 1 {
                flush_text(&mut tokens, &mut text);
                tokens.push(Token::Emphasis);
            } else {
                for _ in 0..run / 2 {
                    flush_text(&mut tokens, &mut text);
                    tokens.push(Token::Strong);
                }
                if run % 2 == 1 {
                    text.push('*');
                }
            }
            i += run;
            continue;
        }

        if let Some((label, href, len)) = bracketed(rest) {
            flush_text(&mut tokens, &mut text);
            tokens.push(Token::Link { text: label.to_string(), href: href.to_string() });
            i += len;
            continue;
        }

        let Some(c) = rest.chars().next() else { break };
        text.push(c);
        i += c.len_utf8();
    }

    flush_text(&mut tokens, &mut text);
    tokens
}

fn flush_text(tokens: &mut Vec<Token>, text: &mut String) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}
