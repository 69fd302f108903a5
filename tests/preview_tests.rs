//! Description preview behavior through the public API

use casalogy::preview::{parse, plain_text, render_html, HtmlOptions, LineKind, PreviewNode};

fn text(s: &str) -> PreviewNode {
    PreviewNode::text(s)
}

fn single_line(input: &str) -> Vec<PreviewNode> {
    let lines = parse(input);
    assert_eq!(lines.len(), 1, "expected one line for {:?}", input);
    lines.into_iter().next().map(|l| l.nodes).unwrap_or_default()
}

#[test]
fn test_markup_free_line_is_single_text() {
    for line in ["Breathable cotton blend", "Sizes XS-3XL, 4-way stretch", "100% polyester; machine wash"] {
        assert_eq!(single_line(line), vec![text(line)]);
    }
}

#[test]
fn test_bold_example() {
    assert_eq!(
        single_line("**Hello** world"),
        vec![PreviewNode::Bold(vec![text("Hello")]), text(" world")]
    );
}

#[test]
fn test_image_example() {
    assert_eq!(
        single_line("before ![alt](http://x/y.png) after"),
        vec![
            text("before "),
            PreviewNode::Image { src: "http://x/y.png".to_string(), alt: "alt".to_string() },
            text(" after"),
        ]
    );
}

#[test]
fn test_unterminated_bold_is_literal() {
    assert_eq!(single_line("**unterminated bold"), vec![text("**unterminated bold")]);
}

#[test]
fn test_visible_text_drops_only_markup() {
    let cases = [
        ("**Soft** and *light*", "Soft and light"),
        ("See the [size guide](/size) first", "See the size guide first"),
        ("a ![x](/x.png) b", "a  b"),
        ("**open *half", "**open *half"),
        ("2 * 3 = 6", "2 * 3 = 6"),
    ];
    for (input, visible) in cases {
        assert_eq!(plain_text(&single_line(input)), visible, "input {:?}", input);
    }
}

#[test]
fn test_lines_are_independent() {
    let lines = parse("**bold starts\nand ends**");
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].nodes, vec![text("**bold starts")]);
    assert_eq!(lines[1].nodes, vec![text("and ends**")]);
}

#[test]
fn test_bullets_and_paragraphs() {
    let lines = parse("Features:\n- Pockets\n• Stretch\n-not a bullet");
    let kinds: Vec<LineKind> = lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![LineKind::Paragraph, LineKind::Bullet, LineKind::Bullet, LineKind::Paragraph]
    );
    assert_eq!(lines[1].nodes, vec![text("Pockets")]);
    assert_eq!(lines[3].nodes, vec![text("-not a bullet")]);
}

#[test]
fn test_raw_html_is_never_emitted() {
    let html = render_html(&parse("<img src=x onerror=alert(1)> **<b>**"), &HtmlOptions::default());
    assert_eq!(
        html,
        "<p>&lt;img src=x onerror=alert(1)&gt; <strong>&lt;b&gt;</strong></p>"
    );
}

#[test]
fn test_full_description_render() {
    let input = "**Everyday Scrub Top**\n- *Royal Blue*\n- [Care](https://casalogy.com/care)\n\n![Front](/front.jpg)";
    let html = render_html(&parse(input), &HtmlOptions::default());
    assert_eq!(
        html,
        "<p><strong>Everyday Scrub Top</strong></p>\n\
         <ul><li><em>Royal Blue</em></li>\
         <li><a href=\"https://casalogy.com/care\" target=\"_blank\" rel=\"noopener noreferrer\">Care</a></li></ul>\n\
         <br>\n\
         <p><img src=\"/front.jpg\" alt=\"Front\"></p>"
    );
}

#[test]
fn test_serialized_shape() {
    let value = serde_json::to_value(parse("[a](/b) ![c](/d)")).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "kind": "paragraph",
            "nodes": [
                {"type": "link", "content": {"href": "/b", "text": "a"}},
                {"type": "text", "content": " "},
                {"type": "image", "content": {"src": "/d", "alt": "c"}}
            ]
        }])
    );
}
