//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome --features wasm

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use casalogy::wasm::{hex_to_hsl, hsl_to_hex, parse_color, preview_html, preview_json, variations_json, variations_png};

#[wasm_bindgen_test]
fn test_hex_to_hsl() {
    let result = hex_to_hsl("#4169E1");
    assert!(result.ok());
    assert_eq!(result.hue(), 225);
    assert_eq!(result.saturation(), 73);
    assert_eq!(result.lightness(), 57);
}

#[wasm_bindgen_test]
fn test_hex_to_hsl_reports_errors() {
    let result = hex_to_hsl("blue");
    assert!(!result.ok());
    assert!(result.error().is_some());
}

#[wasm_bindgen_test]
fn test_parse_color_css_function() {
    assert_eq!(parse_color("rgb(0, 128, 128)").hex(), "#008080");
}

#[wasm_bindgen_test]
fn test_hsl_to_hex() {
    assert_eq!(hsl_to_hex(0, 100, 50), "#ff0000");
    assert!(hsl_to_hex(0, 0, 101).is_empty());
}

#[wasm_bindgen_test]
fn test_variations_json_has_builtin_table() {
    let json = variations_json("#4169E1");
    assert!(json.starts_with('['));
    assert!(json.contains("\"Darker\""));
    assert!(json.contains("#193ca3"));
}

#[wasm_bindgen_test]
fn test_variations_png_magic_bytes() {
    let png = variations_png("#4169E1", 2);
    assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);
}

#[wasm_bindgen_test]
fn test_preview_html() {
    assert_eq!(
        preview_html("before ![alt](http://x/y.png) after"),
        "<p>before <img src=\"http://x/y.png\" alt=\"alt\"> after</p>"
    );
}

#[wasm_bindgen_test]
fn test_preview_json() {
    assert_eq!(
        preview_json("**unterminated bold"),
        r#"[{"kind":"paragraph","nodes":[{"type":"text","content":"**unterminated bold"}]}]"#
    );
}
