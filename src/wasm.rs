//! WASM API module for the admin dashboard
//!
//! Bindings for the color picker and the description editor's live preview.
//! Functions never throw: invalid input yields an empty value plus an error
//! message the form can show next to the field.

use wasm_bindgen::prelude::*;

use crate::color::{self, Color, Hsl};
use crate::output::{encode_png, render_swatches};
use crate::preview::{self, HtmlOptions};
use crate::variants::generate_variations;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    #[cfg(feature = "wasm")]
    console_error_panic_hook::set_once();
}

/// A color as shown in the picker: hex plus HSL components.
#[wasm_bindgen]
pub struct ColorResult {
    hex: String,
    hue: u16,
    saturation: u8,
    lightness: u8,
    error: Option<String>,
}

impl ColorResult {
    fn from_color(color: &Color) -> Self {
        Self {
            hex: color.hex().to_string(),
            hue: color.hue(),
            saturation: color.saturation(),
            lightness: color.lightness(),
            error: None,
        }
    }

    fn failed(error: color::ColorError) -> Self {
        Self { hex: String::new(), hue: 0, saturation: 0, lightness: 0, error: Some(error.to_string()) }
    }
}

#[wasm_bindgen]
impl ColorResult {
    /// Normalized `#rrggbb`, empty on error
    #[wasm_bindgen(getter)]
    pub fn hex(&self) -> String {
        self.hex.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn hue(&self) -> u16 {
        self.hue
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    #[wasm_bindgen(getter)]
    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    /// Whether the input was accepted
    #[wasm_bindgen(getter)]
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }

    /// Error message, if any
    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.error.clone()
    }
}

/// Convert a `#RRGGBB` hex color to HSL.
#[wasm_bindgen]
pub fn hex_to_hsl(hex: &str) -> ColorResult {
    match Color::from_hex(hex) {
        Ok(color) => ColorResult::from_color(&color),
        Err(e) => ColorResult::failed(e),
    }
}

/// Parse any CSS color (hex, name, `rgb()`, `hsl()`, ...).
#[wasm_bindgen]
pub fn parse_color(input: &str) -> ColorResult {
    match Color::parse(input) {
        Ok(color) => ColorResult::from_color(&color),
        Err(e) => ColorResult::failed(e),
    }
}

/// Convert HSL components to `#rrggbb`. Returns an empty string when out of range.
#[wasm_bindgen]
pub fn hsl_to_hex(h: i32, s: i32, l: i32) -> String {
    Hsl::new(h, s, l).map(color::hsl_to_hex).unwrap_or_default()
}

/// Builtin variants of a base color as a JSON array.
///
/// Returns `{"error": "..."}` for an invalid base color.
#[wasm_bindgen]
pub fn variations_json(base_hex: &str) -> String {
    let result = generate_variations(base_hex)
        .map_err(|e| e.to_string())
        .and_then(|variants| serde_json::to_string(&variants).map_err(|e| e.to_string()));

    match result {
        Ok(json) => json,
        Err(message) => serde_json::json!({ "error": message }).to_string(),
    }
}

/// PNG strip of the builtin variants, empty on invalid input.
#[wasm_bindgen]
pub fn variations_png(base_hex: &str, cell: u32) -> Vec<u8> {
    let Ok(variants) = generate_variations(base_hex) else {
        return Vec::new();
    };
    let colors: Vec<Color> = variants.iter().filter_map(|v| Color::from_hex(&v.hex).ok()).collect();

    render_swatches(&colors, cell)
        .and_then(|image| encode_png(&image))
        .unwrap_or_default()
}

/// Render description markup to an HTML fragment for the preview pane.
#[wasm_bindgen]
pub fn preview_html(text: &str) -> String {
    preview::render_html(&preview::parse(text), &HtmlOptions::default())
}

/// Parse description markup and return the line/node tree as JSON.
#[wasm_bindgen]
pub fn preview_json(text: &str) -> String {
    serde_json::to_string(&preview::parse(text)).unwrap_or_else(|_| "[]".to_string())
}
