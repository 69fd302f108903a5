//! Color parsing and hex/HSL conversion
//!
//! The storefront stores colors as `#RRGGBB`. The admin color picker works in
//! integer HSL (degrees and percents), so both directions round to the
//! nearest integer at the boundary:
//!
//! - [`hex_to_hsl`] - `#RRGGBB` to `hsl(h, s%, l%)`
//! - [`hsl_to_hex`] - back to lowercase `#rrggbb`
//! - [`Color::parse`] - any CSS color (`#RGB`, `rgb()`, `hsl()`, named) normalized to hex

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical storefront color: `#` followed by exactly six hex digits.
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Not in the `#RRGGBB` form required by the conversion functions
    #[error("invalid color format '{0}', expected #RRGGBB")]
    InvalidColorFormat(String),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
    /// HSL component outside its range
    #[error("{component} {value} is out of range 0-{max}")]
    OutOfRange {
        component: &'static str,
        value: i32,
        max: i32,
    },
}

impl<T: std::fmt::Display> From<lightningcss::error::Error<T>> for ColorError {
    fn from(e: lightningcss::error::Error<T>) -> Self {
        ColorError::CssParse(e.to_string())
    }
}

/// Integer HSL triple: hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Create an HSL value, rejecting components outside their ranges.
    pub fn new(h: i32, s: i32, l: i32) -> Result<Self, ColorError> {
        check_range("hue", h, 359)?;
        check_range("saturation", s, 100)?;
        check_range("lightness", l, 100)?;
        Ok(Self { h: h as u16, s: s as u8, l: l as u8 })
    }

    /// Create an HSL value, wrapping the hue and clamping saturation/lightness.
    pub fn wrapped(h: i32, s: i32, l: i32) -> Self {
        Self {
            h: h.rem_euclid(360) as u16,
            s: s.clamp(0, 100) as u8,
            l: l.clamp(0, 100) as u8,
        }
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

fn check_range(component: &'static str, value: i32, max: i32) -> Result<(), ColorError> {
    if value < 0 || value > max {
        return Err(ColorError::OutOfRange { component, value, max });
    }
    Ok(())
}

/// A storefront color: the hex it was built from plus its integer HSL.
///
/// The hex is kept verbatim (lowercased), so `Color::from_hex(x).hex()`
/// always reproduces `x` even though integer HSL cannot represent every
/// 24-bit color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    hex: String,
    hue: u16,
    saturation: u8,
    lightness: u8,
}

impl Color {
    /// Build from a `#RRGGBB` string.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let hex = normalize_hex(hex)?;
        let hsl = hex_to_hsl(&hex)?;
        Ok(Self::with_parts(hex, hsl))
    }

    /// Build from HSL; the hex is derived with [`hsl_to_hex`].
    pub fn from_hsl(hsl: Hsl) -> Self {
        Self::with_parts(hsl_to_hex(hsl), hsl)
    }

    /// Parse any supported CSS color and normalize it to `#rrggbb`.
    ///
    /// # Examples
    ///
    /// ```
    /// use casalogy::color::Color;
    ///
    /// assert_eq!(Color::parse("#4169E1").unwrap().hex(), "#4169e1");
    /// assert_eq!(Color::parse("#F00").unwrap().hex(), "#ff0000");
    /// assert_eq!(Color::parse("royalblue").unwrap().hex(), "#4169e1");
    /// assert_eq!(Color::parse("rgb(0, 128, 128)").unwrap().hex(), "#008080");
    /// ```
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let rgba = parse_color(s.trim())?;
        if rgba[3] != 255 {
            tracing::warn!(color = s, alpha = rgba[3], "dropping alpha channel");
        }
        Self::from_hex(&rgb_to_hex([rgba[0], rgba[1], rgba[2]]))
    }

    fn with_parts(hex: String, hsl: Hsl) -> Self {
        Self { hex, hue: hsl.h, saturation: hsl.s, lightness: hsl.l }
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn hue(&self) -> u16 {
        self.hue
    }

    pub fn saturation(&self) -> u8 {
        self.saturation
    }

    pub fn lightness(&self) -> u8 {
        self.lightness
    }

    pub fn hsl(&self) -> Hsl {
        Hsl { h: self.hue, s: self.saturation, l: self.lightness }
    }

    /// RGB channels of the stored hex.
    pub fn rgb(&self) -> [u8; 3] {
        // The hex was validated on construction.
        hex_channels(&self.hex).unwrap_or([0, 0, 0])
    }

    /// Opaque RGBA pixel for image output.
    pub fn to_rgba(&self) -> Rgba<u8> {
        let [r, g, b] = self.rgb();
        Rgba([r, g, b, 255])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Validate a `#RRGGBB` string and return it lowercased.
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    if !HEX_COLOR.is_match(hex) {
        return Err(ColorError::InvalidColorFormat(hex.to_string()));
    }
    Ok(hex.to_ascii_lowercase())
}

/// Convert `#RRGGBB` to integer HSL.
///
/// Channels are normalized to `[0, 1]`, hue comes from the six-sector
/// formula, and all three results are rounded to the nearest integer. A hue
/// that rounds up to 360 is reported as 0.
///
/// # Examples
///
/// ```
/// use casalogy::color::{hex_to_hsl, Hsl};
///
/// assert_eq!(hex_to_hsl("#4169E1").unwrap(), Hsl { h: 225, s: 73, l: 57 });
/// assert_eq!(hex_to_hsl("#808080").unwrap().s, 0);
/// assert!(hex_to_hsl("4169E1").is_err());
/// ```
pub fn hex_to_hsl(hex: &str) -> Result<Hsl, ColorError> {
    if !HEX_COLOR.is_match(hex) {
        return Err(ColorError::InvalidColorFormat(hex.to_string()));
    }
    let [r, g, b] = hex_channels(hex)?;
    Ok(rgb_to_hsl(r, g, b))
}

/// Convert 8-bit RGB channels to integer HSL.
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        // Achromatic
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    Hsl::wrapped(
        (h * 360.0).round() as i32,
        (s * 100.0).round() as i32,
        (l * 100.0).round() as i32,
    )
}

/// Convert integer HSL to lowercase `#rrggbb`.
///
/// # Examples
///
/// ```
/// use casalogy::color::{hsl_to_hex, Hsl};
///
/// assert_eq!(hsl_to_hex(Hsl { h: 225, s: 73, l: 57 }), "#4169e1");
/// assert_eq!(hsl_to_hex(Hsl { h: 0, s: 100, l: 50 }), "#ff0000");
/// ```
pub fn hsl_to_hex(hsl: Hsl) -> String {
    rgb_to_hex(hsl_to_rgb(hsl))
}

/// Convert integer HSL to 8-bit RGB channels.
pub fn hsl_to_rgb(hsl: Hsl) -> [u8; 3] {
    let h = hsl.h as f64 / 360.0;
    let s = hsl.s as f64 / 100.0;
    let l = hsl.l as f64 / 100.0;

    if s == 0.0 {
        let v = to_channel(l);
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    ]
}

/// Piecewise-linear channel value across the six hue sectors.
fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(unit: f64) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

fn rgb_to_hex([r, g, b]: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Split a validated `#RRGGBB` string into channels.
fn hex_channels(hex: &str) -> Result<[u8; 3], ColorError> {
    let digits = hex.strip_prefix('#').ok_or(ColorError::MissingHash)?;
    if digits.len() != 6 {
        return Err(ColorError::InvalidLength(digits.len()));
    }
    Ok([
        parse_hex_pair(&digits[0..2])?,
        parse_hex_pair(&digits[2..4])?,
        parse_hex_pair(&digits[4..6])?,
    ])
}

/// Parse a CSS color string into an RGBA color.
///
/// Hex colors (`#RGB`, `#RRGGBB`) take a fast path; everything else
/// (`rgb()`, `hsl()`, `hwb()`, named colors) goes through lightningcss.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if s.starts_with('#') {
        return parse_hex_color(s);
    }

    parse_css_color(s)
}

/// Parse a hex color string (#RGB or #RRGGBB)
fn parse_hex_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let hex = &s[1..];

    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    match hex.len() {
        3 => {
            // #RGB -> #RRGGBB (doubled digits)
            let mut channels = [0u8; 3];
            for (channel, c) in channels.iter_mut().zip(hex.chars()) {
                *channel = parse_hex_digit(c)? * 17;
            }
            Ok(Rgba([channels[0], channels[1], channels[2], 255]))
        }
        6 => {
            let [r, g, b] = hex_channels(s)?;
            Ok(Rgba([r, g, b, 255]))
        }
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Rgba([
                to_channel(rgb.r as f64),
                to_channel(rgb.g as f64),
                to_channel(rgb.b as f64),
                to_channel(rgb.alpha as f64),
            ])),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c))
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut value = 0u8;
    for c in s.chars() {
        value = value * 16 + parse_hex_digit(c)?;
    }
    Ok(value)
}
