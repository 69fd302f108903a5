//! Terminal rendering of color variants
//!
//! Uses 24-bit ANSI background colors, so output needs a true-color terminal.

use crate::color::Color;
use crate::variants::ColorVariant;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Width of a swatch cell in columns.
const SWATCH_WIDTH: usize = 6;

/// Convert a color to an ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use casalogy::color::Color;
/// use casalogy::terminal::color_to_ansi_bg;
///
/// let red = Color::from_hex("#ff0000").unwrap();
/// assert_eq!(color_to_ansi_bg(&red), "\x1b[48;2;255;0;0m");
/// ```
pub fn color_to_ansi_bg(color: &Color) -> String {
    let [r, g, b] = color.rgb();
    format!("\x1b[48;2;{};{};{}m", r, g, b)
}

/// A blank cell painted with the color.
pub fn swatch(color: &Color) -> String {
    format!("{}{}{}", color_to_ansi_bg(color), " ".repeat(SWATCH_WIDTH), ANSI_RESET)
}

/// One line per variant: swatch, name, hex, HSL and description.
///
/// With `colored` false the swatch column is left out, for pipes and files.
pub fn render_variant_table(variants: &[ColorVariant], colored: bool) -> String {
    let name_width = variants.iter().map(|v| v.name.chars().count()).max().unwrap_or(0);
    let mut output = String::new();

    for variant in variants {
        if colored {
            if let Ok(color) = Color::from_hex(&variant.hex) {
                output.push_str(&swatch(&color));
                output.push(' ');
            }
        }
        output.push_str(&format!(
            "{:width$}  {}  {:20}  {}\n",
            variant.name,
            variant.hex,
            variant.hsl.to_string(),
            variant.description,
            width = name_width
        ));
    }

    output
}
