//! Casalogy Studio - core of the Casalogy storefront admin dashboard
//!
//! This library provides:
//! - Hex/HSL color conversion and named color variants for the product color picker
//! - A best-effort rich-text preview of product descriptions
//! - PNG swatch and terminal output, a `casalogy` CLI and WASM bindings

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;
pub mod color;
pub mod config;
pub mod logging;
pub mod output;
pub mod preview;
pub mod suggest;
pub mod terminal;
pub mod variants;
#[cfg(not(target_arch = "wasm32"))]
pub mod watch;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::{hex_to_hsl, hsl_to_hex, Color, ColorError, Hsl};
pub use preview::{parse, Line, LineKind, PreviewNode};
pub use variants::{generate_variations, ColorVariant};
