//! Named color variants derived from a base color
//!
//! Each variant is a pure `Hsl -> Hsl` transform. The builtin table mirrors
//! the admin color picker: lightness steps, saturation boosts/cuts and a
//! 30 degree hue rotation in each direction.

use std::borrow::Cow;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_hex, normalize_hex, Color, ColorError, Hsl};

/// A shift applied to saturation or lightness.
///
/// `limit` is a ceiling when `delta` is positive and a floor otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjustment {
    #[serde(default)]
    pub delta: i32,
    #[serde(default)]
    pub limit: Option<i32>,
}

impl Adjustment {
    pub const NONE: Self = Self { delta: 0, limit: None };

    pub const fn new(delta: i32, limit: i32) -> Self {
        Self { delta, limit: Some(limit) }
    }

    fn apply(self, value: u8) -> i32 {
        let moved = (value as i32).saturating_add(self.delta);
        match self.limit {
            Some(limit) if self.delta >= 0 => moved.min(limit),
            Some(limit) => moved.max(limit),
            None => moved,
        }
    }
}

/// Definition of a named variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    pub name: Cow<'static, str>,
    #[serde(default)]
    pub description: Cow<'static, str>,
    /// Degrees to rotate the hue, wrapped modulo 360
    #[serde(default)]
    pub hue_shift: i32,
    #[serde(default)]
    pub saturation: Adjustment,
    #[serde(default)]
    pub lightness: Adjustment,
}

impl VariantSpec {
    const fn builtin(
        name: &'static str,
        description: &'static str,
        hue_shift: i32,
        saturation: Adjustment,
        lightness: Adjustment,
    ) -> Self {
        Self {
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(description),
            hue_shift,
            saturation,
            lightness,
        }
    }

    /// True when the transform leaves every component unchanged.
    pub fn is_identity(&self) -> bool {
        self.hue_shift.rem_euclid(360) == 0
            && self.saturation.delta == 0
            && self.lightness.delta == 0
    }

    /// Apply this transform to a base HSL value.
    pub fn apply(&self, base: Hsl) -> Hsl {
        Hsl::wrapped(
            (base.h as i32).saturating_add(self.hue_shift),
            self.saturation.apply(base.s),
            self.lightness.apply(base.l),
        )
    }
}

/// The fixed variant table shown for every base color.
pub static BUILTIN_VARIANTS: &[VariantSpec] = &[
    VariantSpec::builtin("Lighter", "20% lighter", 0, Adjustment::NONE, Adjustment::new(20, 95)),
    VariantSpec::builtin("Light", "10% lighter", 0, Adjustment::NONE, Adjustment::new(10, 90)),
    VariantSpec::builtin("Original", "Base color", 0, Adjustment::NONE, Adjustment::NONE),
    VariantSpec::builtin("Dark", "10% darker", 0, Adjustment::NONE, Adjustment::new(-10, 10)),
    VariantSpec::builtin("Darker", "20% darker", 0, Adjustment::NONE, Adjustment::new(-20, 5)),
    VariantSpec::builtin(
        "Saturated",
        "20% more saturated",
        0,
        Adjustment::new(20, 100),
        Adjustment::NONE,
    ),
    VariantSpec::builtin("Muted", "30% less saturated", 0, Adjustment::new(-30, 0), Adjustment::NONE),
    VariantSpec::builtin("Cool", "Hue shifted +30°", 30, Adjustment::NONE, Adjustment::NONE),
    VariantSpec::builtin("Warm", "Hue shifted -30°", -30, Adjustment::NONE, Adjustment::NONE),
];

/// A derived color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorVariant {
    pub name: String,
    pub hex: String,
    pub description: String,
    pub hsl: Hsl,
}

/// Names of the builtin variants, in display order.
pub fn variant_names() -> Vec<&'static str> {
    BUILTIN_VARIANTS.iter().map(|spec| spec.name.as_ref()).collect()
}

/// Look up a builtin variant by case-insensitive name.
pub fn find_variant(name: &str) -> Option<&'static VariantSpec> {
    BUILTIN_VARIANTS.iter().find(|spec| spec.name.eq_ignore_ascii_case(name))
}

/// Compute the builtin variants of a `#RRGGBB` base color.
///
/// # Examples
///
/// ```
/// use casalogy::variants::generate_variations;
///
/// let variants = generate_variations("#000000").unwrap();
/// let darker = variants.iter().find(|v| v.name == "Darker").unwrap();
/// assert_eq!(darker.hsl.l, 5);
/// assert_eq!(darker.hex, "#0d0d0d");
/// ```
pub fn generate_variations(base_hex: &str) -> Result<Vec<ColorVariant>, ColorError> {
    generate_with(base_hex, BUILTIN_VARIANTS)
}

/// Compute variants of a base color from an arbitrary list of specs.
///
/// Identity specs (such as "Original") report the base hex unchanged rather
/// than the hex recomputed from integer HSL.
pub fn generate_with(base_hex: &str, specs: &[VariantSpec]) -> Result<Vec<ColorVariant>, ColorError> {
    let base = Color::from_hex(base_hex)?;
    tracing::debug!(base = base.hex(), hsl = %base.hsl(), count = specs.len(), "generating variants");

    Ok(specs.iter().map(|spec| derive(&base, spec)).collect())
}

fn derive(base: &Color, spec: &VariantSpec) -> ColorVariant {
    let (hsl, hex) = if spec.is_identity() {
        (base.hsl(), base.hex().to_string())
    } else {
        let hsl = spec.apply(base.hsl());
        (hsl, hsl_to_hex(hsl))
    };

    ColorVariant {
        name: spec.name.to_string(),
        hex,
        description: spec.description.to_string(),
        hsl,
    }
}

/// Variants for one base color in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantSet {
    pub base: String,
    pub variants: Vec<ColorVariant>,
}

/// Compute variants for many base colors in parallel, preserving input order.
///
/// Fails on the first base color (in input order) that is not `#RRGGBB`.
pub fn generate_batch(bases: &[String], specs: &[VariantSpec]) -> Result<Vec<VariantSet>, ColorError> {
    bases
        .par_iter()
        .map(|base| {
            let variants = generate_with(base, specs)?;
            Ok(VariantSet { base: normalize_hex(base)?, variants })
        })
        .collect()
}
