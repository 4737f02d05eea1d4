//! Material-style color themes from a seed color or an image.
//!
//! The pipeline, leaf to root:
//!
//! - [`cam16`] and [`hct`]: a perceptual color model whose tone axis tracks
//!   contrast, with a gamut solver for arbitrary (hue, chroma, tone) requests.
//! - [`quantize`]: Wu box splitting ([`wu`]) refined by weighted K-means
//!   ([`wsmeans`]), giving the image's dominant colors and their populations.
//! - [`score`]: ranks those colors for use as a theme seed.
//! - [`palette`], [`scheme`] and [`theme`]: tonal palettes and the light/dark
//!   role assignments built from the seed.
//!
//! ```
//! let theme = zentheme::theme_from_source_color(0xFF4285F4, &[]);
//! assert_eq!(theme.source, 0xFF4285F4);
//! ```

#![forbid(unsafe_code)]

pub mod argb;
pub mod blend;
pub mod cam16;
pub mod error;
pub mod hct;
pub mod histogram;
pub mod lab;
pub mod math;
pub mod palette;
pub mod scheme;
pub mod score;
pub mod theme;
pub mod viewing_conditions;
pub mod wsmeans;
pub mod wu;

pub use argb::{argb_from_hex, hex_from_argb, Argb};
pub use cam16::Cam16;
pub use error::ThemeError;
pub use hct::Hct;
pub use palette::{CorePalette, TonalPalette};
pub use scheme::Scheme;
pub use score::{score, score_with, ScoreOptions};
pub use theme::{
    custom_color, source_color_from_pixels, source_color_from_rgba, theme_from_pixels,
    theme_from_source_color, ColorGroup, CustomColor, CustomColorGroup, PaletteSpec, Palettes,
    Schemes, Theme,
};
pub use viewing_conditions::{ViewingConditions, ViewingParameters};

use wsmeans::MeansQuantizer;
use wu::BoxQuantizer;

/// Configuration for image quantization.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantizeConfig {
    /// Upper bound on the number of output colors (at least 1).
    /// Fewer are returned when the image has fewer distinct colors.
    pub max_colors: u32,
}

impl Default for QuantizeConfig {
    fn default() -> Self {
        Self { max_colors: 128 }
    }
}

impl QuantizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_colors(mut self, n: u32) -> Self {
        self.max_colors = n;
        self
    }
}

/// Quantization result: representative colors and how many pixels each stands for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuantizeResult {
    colors: Vec<(Argb, u32)>,
}

impl QuantizeResult {
    /// `(color, population)` pairs. Colors are opaque and unique.
    pub fn colors(&self) -> &[(Argb, u32)] {
        &self.colors
    }

    pub fn into_colors(self) -> Vec<(Argb, u32)> {
        self.colors
    }

    /// Population of `argb`, if it is one of the output colors.
    pub fn population(&self, argb: Argb) -> Option<u32> {
        self.colors
            .iter()
            .find(|&&(color, _)| color == argb)
            .map(|&(_, count)| count)
    }

    /// Number of colors.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Sum of all populations: the number of opaque input pixels.
    pub fn total_population(&self) -> u64 {
        self.colors.iter().map(|&(_, count)| count as u64).sum()
    }
}

/// Quantize packed ARGB pixels to at most `config.max_colors` colors.
///
/// Pixels with alpha below 255 are ignored. Wu's box splitting picks the
/// starting centroids and weighted K-means refines them.
pub fn quantize(pixels: &[Argb], config: &QuantizeConfig) -> Result<QuantizeResult, ThemeError> {
    validate_config(config)?;
    Ok(QuantizeResult {
        colors: quantize_colors(pixels, config.max_colors as usize),
    })
}

/// Wu boxes, then K-means seeded with the box means. `max_colors` must be positive.
pub(crate) fn quantize_colors(pixels: &[Argb], max_colors: usize) -> Vec<(Argb, u32)> {
    let seeds = BoxQuantizer::quantize(pixels, max_colors);
    let colors = MeansQuantizer::quantize(pixels, &seeds, max_colors);
    tracing::debug!(
        pixels = pixels.len(),
        seeds = seeds.len(),
        colors = colors.len(),
        "quantized"
    );
    colors
}

/// Quantize an RGBA buffer, as produced by image decoders.
pub fn quantize_rgba(
    pixels: &[rgb::RGBA<u8>],
    config: &QuantizeConfig,
) -> Result<QuantizeResult, ThemeError> {
    let argb: Vec<Argb> = pixels.iter().map(|&p| argb::argb_from_rgba(p)).collect();
    quantize(&argb, config)
}

fn validate_config(config: &QuantizeConfig) -> Result<(), ThemeError> {
    if config.max_colors == 0 {
        return Err(ThemeError::InvalidMaxColors(config.max_colors));
    }
    Ok(())
}
