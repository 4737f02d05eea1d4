//! Complete themes: schemes, palettes and custom color groups from one source color.

use crate::argb::{argb_from_rgba, hex_from_argb, is_opaque, Argb};
use crate::blend::harmonize;
use crate::error::ThemeError;
use crate::palette::{CorePalette, TonalPalette};
use crate::scheme::Scheme;
use crate::score::{score, DEFAULT_FALLBACK};

/// Colors requested from images are quantized to this many before scoring.
const SOURCE_QUANTIZE_COLORS: usize = 128;

/// An extra brand or status color to carry through a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CustomColor {
    pub name: String,
    pub value: Argb,
    /// Shift the hue toward the theme's source color.
    pub blend: bool,
}

impl CustomColor {
    pub fn new(name: impl Into<String>, value: Argb, blend: bool) -> Self {
        Self {
            name: name.into(),
            value,
            blend,
        }
    }
}

/// Color, on-color, container, on-container for one custom color in one brightness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ColorGroup {
    pub color: Argb,
    pub on_color: Argb,
    pub color_container: Argb,
    pub on_color_container: Argb,
}

impl ColorGroup {
    fn from_tones(palette: &TonalPalette, tones: [f64; 4]) -> Self {
        let [color, on_color, color_container, on_color_container] =
            tones.map(|tone| palette.tone(tone));
        Self {
            color,
            on_color,
            color_container,
            on_color_container,
        }
    }
}

/// A custom color resolved against a source color.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CustomColorGroup {
    pub color: CustomColor,
    /// The color actually used: harmonized when `color.blend` is set.
    pub value: Argb,
    pub light: ColorGroup,
    pub dark: ColorGroup,
}

/// Hue and chroma of a tonal palette. Rebuild the palette with [`PaletteSpec::to_palette`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteSpec {
    pub hue: f64,
    pub chroma: f64,
}

impl PaletteSpec {
    pub fn to_palette(&self) -> TonalPalette {
        TonalPalette::from_hue_and_chroma(self.hue, self.chroma)
    }
}

impl From<&TonalPalette> for PaletteSpec {
    fn from(palette: &TonalPalette) -> Self {
        Self {
            hue: palette.hue(),
            chroma: palette.chroma(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schemes {
    pub light: Scheme,
    pub dark: Scheme,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Palettes {
    pub primary: PaletteSpec,
    pub secondary: PaletteSpec,
    pub tertiary: PaletteSpec,
    pub neutral: PaletteSpec,
    pub neutral_variant: PaletteSpec,
    pub error: PaletteSpec,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Theme {
    pub source: Argb,
    pub schemes: Schemes,
    pub palettes: Palettes,
    pub custom_colors: Vec<CustomColorGroup>,
}

/// Resolve `color` against `source`: harmonize if requested, then take
/// tones 40/100/90/10 (light) and 80/20/30/90 (dark) of its primary palette.
pub fn custom_color(source: Argb, color: &CustomColor) -> CustomColorGroup {
    let value = if color.blend {
        harmonize(color.value, source)
    } else {
        color.value
    };
    let tones = CorePalette::of(value).a1;
    CustomColorGroup {
        color: color.clone(),
        value,
        light: ColorGroup::from_tones(&tones, [40.0, 100.0, 90.0, 10.0]),
        dark: ColorGroup::from_tones(&tones, [80.0, 20.0, 30.0, 90.0]),
    }
}

pub fn theme_from_source_color(source: Argb, custom_colors: &[CustomColor]) -> Theme {
    let core = CorePalette::of(source);
    Theme {
        source,
        schemes: Schemes {
            light: Scheme::light_from_core(&core),
            dark: Scheme::dark_from_core(&core),
        },
        palettes: Palettes {
            primary: (&core.a1).into(),
            secondary: (&core.a2).into(),
            tertiary: (&core.a3).into(),
            neutral: (&core.n1).into(),
            neutral_variant: (&core.n2).into(),
            error: (&core.error).into(),
        },
        custom_colors: custom_colors
            .iter()
            .map(|color| custom_color(source, color))
            .collect(),
    }
}

/// The best theme source color in `pixels`. Falls back to Google Blue when no
/// pixel qualifies, including when there are no opaque pixels at all.
pub fn source_color_from_pixels(pixels: &[Argb]) -> Argb {
    let colors = crate::quantize_colors(pixels, SOURCE_QUANTIZE_COLORS);
    let source = score(&colors).first().copied().unwrap_or(DEFAULT_FALLBACK);
    tracing::debug!(
        quantized = colors.len(),
        source = %hex_from_argb(source),
        "picked source color"
    );
    source
}

/// [`source_color_from_pixels`] for a decoded RGBA buffer.
///
/// Unlike the packed variant this reports an image without opaque pixels as
/// [`ThemeError::EmptyImage`] instead of falling back.
pub fn source_color_from_rgba(pixels: &[rgb::RGBA<u8>]) -> Result<Argb, ThemeError> {
    let argb: Vec<Argb> = pixels
        .iter()
        .map(|&p| argb_from_rgba(p))
        .filter(|&p| is_opaque(p))
        .collect();
    if argb.is_empty() {
        return Err(ThemeError::EmptyImage);
    }
    Ok(source_color_from_pixels(&argb))
}

pub fn theme_from_pixels(pixels: &[Argb], custom_colors: &[CustomColor]) -> Theme {
    theme_from_source_color(source_color_from_pixels(pixels), custom_colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: Argb = 0xFF4285F4;

    #[test]
    fn theme_from_blue() {
        let theme = theme_from_source_color(BLUE, &[]);
        assert_eq!(theme.source, BLUE);
        assert!(theme.custom_colors.is_empty());
        assert_eq!(theme.schemes.light, Scheme::light(BLUE));
        assert_eq!(theme.schemes.dark, Scheme::dark(BLUE));
        assert_eq!(theme.palettes.secondary.chroma, 16.0);
        assert_eq!(theme.palettes.error, PaletteSpec { hue: 25.0, chroma: 84.0 });
    }

    #[test]
    fn palette_spec_rebuilds_palette() {
        let theme = theme_from_source_color(BLUE, &[]);
        let primary = theme.palettes.primary.to_palette();
        assert_eq!(primary.tone(40.0), theme.schemes.light.primary);
    }

    #[test]
    fn custom_color_blended() {
        let group = custom_color(BLUE, &CustomColor::new("brand", 0xFFFF0000, true));
        assert_eq!(group.value, 0xFFFB0054);
        assert_eq!(group.light.color, 0xFFBE003B);
        assert_eq!(group.light.on_color, 0xFFFFFFFF);
        assert_eq!(group.light.color_container, 0xFFFFDADD);
        assert_eq!(group.light.on_color_container, 0xFF40000E);
        assert_eq!(group.dark.color, 0xFFFFB2BA);
        assert_eq!(group.dark.on_color, 0xFF68001C);
        assert_eq!(group.dark.color_container, 0xFF92002B);
        assert_eq!(group.dark.on_color_container, 0xFFFFDADD);
    }

    #[test]
    fn custom_color_unblended() {
        let color = CustomColor::new("alert", 0xFFFF0000, false);
        let group = custom_color(BLUE, &color);
        assert_eq!(group.value, 0xFFFF0000);
        assert_eq!(group.color, color);
        assert_eq!(group.light.color, 0xFFC10000);
        assert_eq!(group.dark.color, 0xFFFFB4A6);
    }

    #[test]
    fn theme_carries_custom_colors_in_order() {
        let colors = [
            CustomColor::new("a", 0xFFFF0000, true),
            CustomColor::new("b", 0xFF00FF00, false),
        ];
        let theme = theme_from_source_color(BLUE, &colors);
        let names: Vec<&str> = theme.custom_colors.iter().map(|g| g.color.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn source_from_solid_image() {
        assert_eq!(source_color_from_pixels(&vec![BLUE; 64]), BLUE);
    }

    #[test]
    fn source_from_gray_image_falls_back() {
        assert_eq!(source_color_from_pixels(&vec![0xFF808080; 64]), 0xFF4285F4);
        assert_eq!(source_color_from_pixels(&[]), 0xFF4285F4);
    }

    #[test]
    fn rgba_without_opaque_pixels_is_an_error() {
        let pixels = vec![rgb::RGBA::new(255, 0, 0, 0); 8];
        assert_eq!(source_color_from_rgba(&pixels), Err(ThemeError::EmptyImage));
        assert_eq!(source_color_from_rgba(&[]), Err(ThemeError::EmptyImage));
    }

    #[test]
    fn rgba_source_color() {
        let pixels = vec![rgb::RGBA::new(0x42, 0x85, 0xF4, 255); 16];
        assert_eq!(source_color_from_rgba(&pixels), Ok(BLUE));
    }

    #[test]
    fn theme_from_solid_image() {
        let theme = theme_from_pixels(&vec![BLUE; 32], &[]);
        assert_eq!(theme, theme_from_source_color(BLUE, &[]));
    }
}
