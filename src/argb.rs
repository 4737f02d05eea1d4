//! Packed ARGB colors and the non-CAM16 color spaces built on them.
//!
//! Colors are `u32` values laid out as `0xAARRGGBB`. Linear RGB and XYZ are
//! scaled to `0..=100`, matching the white point convention used by CAM16.

use crate::error::ThemeError;
use crate::math::{clamp_int, matrix_multiply};

/// A packed `0xAARRGGBB` color.
pub type Argb = u32;

pub(crate) const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41233895, 0.35762064, 0.18051042],
    [0.2126, 0.7152, 0.0722],
    [0.01932141, 0.11916382, 0.95034478],
];

#[allow(clippy::excessive_precision)]
pub(crate) const XYZ_TO_SRGB: [[f64; 3]; 3] = [
    [3.2413774792388685, -1.5376652402851851, -0.49885366846268053],
    [-0.9691452513005321, 1.8758853451067872, 0.04156585616912061],
    [0.05562093689691305, -0.20395524564742123, 1.0571799111220335],
];

/// D65 white point in XYZ, Y normalized to 100.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

/// Pack opaque red, green, blue into ARGB.
#[inline]
pub const fn argb_from_rgb(red: u8, green: u8, blue: u8) -> Argb {
    0xFF00_0000 | (red as u32) << 16 | (green as u32) << 8 | blue as u32
}

#[inline]
pub const fn alpha_from_argb(argb: Argb) -> u8 {
    (argb >> 24) as u8
}

#[inline]
pub const fn red_from_argb(argb: Argb) -> u8 {
    (argb >> 16) as u8
}

#[inline]
pub const fn green_from_argb(argb: Argb) -> u8 {
    (argb >> 8) as u8
}

#[inline]
pub const fn blue_from_argb(argb: Argb) -> u8 {
    argb as u8
}

/// Whether the alpha byte is fully opaque.
#[inline]
pub const fn is_opaque(argb: Argb) -> bool {
    alpha_from_argb(argb) == 255
}

/// Convert an `rgb::RGBA<u8>` pixel into a packed color, keeping alpha.
#[inline]
pub fn argb_from_rgba(pixel: rgb::RGBA<u8>) -> Argb {
    (pixel.a as u32) << 24 | (pixel.r as u32) << 16 | (pixel.g as u32) << 8 | pixel.b as u32
}

/// Unpack a color into an `rgb::RGBA<u8>` pixel.
#[inline]
pub fn rgba_from_argb(argb: Argb) -> rgb::RGBA<u8> {
    rgb::RGBA {
        r: red_from_argb(argb),
        g: green_from_argb(argb),
        b: blue_from_argb(argb),
        a: alpha_from_argb(argb),
    }
}

/// sRGB transfer function, gamma-encoded `0..=255` → linear `0.0..=100.0`.
pub fn linearized(component: u8) -> f64 {
    let normalized = component as f64 / 255.0;
    if normalized <= 0.040449936 {
        normalized / 12.92 * 100.0
    } else {
        ((normalized + 0.055) / 1.055).powf(2.4) * 100.0
    }
}

/// Inverse sRGB transfer function, linear `0.0..=100.0` → `0..=255`.
///
/// Out-of-range inputs are clamped after rounding.
pub fn delinearized(component: f64) -> u8 {
    let normalized = component / 100.0;
    let encoded = if normalized <= 0.0031308 {
        normalized * 12.92
    } else {
        1.055 * normalized.powf(1.0 / 2.4) - 0.055
    };
    clamp_int(0, 255, (encoded * 255.0).round() as i32) as u8
}

/// XYZ (Y in `0..=100`) → opaque ARGB, clipping to the sRGB gamut.
pub fn argb_from_xyz(x: f64, y: f64, z: f64) -> Argb {
    let [r, g, b] = matrix_multiply([x, y, z], &XYZ_TO_SRGB);
    argb_from_rgb(delinearized(r), delinearized(g), delinearized(b))
}

/// ARGB → XYZ (Y in `0..=100`).
pub fn xyz_from_argb(argb: Argb) -> [f64; 3] {
    let r = linearized(red_from_argb(argb));
    let g = linearized(green_from_argb(argb));
    let b = linearized(blue_from_argb(argb));
    matrix_multiply([r, g, b], &SRGB_TO_XYZ)
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        (LAB_KAPPA * t + 16.0) / 116.0
    }
}

fn lab_inv_f(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_EPSILON {
        ft3
    } else {
        (116.0 * ft - 16.0) / LAB_KAPPA
    }
}

/// ARGB → CIE L*a*b* under D65, as `[l, a, b]`.
pub fn lab_from_argb(argb: Argb) -> [f64; 3] {
    let [x, y, z] = xyz_from_argb(argb);
    let fx = lab_f(x / WHITE_POINT_D65[0]);
    let fy = lab_f(y / WHITE_POINT_D65[1]);
    let fz = lab_f(z / WHITE_POINT_D65[2]);
    [116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz)]
}

/// CIE L*a*b* under D65 → ARGB, clipping to the sRGB gamut.
pub fn argb_from_lab(l: f64, a: f64, b: f64) -> Argb {
    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;
    argb_from_xyz(
        lab_inv_f(fx) * WHITE_POINT_D65[0],
        lab_inv_f(fy) * WHITE_POINT_D65[1],
        lab_inv_f(fz) * WHITE_POINT_D65[2],
    )
}

/// The gray whose L* matches `lstar`.
pub fn argb_from_lstar(lstar: f64) -> Argb {
    let y = y_from_lstar(lstar);
    let component = delinearized(y);
    argb_from_rgb(component, component, component)
}

/// L* of a color, the HCT "tone".
pub fn lstar_from_argb(argb: Argb) -> f64 {
    lstar_from_y(xyz_from_argb(argb)[1])
}

/// Y (`0..=100`) → L*.
pub fn lstar_from_y(y: f64) -> f64 {
    let y = y / 100.0;
    if y <= LAB_EPSILON {
        LAB_KAPPA * y
    } else {
        116.0 * y.cbrt() - 16.0
    }
}

/// L* → Y (`0..=100`).
pub fn y_from_lstar(lstar: f64) -> f64 {
    if lstar > 8.0 {
        ((lstar + 16.0) / 116.0).powi(3) * 100.0
    } else {
        lstar / LAB_KAPPA * 100.0
    }
}

/// Format as lowercase `#rrggbb`. Alpha is dropped.
pub fn hex_from_argb(argb: Argb) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        red_from_argb(argb),
        green_from_argb(argb),
        blue_from_argb(argb)
    )
}

/// Parse `#rgb`, `#rrggbb` or `#aarrggbb` (leading `#` optional).
///
/// The result is always opaque; an alpha byte in the 8-digit form is ignored.
pub fn argb_from_hex(hex: &str) -> Result<Argb, ThemeError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    let invalid = || ThemeError::InvalidHex(hex.to_string());

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    let (r, g, b) = match digits.len() {
        3 => {
            let expand = |i: usize| byte(&digits[i..i + 1].repeat(2));
            (expand(0)?, expand(1)?, expand(2)?)
        }
        6 => (byte(&digits[0..2])?, byte(&digits[2..4])?, byte(&digits[4..6])?),
        8 => (byte(&digits[2..4])?, byte(&digits[4..6])?, byte(&digits[6..8])?),
        _ => return Err(invalid()),
    };
    Ok(argb_from_rgb(r, g, b))
}
