//! Color blending in HCT and CAM16-UCS.

use crate::argb::{lstar_from_argb, Argb};
use crate::cam16::Cam16;
use crate::hct::Hct;
use crate::math::{difference_degrees, rotation_direction, sanitize_degrees_double};

/// Largest hue rotation [`harmonize`] applies, in degrees.
const MAX_HARMONIZE_ROTATION: f64 = 15.0;

/// Shift `design`'s hue toward `source`'s: half the hue difference, at most 15°.
/// Chroma and tone of `design` are kept.
pub fn harmonize(design: Argb, source: Argb) -> Argb {
    let from = Hct::from_argb(design);
    let to = Hct::from_argb(source);
    let rotation = (difference_degrees(from.hue(), to.hue()) * 0.5).min(MAX_HARMONIZE_ROTATION);
    let hue = sanitize_degrees_double(from.hue() + rotation * rotation_direction(from.hue(), to.hue()));
    Hct::from_hct(hue, from.chroma(), from.tone()).to_argb()
}

/// `from` with its hue replaced by the hue of the UCS blend toward `to`.
pub fn hct_hue(from: Argb, to: Argb, amount: f64) -> Argb {
    let ucs = Cam16::from_argb(cam16_ucs(from, to, amount));
    let from_cam = Cam16::from_argb(from);
    Hct::from_hct(ucs.hue(), from_cam.chroma(), lstar_from_argb(from)).to_argb()
}

/// Linear interpolation in CAM16-UCS. `amount` 0.0 is `from`, 1.0 is `to`.
pub fn cam16_ucs(from: Argb, to: Argb, amount: f64) -> Argb {
    let a = Cam16::from_argb(from);
    let b = Cam16::from_argb(to);
    let mix = |x: f64, y: f64| x + (y - x) * amount;
    Cam16::from_ucs(
        mix(a.j_star(), b.j_star()),
        mix(a.a_star(), b.a_star()),
        mix(a.b_star(), b.b_star()),
    )
    .to_argb()
}
