//! HCT: CAM16 hue and chroma with L* as tone.
//!
//! Tone ties the color system to contrast: a tone difference of 40 guarantees
//! a contrast ratio of at least 3.0, and 50 guarantees at least 4.5.
//!
//! Not every (hue, chroma, tone) triple exists on an sRGB display. Building an
//! [`Hct`] from a triple runs a gamut search that keeps hue and tone and gives
//! up as little chroma as needed, so the stored attributes always describe a
//! real device color.

use crate::argb::{argb_from_lstar, lstar_from_argb, Argb};
use crate::cam16::Cam16;
use crate::math::{clamp_double, sanitize_degrees_double};
use crate::viewing_conditions::ViewingConditions;

/// Outer search stops when the chroma interval is narrower than this.
const CHROMA_SEARCH_ENDPOINT: f64 = 0.4;

/// Largest CAM16-UCS distance between a requested and a returned color.
const DE_MAX: f64 = 1.0;

/// Largest L* error between a requested and a returned color.
const DL_MAX: f64 = 0.2;

/// Inner search stops when the J interval is narrower than this.
const LIGHTNESS_SEARCH_ENDPOINT: f64 = 0.01;

/// A perceptual color: hue in degrees, chroma, and tone (L*).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    argb: Argb,
}

impl Hct {
    /// The closest displayable color to the requested attributes.
    ///
    /// Hue is wrapped into `[0, 360)` and tone clamped to `[0, 100]`. Chroma is
    /// taken as a request: the result may carry less.
    pub fn from_hct(hue: f64, chroma: f64, tone: f64) -> Self {
        Self::from_argb(solve(hue, chroma, tone))
    }

    pub fn from_argb(argb: Argb) -> Self {
        let cam = Cam16::from_argb(argb);
        Self {
            hue: cam.hue(),
            chroma: cam.chroma(),
            tone: lstar_from_argb(argb),
            argb,
        }
    }

    pub fn to_argb(&self) -> Argb {
        self.argb
    }

    /// Degrees in `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// L*, `0.0..=100.0`.
    pub fn tone(&self) -> f64 {
        self.tone
    }

    /// Re-solve with a new hue. Chroma may drop if the old chroma is out of gamut at the new hue.
    pub fn set_hue(&mut self, hue: f64) {
        *self = Self::from_hct(hue, self.chroma, self.tone);
    }

    /// Re-solve with a new chroma. The stored chroma is the achievable one.
    pub fn set_chroma(&mut self, chroma: f64) {
        *self = Self::from_hct(self.hue, chroma, self.tone);
    }

    /// Re-solve with a new tone. Chroma may drop if the old chroma is out of gamut at the new tone.
    pub fn set_tone(&mut self, tone: f64) {
        *self = Self::from_hct(self.hue, self.chroma, tone);
    }

    /// How this color looks when seen under `vc`, expressed under the default conditions.
    pub fn in_viewing_conditions(&self, vc: &ViewingConditions) -> Self {
        let seen = Cam16::from_argb(self.argb).viewed(vc);
        Self::from_argb(seen)
    }
}

impl From<Argb> for Hct {
    fn from(argb: Argb) -> Self {
        Self::from_argb(argb)
    }
}

/// Device color closest to (hue, chroma, tone) under the default viewing conditions.
pub fn solve(hue: f64, chroma: f64, tone: f64) -> Argb {
    solve_in(
        sanitize_degrees_double(hue),
        chroma,
        clamp_double(0.0, 100.0, tone),
        ViewingConditions::default_conditions(),
    )
}

/// Bisect chroma downward from the request until [`find_cam_by_j`] finds a
/// color at `tone`. Falls back to the gray at `tone`.
pub fn solve_in(hue: f64, chroma: f64, tone: f64, vc: &ViewingConditions) -> Argb {
    if chroma < 1.0 || tone.round_ties_even() <= 0.0 || tone.round_ties_even() >= 100.0 {
        return argb_from_lstar(tone);
    }
    let hue = sanitize_degrees_double(hue);

    // Full chroma is the common case for in-gamut requests.
    if let Some(cam) = find_cam_by_j(hue, chroma, tone, vc) {
        return cam.viewed(vc);
    }

    let mut low = 0.0;
    let mut high = chroma;
    let mut mid = low + (high - low) / 2.0;
    let mut answer = None;

    while (low - high).abs() >= CHROMA_SEARCH_ENDPOINT {
        match find_cam_by_j(hue, mid, tone, vc) {
            Some(cam) => {
                answer = Some(cam);
                low = mid;
            }
            None => high = mid,
        }
        mid = low + (high - low) / 2.0;
    }

    match answer {
        Some(cam) => cam.viewed(vc),
        None => argb_from_lstar(tone),
    }
}

/// Bisect CAM16 lightness J for a color at (hue, chroma) whose clipped device
/// color has L* within [`DL_MAX`] of `tone` and stays within [`DE_MAX`] of the
/// unclipped request.
pub fn find_cam_by_j(hue: f64, chroma: f64, tone: f64, vc: &ViewingConditions) -> Option<Cam16> {
    let mut low = 0.0f64;
    let mut high = 100.0f64;
    let mut best_dl = 1000.0;
    let mut best_de = 1000.0;
    let mut best = None;

    while (low - high).abs() > LIGHTNESS_SEARCH_ENDPOINT {
        let mid = low + (high - low) / 2.0;
        let clipped = Cam16::from_jch_in(mid, chroma, hue, vc).viewed(vc);
        let clipped_lstar = lstar_from_argb(clipped);
        let dl = (tone - clipped_lstar).abs();

        if dl < DL_MAX {
            let cam_clipped = Cam16::from_argb_in(clipped, vc);
            let de = cam_clipped.distance(&Cam16::from_jch_in(
                cam_clipped.j(),
                cam_clipped.chroma(),
                hue,
                vc,
            ));
            if de <= DE_MAX && de <= best_de {
                best_dl = dl;
                best_de = de;
                best = Some(cam_clipped);
            }
        }

        if best_dl == 0.0 && best_de == 0.0 {
            break;
        }
        if clipped_lstar < tone {
            low = mid;
        } else {
            high = mid;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_and_white() {
        assert_eq!(Hct::from_hct(0.0, 0.0, 0.0).to_argb(), 0xFF000000);
        assert_eq!(Hct::from_hct(0.0, 0.0, 100.0).to_argb(), 0xFFFFFFFF);
    }

    #[test]
    fn from_argb_reports_cam_and_lstar() {
        let hct = Hct::from_argb(0xFF4285F4);
        assert!((hct.hue() - 265.979).abs() < 0.001);
        assert!((hct.chroma() - 62.269).abs() < 0.001);
        assert!((hct.tone() - 56.550).abs() < 0.001);
    }

    #[test]
    fn in_gamut_request_is_honored() {
        let hct = Hct::from_hct(120.0, 60.0, 50.0);
        assert_eq!(hct.to_argb(), 0xFF6C7F00);
        assert!((hct.hue() - 120.0).abs() < 1.0);
        assert!((hct.tone() - 50.0).abs() < DL_MAX);
        assert!(hct.chroma() <= 60.0);
    }

    #[test]
    fn out_of_gamut_chroma_is_reduced() {
        let hct = Hct::from_hct(270.0, 200.0, 50.0);
        assert!(hct.chroma() < 100.0);
        assert!((hct.tone() - 50.0).abs() < DL_MAX);
        assert!((hct.hue() - 270.0).abs() < 2.0);
    }

    #[test]
    fn find_cam_by_j_hits_tone() {
        let vc = ViewingConditions::default_conditions();
        let cam = find_cam_by_j(120.0, 30.0, 50.0, vc).unwrap();
        assert!((lstar_from_argb(cam.viewed(vc)) - 50.0).abs() < DL_MAX);
        assert!((cam.hue() - 120.0).abs() < 2.0);
        // No red at this chroma is light enough.
        assert!(find_cam_by_j(27.0, 110.0, 95.0, vc).is_none());
    }

    #[test]
    fn half_tones_round_to_even() {
        // 0.5 and 99.5 round to 0 and 100: pure grays.
        assert_eq!(Hct::from_hct(30.0, 40.0, 0.5).to_argb(), argb_from_lstar(0.5));
        assert_eq!(Hct::from_hct(30.0, 40.0, 0.5).to_argb(), 0xFF020202);
        assert_eq!(Hct::from_hct(30.0, 40.0, 99.5).to_argb(), 0xFFFEFEFE);
        // 1.5 rounds to 2 and is solved for chroma.
        assert!(Hct::from_hct(30.0, 40.0, 1.5).chroma() > 1.0);
    }

    #[test]
    fn hue_wraps_and_tone_clamps() {
        let hct = Hct::from_hct(-30.0, 40.0, 50.0);
        assert!((hct.hue() - 330.0).abs() < 1.0);
        assert_eq!(Hct::from_hct(30.0, 40.0, 150.0).to_argb(), 0xFFFFFFFF);
    }

    #[test]
    fn set_tone_to_own_tone_is_stable() {
        let mut hct = Hct::from_argb(0xFF4285F4);
        let (hue, chroma) = (hct.hue(), hct.chroma());
        hct.set_tone(hct.tone());
        assert!((hct.hue() - hue).abs() < 1e-9);
        assert!((hct.chroma() - chroma).abs() < 1e-9);
        assert_eq!(hct.to_argb(), 0xFF4285F4);
    }

    #[test]
    fn setters_resolve_all_attributes() {
        let mut hct = Hct::from_argb(0xFF4285F4);
        hct.set_tone(95.0);
        assert!((hct.tone() - 95.0).abs() < DL_MAX);
        // Blue cannot keep chroma 62 that close to white.
        assert!(hct.chroma() < 20.0);

        hct.set_hue(400.0);
        assert!(hct.hue() < 360.0);

        let before = hct.tone();
        hct.set_chroma(0.0);
        assert!(hct.chroma() < 3.0);
        assert!((hct.tone() - before).abs() < 0.5);
    }

    #[test]
    fn roundtrip_across_rgb_cube() {
        for r in (0..=255u32).step_by(51) {
            for g in (0..=255u32).step_by(51) {
                for b in (0..=255u32).step_by(51) {
                    let argb = 0xFF00_0000 | r << 16 | g << 8 | b;
                    let hct = Hct::from_argb(argb);
                    let solved = Hct::from_hct(hct.hue(), hct.chroma(), hct.tone());
                    let de = Cam16::from_argb(argb).distance(&Cam16::from_argb(solved.to_argb()));
                    assert!(de <= DE_MAX, "{argb:#x}: distance {de}");
                    assert!((solved.tone() - hct.tone()).abs() <= DL_MAX, "{argb:#x}");
                }
            }
        }
    }

    #[test]
    fn default_conditions_view_is_identity() {
        let hct = Hct::from_argb(0xFF4285F4);
        let same = hct.in_viewing_conditions(ViewingConditions::default_conditions());
        assert_eq!(same.to_argb(), hct.to_argb());
    }
}
