//! CAM16 viewing conditions.
//!
//! Everything CAM16 needs that depends only on the environment (white point,
//! adapting luminance, background, surround) is computed once here.

use std::f64::consts::PI;
use std::sync::OnceLock;

use crate::argb::{y_from_lstar, WHITE_POINT_D65};
use crate::math::lerp;

/// Physical description of the viewing environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingParameters {
    /// White point in XYZ, Y normalized to 100.
    pub white_point: [f64; 3],
    /// Luminance of the adapting field in cd/m². Lux × 0.0586.
    pub adapting_luminance: f64,
    /// L* of the area surrounding the color.
    pub background_lstar: f64,
    /// 0.0 = dark (cinema), 1.0 = dim (TV at night), 2.0 = average.
    pub surround: f64,
    /// Whether the eye discounts the illuminant's tint. Displays are self-luminous, so `false`.
    pub discounting_illuminant: bool,
}

impl Default for ViewingParameters {
    /// sRGB-like viewing: D65, 200 lux, mid-gray background, average surround.
    fn default() -> Self {
        Self {
            white_point: WHITE_POINT_D65,
            adapting_luminance: (200.0 / PI) * y_from_lstar(50.0) / 100.0,
            background_lstar: 50.0,
            surround: 2.0,
            discounting_illuminant: false,
        }
    }
}

/// Precomputed CAM16 coefficients for one viewing environment.
///
/// The field names follow the CAM16 paper's notation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

impl ViewingConditions {
    pub fn new(params: &ViewingParameters) -> Self {
        let [wx, wy, wz] = params.white_point;
        let r_w = wx * 0.401288 + wy * 0.650173 + wz * -0.051461;
        let g_w = wx * -0.250268 + wy * 1.204414 + wz * 0.045854;
        let b_w = wx * -0.002079 + wy * 0.048952 + wz * 0.953127;

        let f = 0.8 + params.surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };

        let la = params.adapting_luminance;
        let d = if params.discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-la - 42.0) / 92.0).exp())
        }
        .clamp(0.0, 1.0);
        let nc = f;
        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        let k = 1.0 / (5.0 * la + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = k4 * la + 0.1 * k4f * k4f * (5.0 * la).cbrt();

        let n = y_from_lstar(params.background_lstar) / wy;
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let adapted = |channel_d: f64, white: f64| {
            let factor = (fl * channel_d * white / 100.0).powf(0.42);
            400.0 * factor / (factor + 27.13)
        };
        let rgb_a = [
            adapted(rgb_d[0], r_w),
            adapted(rgb_d[1], g_w),
            adapted(rgb_d[2], b_w),
        ];
        let aw = (2.0 * rgb_a[0] + rgb_a[1] + 0.05 * rgb_a[2]) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }

    /// Shared sRGB-like conditions, built on first use.
    pub fn default_conditions() -> &'static ViewingConditions {
        static DEFAULT: OnceLock<ViewingConditions> = OnceLock::new();
        DEFAULT.get_or_init(|| ViewingConditions::new(&ViewingParameters::default()))
    }
}

impl Default for ViewingConditions {
    fn default() -> Self {
        *Self::default_conditions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_coefficients() {
        let vc = ViewingConditions::default_conditions();
        assert!((vc.n - 0.184).abs() < 1e-3);
        assert!((vc.aw - 29.98).abs() < 0.01);
        assert!((vc.nbb - 1.017).abs() < 1e-3);
        assert!((vc.c - 0.69).abs() < 1e-9);
        assert!((vc.nc - 1.0).abs() < 1e-9);
        assert!((vc.fl - 0.388).abs() < 1e-3);
        assert!((vc.z - 1.909).abs() < 1e-3);
    }

    #[test]
    fn default_is_shared() {
        let a = ViewingConditions::default_conditions();
        let b = ViewingConditions::default_conditions();
        assert!(std::ptr::eq(a, b));
        assert_eq!(ViewingConditions::default(), *a);
    }

    #[test]
    fn dark_surround_changes_exponent() {
        let dark = ViewingConditions::new(&ViewingParameters {
            surround: 0.0,
            ..ViewingParameters::default()
        });
        assert!((dark.c - 0.525).abs() < 1e-9);
        assert!(dark.nc < 1.0);
    }
}
