//! CAM16 color appearance model.
//!
//! A color is a device color plus the environment it is seen in. CAM16 turns
//! both into perceptual attributes, and its CAM16-UCS coordinates
//! (`j_star`, `a_star`, `b_star`) are where color differences are measured.

use std::f64::consts::PI;

use crate::argb::{argb_from_xyz, blue_from_argb, green_from_argb, linearized, red_from_argb, Argb};
use crate::math::{sanitize_degrees_double, signum};
use crate::viewing_conditions::ViewingConditions;

/// A color expressed in all CAM16 dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    hue: f64,
    chroma: f64,
    j: f64,
    q: f64,
    m: f64,
    s: f64,
    j_star: f64,
    a_star: f64,
    b_star: f64,
}

impl Cam16 {
    /// Hue angle in degrees, `[0, 360)`.
    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Chroma, informally colorfulness relative to a white of equal brightness.
    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Lightness J.
    pub fn j(&self) -> f64 {
        self.j
    }

    /// Brightness Q.
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Colorfulness M.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Saturation s.
    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn j_star(&self) -> f64 {
        self.j_star
    }

    pub fn a_star(&self) -> f64 {
        self.a_star
    }

    pub fn b_star(&self) -> f64 {
        self.b_star
    }

    /// CAM16-UCS color difference, `1.41 * ΔE'^0.63`.
    pub fn distance(&self, other: &Cam16) -> f64 {
        let dj = self.j_star - other.j_star;
        let da = self.a_star - other.a_star;
        let db = self.b_star - other.b_star;
        let de_prime = (dj * dj + da * da + db * db).sqrt();
        1.41 * de_prime.powf(0.63)
    }

    /// Appearance of `argb` under the default viewing conditions.
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_argb_in(argb, ViewingConditions::default_conditions())
    }

    /// Appearance of `argb` under `vc`.
    pub fn from_argb_in(argb: Argb, vc: &ViewingConditions) -> Self {
        let red_l = linearized(red_from_argb(argb));
        let green_l = linearized(green_from_argb(argb));
        let blue_l = linearized(blue_from_argb(argb));

        let x = 0.41233895 * red_l + 0.35762064 * green_l + 0.18051042 * blue_l;
        let y = 0.2126 * red_l + 0.7152 * green_l + 0.0722 * blue_l;
        let z = 0.01932141 * red_l + 0.11916382 * green_l + 0.95034478 * blue_l;

        // XYZ → cone responses, then chromatic adaptation
        let r_c = 0.401288 * x + 0.650173 * y - 0.051461 * z;
        let g_c = -0.250268 * x + 1.204414 * y + 0.045854 * z;
        let b_c = -0.002079 * x + 0.048952 * y + 0.953127 * z;
        let r_d = vc.rgb_d[0] * r_c;
        let g_d = vc.rgb_d[1] * g_c;
        let b_d = vc.rgb_d[2] * b_c;

        let compress = |component: f64| {
            let af = (vc.fl * component.abs() / 100.0).powf(0.42);
            signum(component) * 400.0 * af / (af + 27.13)
        };
        let r_a = compress(r_d);
        let g_a = compress(g_d);
        let b_a = compress(b_d);

        // Opponent channels
        let a = (11.0 * r_a - 12.0 * g_a + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;
        let u = (20.0 * r_a + 20.0 * g_a + 21.0 * b_a) / 20.0;
        let p2 = (40.0 * r_a + 20.0 * g_a + b_a) / 20.0;

        let hue = sanitize_degrees_double(b.atan2(a).to_degrees());
        let hue_radians = hue.to_radians();

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime * PI / 180.0 + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * (a * a + b * b).sqrt() / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(vc.n)).powf(0.73);

        let c = alpha * (j / 100.0).sqrt();
        let m = c * vc.fl_root;
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();

        let (j_star, a_star, b_star) = ucs_coordinates(j, m, hue_radians);
        Self {
            hue,
            chroma: c,
            j,
            q,
            m,
            s,
            j_star,
            a_star,
            b_star,
        }
    }

    /// Build from lightness J, chroma and hue under the default conditions.
    pub fn from_jch(j: f64, c: f64, h: f64) -> Self {
        Self::from_jch_in(j, c, h, ViewingConditions::default_conditions())
    }

    /// Build from lightness J, chroma and hue under `vc`.
    pub fn from_jch_in(j: f64, c: f64, h: f64, vc: &ViewingConditions) -> Self {
        let q = (4.0 / vc.c) * (j / 100.0).sqrt() * (vc.aw + 4.0) * vc.fl_root;
        let m = c * vc.fl_root;
        let alpha = c / (j / 100.0).sqrt();
        let s = 50.0 * (alpha * vc.c / (vc.aw + 4.0)).sqrt();

        let (j_star, a_star, b_star) = ucs_coordinates(j, m, h.to_radians());
        Self {
            hue: h,
            chroma: c,
            j,
            q,
            m,
            s,
            j_star,
            a_star,
            b_star,
        }
    }

    /// Build from CAM16-UCS coordinates under the default conditions.
    pub fn from_ucs(j_star: f64, a_star: f64, b_star: f64) -> Self {
        Self::from_ucs_in(j_star, a_star, b_star, ViewingConditions::default_conditions())
    }

    /// Build from CAM16-UCS coordinates under `vc`.
    pub fn from_ucs_in(j_star: f64, a_star: f64, b_star: f64, vc: &ViewingConditions) -> Self {
        let m_star = (a_star * a_star + b_star * b_star).sqrt();
        let m = ((m_star * 0.0228).exp() - 1.0) / 0.0228;
        let c = m / vc.fl_root;
        let mut h = b_star.atan2(a_star).to_degrees();
        if h < 0.0 {
            h += 360.0;
        }
        let j = j_star / (1.0 - (j_star - 100.0) * 0.007);
        Self::from_jch_in(j, c, h, vc)
    }

    /// Device color under the default conditions.
    pub fn to_argb(&self) -> Argb {
        self.viewed(ViewingConditions::default_conditions())
    }

    /// Device color that produces this appearance under `vc`, clipped to sRGB.
    pub fn viewed(&self, vc: &ViewingConditions) -> Argb {
        let alpha = if self.chroma == 0.0 || self.j == 0.0 {
            0.0
        } else {
            self.chroma / (self.j / 100.0).sqrt()
        };

        let t = (alpha / (1.64 - 0.29f64.powf(vc.n)).powf(0.73)).powf(1.0 / 0.9);
        let h_rad = self.hue.to_radians();
        let e_hue = 0.25 * ((h_rad + 2.0).cos() + 3.8);
        let ac = vc.aw * (self.j / 100.0).powf(1.0 / vc.c / vc.z);
        let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
        let p2 = ac / vc.nbb;

        let h_sin = h_rad.sin();
        let h_cos = h_rad.cos();
        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;

        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;

        // Undo response compression; the base must stay non-negative for the power.
        let expand = |component: f64| {
            let base = (27.13 * component.abs() / (400.0 - component.abs())).max(0.0);
            signum(component) * (100.0 / vc.fl) * base.powf(1.0 / 0.42)
        };
        let r_f = expand(r_a) / vc.rgb_d[0];
        let g_f = expand(g_a) / vc.rgb_d[1];
        let b_f = expand(b_a) / vc.rgb_d[2];

        let x = 1.86206786 * r_f - 1.01125463 * g_f + 0.14918677 * b_f;
        let y = 0.38752654 * r_f + 0.62144744 * g_f - 0.00897398 * b_f;
        let z = -0.01584150 * r_f - 0.03412294 * g_f + 1.04996444 * b_f;
        argb_from_xyz(x, y, z)
    }
}

/// CAM16-UCS (J*, a*, b*) from lightness, colorfulness and hue.
fn ucs_coordinates(j: f64, m: f64, hue_radians: f64) -> (f64, f64, f64) {
    let j_star = (1.0 + 100.0 * 0.007) * j / (1.0 + 0.007 * j);
    let m_star = 1.0 / 0.0228 * (1.0 + 0.0228 * m).ln();
    (j_star, m_star * hue_radians.cos(), m_star * hue_radians.sin())
}
