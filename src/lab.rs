use crate::argb::{argb_from_lab, lab_from_argb, Argb};

/// CIE L*a*b* color, D65 white.
///
/// L: lightness [0, 100], a: green-red, b: blue-yellow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    pub fn from_argb(argb: Argb) -> Self {
        let [l, a, b] = lab_from_argb(argb);
        Self { l, a, b }
    }

    /// Opaque device color, channels clamped into gamut.
    pub fn to_argb(self) -> Argb {
        argb_from_lab(self.l, self.a, self.b)
    }

    /// Squared Euclidean distance in L*a*b*.
    pub fn distance_sq(self, other: Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }
}
