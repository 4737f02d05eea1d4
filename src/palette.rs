use std::cell::RefCell;
use std::collections::HashMap;

use crate::argb::Argb;
use crate::hct::Hct;

/// Colors of a fixed hue and chroma, indexed by tone.
///
/// Each palette owns a memo of the tones it has produced; solving HCT is the
/// expensive part and scheme generation asks for the same tones repeatedly.
#[derive(Debug, Clone)]
pub struct TonalPalette {
    hue: f64,
    chroma: f64,
    cache: RefCell<HashMap<u64, Argb>>,
}

impl TonalPalette {
    pub fn from_hue_and_chroma(hue: f64, chroma: f64) -> Self {
        Self {
            hue,
            chroma,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Palette with the hue and chroma of `argb`.
    pub fn from_argb(argb: Argb) -> Self {
        let hct = Hct::from_argb(argb);
        Self::from_hue_and_chroma(hct.hue(), hct.chroma())
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    pub fn chroma(&self) -> f64 {
        self.chroma
    }

    /// The color at `tone` (`0.0..=100.0`).
    pub fn tone(&self, tone: f64) -> Argb {
        let key = tone.to_bits();
        if let Some(&argb) = self.cache.borrow().get(&key) {
            return argb;
        }
        let argb = Hct::from_hct(self.hue, self.chroma, tone).to_argb();
        self.cache.borrow_mut().insert(key, argb);
        argb
    }

    /// Number of memoized tones.
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl PartialEq for TonalPalette {
    fn eq(&self, other: &Self) -> bool {
        self.hue == other.hue && self.chroma == other.chroma
    }
}

/// The tonal palettes a theme is built from, all derived from one seed color.
///
/// `a1`..`a3` are accents, `n1`/`n2` neutrals, `error` a fixed red.
#[derive(Debug, Clone, PartialEq)]
pub struct CorePalette {
    pub a1: TonalPalette,
    pub a2: TonalPalette,
    pub a3: TonalPalette,
    pub n1: TonalPalette,
    pub n2: TonalPalette,
    pub error: TonalPalette,
}

impl CorePalette {
    /// Standard palettes: vivid primary, muted secondary, tertiary 60° away.
    pub fn of(argb: Argb) -> Self {
        let hct = Hct::from_argb(argb);
        let hue = hct.hue();
        Self::with_accents(
            hue,
            [
                TonalPalette::from_hue_and_chroma(hue, hct.chroma().max(48.0)),
                TonalPalette::from_hue_and_chroma(hue, 16.0),
                TonalPalette::from_hue_and_chroma(hue + 60.0, 24.0),
            ],
            4.0,
            8.0,
        )
    }

    /// Palettes that keep the seed's own chroma, for content-derived themes.
    pub fn content_of(argb: Argb) -> Self {
        let hct = Hct::from_argb(argb);
        let (hue, chroma) = (hct.hue(), hct.chroma());
        Self::with_accents(
            hue,
            [
                TonalPalette::from_hue_and_chroma(hue, chroma),
                TonalPalette::from_hue_and_chroma(hue, chroma / 3.0),
                TonalPalette::from_hue_and_chroma(hue + 60.0, chroma / 2.0),
            ],
            (chroma / 12.0).min(4.0),
            (chroma / 6.0).min(8.0),
        )
    }

    fn with_accents(hue: f64, accents: [TonalPalette; 3], n1_chroma: f64, n2_chroma: f64) -> Self {
        let [a1, a2, a3] = accents;
        Self {
            a1,
            a2,
            a3,
            n1: TonalPalette::from_hue_and_chroma(hue, n1_chroma),
            n2: TonalPalette::from_hue_and_chroma(hue, n2_chroma),
            error: TonalPalette::from_hue_and_chroma(25.0, 84.0),
        }
    }
}
