//! Ranks quantized colors by how well they would work as a theme's source color.
//!
//! A good source color is chromatic (chroma near [`TARGET_CHROMA`]), not too
//! dark, and shares its hue neighborhood with a meaningful share of the image.
//! Colors whose hue lies within 15° of a better-placed color are dropped so the
//! result offers distinct choices.

use crate::argb::{lstar_from_argb, Argb};
use crate::cam16::Cam16;
use crate::math::{difference_degrees, sanitize_degrees_int};

const TARGET_CHROMA: f64 = 48.0;
const WEIGHT_PROPORTION: f64 = 0.7;
const WEIGHT_CHROMA_ABOVE: f64 = 0.3;
const WEIGHT_CHROMA_BELOW: f64 = 0.1;
const CUTOFF_CHROMA: f64 = 15.0;
const CUTOFF_TONE: f64 = 10.0;
const CUTOFF_EXCITED_PROPORTION: f64 = 0.01;

/// Minimum hue separation between returned colors, in degrees.
const MIN_HUE_DISTANCE: f64 = 15.0;

/// Half-width of the hue window whose population counts toward a color.
const HUE_WINDOW: i32 = 15;

/// Google Blue, returned when nothing in the input qualifies.
pub const DEFAULT_FALLBACK: Argb = 0xFF4285F4;

/// Options for [`score_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreOptions {
    /// Return at most this many colors. `None` returns every survivor.
    pub desired: Option<usize>,
    /// Returned alone when no color survives filtering.
    pub fallback: Argb,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            desired: None,
            fallback: DEFAULT_FALLBACK,
        }
    }
}

impl ScoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn desired(mut self, n: usize) -> Self {
        self.desired = Some(n);
        self
    }

    pub fn fallback(mut self, argb: Argb) -> Self {
        self.fallback = argb;
        self
    }
}

struct Candidate {
    argb: Argb,
    cam: Cam16,
    excited_proportion: f64,
    score: f64,
}

/// Colors suitable as a theme source, best first. Never empty.
///
/// `colors` is `(color, population)` as returned by [`quantize`](crate::quantize).
pub fn score(colors: &[(Argb, u32)]) -> Vec<Argb> {
    score_with(colors, &ScoreOptions::default())
}

/// [`score`] with a result cap and a custom fallback color.
pub fn score_with(colors: &[(Argb, u32)], options: &ScoreOptions) -> Vec<Argb> {
    let population_sum: u64 = colors.iter().map(|&(_, n)| n as u64).sum();
    if population_sum == 0 {
        return vec![options.fallback];
    }

    // Share of the population at each whole hue degree.
    let mut hue_proportions = [0.0f64; 360];
    let cams: Vec<(Argb, Cam16, f64)> = colors
        .iter()
        .map(|&(argb, population)| {
            let cam = Cam16::from_argb(argb);
            let proportion = population as f64 / population_sum as f64;
            hue_proportions[hue_bucket(cam.hue())] += proportion;
            (argb, cam, proportion)
        })
        .collect();

    let candidates: Vec<Candidate> = cams
        .into_iter()
        .map(|(argb, cam, _)| {
            let center = hue_bucket(cam.hue()) as i32;
            let excited_proportion: f64 = (center - HUE_WINDOW..center + HUE_WINDOW)
                .map(|hue| hue_proportions[sanitize_degrees_int(hue) as usize])
                .sum();

            let proportion_score = excited_proportion * 100.0 * WEIGHT_PROPORTION;
            let chroma_weight = if cam.chroma() < TARGET_CHROMA {
                WEIGHT_CHROMA_BELOW
            } else {
                WEIGHT_CHROMA_ABOVE
            };
            let chroma_score = (cam.chroma() - TARGET_CHROMA) * chroma_weight;

            Candidate {
                argb,
                cam,
                excited_proportion,
                score: proportion_score + chroma_score,
            }
        })
        .collect();

    // Input order decides which of two close hues survives.
    let mut chosen: Vec<&Candidate> = Vec::new();
    for candidate in candidates.iter().filter(|c| qualifies(c)) {
        let hue = candidate.cam.hue();
        let duplicate = chosen
            .iter()
            .any(|kept| difference_degrees(hue, kept.cam.hue()) < MIN_HUE_DISTANCE);
        if !duplicate {
            chosen.push(candidate);
        }
    }

    // Stable: equal scores keep input order.
    chosen.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut ranked: Vec<Argb> = chosen.iter().map(|c| c.argb).collect();
    if let Some(desired) = options.desired {
        ranked.truncate(desired.max(1));
    }

    tracing::debug!(
        candidates = candidates.len(),
        survivors = ranked.len(),
        "scored colors"
    );

    if ranked.is_empty() {
        ranked.push(options.fallback);
    }
    ranked
}

fn qualifies(candidate: &Candidate) -> bool {
    candidate.cam.chroma() >= CUTOFF_CHROMA
        && lstar_from_argb(candidate.argb) >= CUTOFF_TONE
        && candidate.excited_proportion >= CUTOFF_EXCITED_PROPORTION
}

/// Whole-degree hue index in `0..360`.
fn hue_bucket(hue: f64) -> usize {
    sanitize_degrees_int(hue.round() as i32) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_qualifying_color() {
        assert_eq!(score(&[(0xFF4285F4, 100)]), vec![0xFF4285F4]);
    }

    #[test]
    fn empty_input_falls_back() {
        assert_eq!(score(&[]), vec![DEFAULT_FALLBACK]);
    }

    #[test]
    fn zero_population_falls_back() {
        assert_eq!(score(&[(0xFFFF0000, 0)]), vec![DEFAULT_FALLBACK]);
    }

    #[test]
    fn grays_are_filtered() {
        let colors = [(0xFF808080, 500), (0xFFFFFFFF, 200), (0xFF000000, 300)];
        assert_eq!(score(&colors), vec![DEFAULT_FALLBACK]);
    }

    #[test]
    fn too_dark_is_filtered() {
        // Deep navy: plenty of chroma, tone below the cutoff.
        assert_eq!(score(&[(0xFF000033, 100)]), vec![DEFAULT_FALLBACK]);
    }

    #[test]
    fn rare_hue_is_filtered() {
        // Red is under 1% of the image and has no neighbors.
        let colors = [(0xFF0000FF, 995), (0xFFFF0000, 5)];
        assert_eq!(score(&colors), vec![0xFF0000FF]);
    }

    #[test]
    fn neighbors_lift_a_rare_hue() {
        // Red and orange-red are 0.6% each but share a hue window, so each
        // counts 1.2%. Green is 0.6% alone and is filtered.
        let colors = [(0xFF0000FF, 988), (0xFFFF0000, 6), (0xFFFF2000, 6), (0xFF00FF00, 6)];
        assert_eq!(score(&colors), vec![0xFF0000FF, 0xFFFF0000]);

        let control = [(0xFF0000FF, 994), (0xFFFF0000, 6)];
        assert_eq!(score(&control), vec![0xFF0000FF]);
    }

    #[test]
    fn chroma_below_target_is_weighted_lightly() {
        // Chroma 20 vs 40: the 6% population lead outweighs 0.1 per unit of chroma.
        let colors = [(0xFF008488, 47), (0xFF986C6A, 53)];
        assert_eq!(score(&colors), vec![0xFF986C6A, 0xFF008488]);
    }

    #[test]
    fn chroma_above_target_is_weighted_heavily() {
        // Chroma 60 vs 80: the same lead loses to 0.3 per unit of chroma.
        let colors = [(0xFFC84E50, 53), (0xFFBF3ACC, 47)];
        assert_eq!(score(&colors), vec![0xFFBF3ACC, 0xFFC84E50]);

        // A bigger lead wins again.
        let colors = [(0xFFC84E50, 58), (0xFFBF3ACC, 42)];
        assert_eq!(score(&colors), vec![0xFFC84E50, 0xFFBF3ACC]);
    }

    #[test]
    fn custom_fallback() {
        let options = ScoreOptions::new().fallback(0xFF00FF00);
        assert_eq!(score_with(&[(0xFF808080, 10)], &options), vec![0xFF00FF00]);
    }

    #[test]
    fn ranks_distinct_hues() {
        let colors = [(0xFFFF0000, 300), (0xFF00FF00, 300), (0xFF0000FF, 300), (0xFFFFFF00, 100)];
        let ranked = score(&colors);
        assert_eq!(ranked.len(), 4);
        for (i, &a) in ranked.iter().enumerate() {
            for &b in &ranked[i + 1..] {
                let d = difference_degrees(Cam16::from_argb(a).hue(), Cam16::from_argb(b).hue());
                assert!(d >= MIN_HUE_DISTANCE);
            }
        }
    }

    #[test]
    fn close_hues_keep_first_seen() {
        // Same hue family, the first listed wins even with a lower score.
        let colors = [(0xFF3050C0, 100), (0xFF2850D0, 100)];
        let hues = (
            Cam16::from_argb(0xFF3050C0).hue(),
            Cam16::from_argb(0xFF2850D0).hue(),
        );
        assert!(difference_degrees(hues.0, hues.1) < MIN_HUE_DISTANCE);
        assert_eq!(score(&colors), vec![0xFF3050C0]);
    }

    #[test]
    fn desired_caps_output() {
        let colors = [(0xFFFF0000, 300), (0xFF00FF00, 300), (0xFF0000FF, 300)];
        let ranked = score_with(&colors, &ScoreOptions::new().desired(2));
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked, score(&colors)[..2].to_vec());
    }

    #[test]
    fn hue_bucket_wraps() {
        assert_eq!(hue_bucket(359.6), 0);
        assert_eq!(hue_bucket(0.4), 0);
        assert_eq!(hue_bucket(180.5), 181);
    }
}
