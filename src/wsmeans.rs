//! Weighted K-means in L*a*b* (Celebi 2011, "Improving the Performance of
//! K-Means for Color Quantization").
//!
//! Points are the image's distinct colors weighted by their pixel counts.
//! Reassignment skips any cluster that the triangle inequality rules out and
//! ignores moves that gain less than [`MIN_MOVEMENT_DISTANCE`].

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::argb::Argb;
use crate::histogram::PixelHistogram;
use crate::lab::Lab;

/// Seed for the cluster initialization draws. Fixed so that runs are reproducible.
pub const RANDOM_SEED: u64 = 0x42688;

const MAX_ITERATIONS: usize = 10;

/// A point only changes cluster when its distance improves by more than this.
const MIN_MOVEMENT_DISTANCE: f64 = 3.0;

/// Weighted K-means quantizer.
pub struct MeansQuantizer;

impl MeansQuantizer {
    /// Cluster the opaque pixels into at most `max_colors` colors.
    ///
    /// `seeds` are the starting centroids, typically [`BoxQuantizer`] output.
    /// Without seeds, centroids are drawn from a fixed-seed generator. Returns
    /// `(color, population)` with unique colors; clusters that end up on the
    /// same device color are combined.
    ///
    /// [`BoxQuantizer`]: crate::wu::BoxQuantizer
    pub fn quantize(pixels: &[Argb], seeds: &[Argb], max_colors: usize) -> Vec<(Argb, u32)> {
        let histogram = PixelHistogram::build(pixels);
        let entries = histogram.entries();
        let points: Vec<Lab> = entries.iter().map(|&(argb, _)| Lab::from_argb(argb)).collect();

        let mut cluster_count = max_colors.min(points.len());
        if !seeds.is_empty() {
            cluster_count = cluster_count.min(seeds.len());
        }
        if cluster_count == 0 {
            return Vec::new();
        }

        let mut rng = StdRng::seed_from_u64(RANDOM_SEED);
        let mut clusters: Vec<Lab> = if seeds.is_empty() {
            (0..cluster_count)
                .map(|_| {
                    Lab::new(
                        rng.gen_range(0.0..=100.0),
                        rng.gen_range(-100.0..=100.0),
                        rng.gen_range(-100.0..=100.0),
                    )
                })
                .collect()
        } else {
            seeds[..cluster_count].iter().map(|&argb| Lab::from_argb(argb)).collect()
        };
        let mut assignments: Vec<usize> = (0..points.len())
            .map(|_| rng.gen_range(0..cluster_count))
            .collect();

        let mut distances = vec![vec![0.0f64; cluster_count]; cluster_count];
        let mut populations = vec![0u32; cluster_count];

        for iteration in 0..MAX_ITERATIONS {
            for i in 0..cluster_count {
                for j in (i + 1)..cluster_count {
                    let d = clusters[i].distance_sq(clusters[j]);
                    distances[i][j] = d;
                    distances[j][i] = d;
                }
            }

            let mut moved = 0usize;
            for (point, assignment) in points.iter().zip(assignments.iter_mut()) {
                let previous = *assignment;
                let previous_distance = point.distance_sq(clusters[previous]);
                let mut minimum_distance = previous_distance;
                let mut nearest = None;

                for (j, cluster) in clusters.iter().enumerate() {
                    // Squared distances: a centroid at least twice as far from
                    // the current one as the point is cannot be nearer.
                    if distances[previous][j] >= 4.0 * previous_distance {
                        continue;
                    }
                    let distance = point.distance_sq(*cluster);
                    if distance < minimum_distance {
                        minimum_distance = distance;
                        nearest = Some(j);
                    }
                }

                if let Some(j) = nearest {
                    let change = (minimum_distance.sqrt() - previous_distance.sqrt()).abs();
                    if change > MIN_MOVEMENT_DISTANCE {
                        moved += 1;
                        *assignment = j;
                    }
                }
            }

            tracing::trace!(iteration, moved, "k-means round");
            if moved == 0 && iteration != 0 {
                break;
            }

            let mut sums = vec![Lab::default(); cluster_count];
            populations.fill(0);
            for ((point, &(_, count)), &cluster) in points.iter().zip(entries).zip(&assignments) {
                populations[cluster] += count;
                let weight = count as f64;
                sums[cluster].l += point.l * weight;
                sums[cluster].a += point.a * weight;
                sums[cluster].b += point.b * weight;
            }
            for ((centroid, sum), &population) in clusters.iter_mut().zip(&sums).zip(&populations) {
                *centroid = if population == 0 {
                    Lab::default()
                } else {
                    let n = population as f64;
                    Lab::new(sum.l / n, sum.a / n, sum.b / n)
                };
            }
        }

        let result = collect_clusters(&clusters, &populations);
        tracing::debug!(
            distinct = points.len(),
            clusters = cluster_count,
            colors = result.len(),
            "k-means quantization"
        );
        result
    }
}

/// Non-empty clusters as device colors in cluster order. Centroids that land
/// on the same color are merged into the first one, summing populations, so
/// every opaque pixel stays counted.
fn collect_clusters(clusters: &[Lab], populations: &[u32]) -> Vec<(Argb, u32)> {
    let mut index: HashMap<Argb, usize> = HashMap::new();
    let mut result: Vec<(Argb, u32)> = Vec::new();
    for (centroid, &population) in clusters.iter().zip(populations) {
        if population == 0 {
            continue;
        }
        let argb = centroid.to_argb();
        match index.get(&argb) {
            Some(&i) => result[i].1 += population,
            None => {
                index.insert(argb, result.len());
                result.push((argb, population));
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argb::argb_from_rgb;

    fn population(result: &[(Argb, u32)]) -> u64 {
        result.iter().map(|&(_, n)| n as u64).sum()
    }

    #[test]
    fn empty_input() {
        assert!(MeansQuantizer::quantize(&[], &[], 8).is_empty());
        assert!(MeansQuantizer::quantize(&[0x00000000; 4], &[0xFF000000], 8).is_empty());
    }

    #[test]
    fn zero_max_colors() {
        assert!(MeansQuantizer::quantize(&[0xFFFF0000], &[], 0).is_empty());
    }

    #[test]
    fn single_color_with_seed() {
        let pixels = vec![0xFFABCDEF; 1000];
        assert_eq!(
            MeansQuantizer::quantize(&pixels, &[0xFFABCDEF], 4),
            vec![(0xFFABCDEF, 1000)]
        );
    }

    #[test]
    fn single_color_without_seeds() {
        let pixels = vec![0xFF4285F4; 10];
        assert_eq!(MeansQuantizer::quantize(&pixels, &[], 4), vec![(0xFF4285F4, 10)]);
    }

    #[test]
    fn seeds_cap_cluster_count() {
        let pixels = [0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFF00];
        let result = MeansQuantizer::quantize(&pixels, &[0xFFFF0000, 0xFF0000FF], 8);
        assert!(result.len() <= 2);
        assert_eq!(population(&result), 4);
    }

    #[test]
    fn well_separated_groups_are_recovered() {
        let mut pixels = vec![0xFFFF0000; 60];
        pixels.extend(vec![0xFF0000FF; 40]);
        let result = MeansQuantizer::quantize(&pixels, &[0xFFFF0000, 0xFF0000FF], 2);
        assert_eq!(result, vec![(0xFFFF0000, 60), (0xFF0000FF, 40)]);
    }

    #[test]
    fn populations_cover_all_opaque_pixels() {
        let mut pixels: Vec<Argb> = (0..2000u32)
            .map(|i| argb_from_rgb((i * 31 % 256) as u8, (i * 17 % 256) as u8, (i * 5 % 256) as u8))
            .collect();
        pixels.extend([0x00123456, 0x80FFFFFF]);
        for max_colors in [1, 3, 16] {
            let result = MeansQuantizer::quantize(&pixels, &[], max_colors);
            assert!(!result.is_empty());
            assert!(result.len() <= max_colors);
            assert_eq!(population(&result), 2000);
        }
    }

    #[test]
    fn deterministic() {
        let pixels: Vec<Argb> = (0..500u32)
            .map(|i| argb_from_rgb((i % 256) as u8, (i * 3 % 256) as u8, 128))
            .collect();
        let a = MeansQuantizer::quantize(&pixels, &[], 6);
        let b = MeansQuantizer::quantize(&pixels, &[], 6);
        assert_eq!(a, b);
    }

    #[test]
    fn colors_are_unique() {
        let pixels: Vec<Argb> = (0..1000u32)
            .map(|i| argb_from_rgb((i * 7 % 256) as u8, (i * 11 % 256) as u8, (i * 13 % 256) as u8))
            .collect();
        let result = MeansQuantizer::quantize(&pixels, &[], 32);
        let mut colors: Vec<Argb> = result.iter().map(|&(c, _)| c).collect();
        colors.sort_unstable();
        colors.dedup();
        assert_eq!(colors.len(), result.len());
    }

    #[test]
    fn clusters_on_one_color_are_merged() {
        let red = Lab::from_argb(0xFFFF0000);
        // Within rounding distance of red.
        let near_red = Lab::new(red.l + 0.01, red.a, red.b);
        let blue = Lab::from_argb(0xFF0000FF);
        let clusters = [red, blue, near_red, Lab::default()];
        assert_eq!(
            collect_clusters(&clusters, &[7, 3, 5, 0]),
            vec![(0xFFFF0000, 12), (0xFF0000FF, 3)]
        );
    }

    #[test]
    fn duplicate_seeds_keep_every_pixel() {
        let mut pixels = vec![0xFFFF0000; 10];
        pixels.extend(vec![0xFFFE0000; 5]);
        let result = MeansQuantizer::quantize(&pixels, &[0xFFFF0000, 0xFFFF0000], 2);
        assert!(!result.is_empty());
        assert_eq!(population(&result), 15);
        if result.len() == 2 {
            assert_ne!(result[0].0, result[1].0);
        }
    }
}
