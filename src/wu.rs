//! Wu's greedy box-splitting quantizer (Graphics Gems II, 1991).
//!
//! Colors are binned into a 32×32×32 RGB grid (plus a zero border, hence 33 per
//! side) and the grid's cumulative moments let any box's population, channel
//! sums and variance be read from eight lookups. The box with the largest
//! variance is split along the axis and position that maximize the summed
//! between-box variance until the requested count is reached or no box has
//! any variance left.

use core::ops::{Add, Sub};

use crate::argb::{argb_from_rgb, blue_from_argb, green_from_argb, red_from_argb, Argb};
use crate::histogram::PixelHistogram;

const INDEX_BITS: u32 = 5;
const SIDE_LENGTH: usize = (1 << INDEX_BITS) + 1;
const TOTAL_SIZE: usize = SIDE_LENGTH * SIDE_LENGTH * SIDE_LENGTH;

#[inline]
fn index(r: usize, g: usize, b: usize) -> usize {
    (r << (INDEX_BITS * 2)) + (r << (INDEX_BITS + 1)) + r + (g << INDEX_BITS) + g + b
}

/// Half-open box in grid coordinates: `(r0, r1] × (g0, g1] × (b0, b1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Cube {
    r0: usize,
    r1: usize,
    g0: usize,
    g1: usize,
    b0: usize,
    b1: usize,
    vol: usize,
}

impl Cube {
    fn whole() -> Self {
        let last = SIDE_LENGTH - 1;
        Self {
            r0: 0,
            r1: last,
            g0: 0,
            g1: last,
            b0: 0,
            b1: last,
            vol: last * last * last,
        }
    }

    fn update_volume(&mut self) {
        self.vol = (self.r1 - self.r0) * (self.g1 - self.g0) * (self.b1 - self.b0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Red,
    Green,
    Blue,
}

/// Cumulative moment table element.
trait Moment: Copy + Add<Output = Self> + Sub<Output = Self> {}

impl Moment for i64 {}
impl Moment for f64 {}

/// Sum of `moment` over the box, by inclusion-exclusion on the cumulative table.
fn volume<T: Moment>(cube: &Cube, moment: &[T]) -> T {
    moment[index(cube.r1, cube.g1, cube.b1)] - moment[index(cube.r1, cube.g1, cube.b0)]
        - moment[index(cube.r1, cube.g0, cube.b1)]
        + moment[index(cube.r1, cube.g0, cube.b0)]
        - moment[index(cube.r0, cube.g1, cube.b1)]
        + moment[index(cube.r0, cube.g1, cube.b0)]
        + moment[index(cube.r0, cube.g0, cube.b1)]
        - moment[index(cube.r0, cube.g0, cube.b0)]
}

/// The part of [`volume`] that does not depend on the cut position along `direction`.
fn bottom<T: Moment>(cube: &Cube, direction: Direction, moment: &[T]) -> T {
    match direction {
        Direction::Red => {
            moment[index(cube.r0, cube.g1, cube.b0)] + moment[index(cube.r0, cube.g0, cube.b1)]
                - moment[index(cube.r0, cube.g1, cube.b1)]
                - moment[index(cube.r0, cube.g0, cube.b0)]
        }
        Direction::Green => {
            moment[index(cube.r1, cube.g0, cube.b0)] + moment[index(cube.r0, cube.g0, cube.b1)]
                - moment[index(cube.r1, cube.g0, cube.b1)]
                - moment[index(cube.r0, cube.g0, cube.b0)]
        }
        Direction::Blue => {
            moment[index(cube.r1, cube.g0, cube.b0)] + moment[index(cube.r0, cube.g1, cube.b0)]
                - moment[index(cube.r1, cube.g1, cube.b0)]
                - moment[index(cube.r0, cube.g0, cube.b0)]
        }
    }
}

/// The part of [`volume`] that moves with a cut at `position` along `direction`.
fn top<T: Moment>(cube: &Cube, direction: Direction, position: usize, moment: &[T]) -> T {
    match direction {
        Direction::Red => {
            moment[index(position, cube.g1, cube.b1)] - moment[index(position, cube.g1, cube.b0)]
                - moment[index(position, cube.g0, cube.b1)]
                + moment[index(position, cube.g0, cube.b0)]
        }
        Direction::Green => {
            moment[index(cube.r1, position, cube.b1)] - moment[index(cube.r1, position, cube.b0)]
                - moment[index(cube.r0, position, cube.b1)]
                + moment[index(cube.r0, position, cube.b0)]
        }
        Direction::Blue => {
            moment[index(cube.r1, cube.g1, position)] - moment[index(cube.r1, cube.g0, position)]
                - moment[index(cube.r0, cube.g1, position)]
                + moment[index(cube.r0, cube.g0, position)]
        }
    }
}

/// Channel sums and population of a box or half-box.
#[derive(Debug, Clone, Copy)]
struct Sums {
    r: i64,
    g: i64,
    b: i64,
    w: i64,
}

impl Sums {
    /// `(r² + g² + b²) / w`, or `None` for an empty half.
    fn spread(self) -> Option<f64> {
        if self.w == 0 {
            return None;
        }
        let (r, g, b) = (self.r as f64, self.g as f64, self.b as f64);
        Some((r * r + g * g + b * b) / self.w as f64)
    }
}

/// Wu quantizer state: cumulative moments over the binned histogram.
pub struct BoxQuantizer {
    weights: Vec<i64>,
    moments_r: Vec<i64>,
    moments_g: Vec<i64>,
    moments_b: Vec<i64>,
    moments: Vec<f64>,
}

impl BoxQuantizer {
    /// Up to `max_colors` opaque colors, one per box, each the population-weighted
    /// mean of the box's pixels. Translucent pixels are ignored.
    pub fn quantize(pixels: &[Argb], max_colors: usize) -> Vec<Argb> {
        if max_colors == 0 {
            return Vec::new();
        }
        let histogram = PixelHistogram::build(pixels);
        let mut quantizer = Self::from_histogram(&histogram);
        quantizer.compute_moments();
        let cubes = quantizer.create_boxes(max_colors);
        let colors = quantizer.create_result(&cubes);
        tracing::debug!(
            distinct = histogram.len(),
            boxes = cubes.len(),
            colors = colors.len(),
            "wu quantization"
        );
        colors
    }

    fn from_histogram(histogram: &PixelHistogram) -> Self {
        let mut weights = vec![0i64; TOTAL_SIZE];
        let mut moments_r = vec![0i64; TOTAL_SIZE];
        let mut moments_g = vec![0i64; TOTAL_SIZE];
        let mut moments_b = vec![0i64; TOTAL_SIZE];
        let mut moments = vec![0f64; TOTAL_SIZE];

        let shift = 8 - INDEX_BITS;
        for &(pixel, count) in histogram.entries() {
            let (red, green, blue) = (
                red_from_argb(pixel),
                green_from_argb(pixel),
                blue_from_argb(pixel),
            );
            let i = index(
                (red >> shift) as usize + 1,
                (green >> shift) as usize + 1,
                (blue >> shift) as usize + 1,
            );
            let count = count as i64;
            let (r, g, b) = (red as i64, green as i64, blue as i64);
            weights[i] += count;
            moments_r[i] += count * r;
            moments_g[i] += count * g;
            moments_b[i] += count * b;
            moments[i] += (count * (r * r + g * g + b * b)) as f64;
        }

        Self {
            weights,
            moments_r,
            moments_g,
            moments_b,
            moments,
        }
    }

    /// Turn the per-bin tables into cumulative (summed-volume) tables.
    fn compute_moments(&mut self) {
        for r in 1..SIDE_LENGTH {
            let mut area = [0i64; SIDE_LENGTH];
            let mut area_r = [0i64; SIDE_LENGTH];
            let mut area_g = [0i64; SIDE_LENGTH];
            let mut area_b = [0i64; SIDE_LENGTH];
            let mut area2 = [0f64; SIDE_LENGTH];

            for g in 1..SIDE_LENGTH {
                let (mut line, mut line_r, mut line_g, mut line_b) = (0i64, 0i64, 0i64, 0i64);
                let mut line2 = 0f64;

                for b in 1..SIDE_LENGTH {
                    let i = index(r, g, b);
                    line += self.weights[i];
                    line_r += self.moments_r[i];
                    line_g += self.moments_g[i];
                    line_b += self.moments_b[i];
                    line2 += self.moments[i];

                    area[b] += line;
                    area_r[b] += line_r;
                    area_g[b] += line_g;
                    area_b[b] += line_b;
                    area2[b] += line2;

                    let prev = index(r - 1, g, b);
                    self.weights[i] = self.weights[prev] + area[b];
                    self.moments_r[i] = self.moments_r[prev] + area_r[b];
                    self.moments_g[i] = self.moments_g[prev] + area_g[b];
                    self.moments_b[i] = self.moments_b[prev] + area_b[b];
                    self.moments[i] = self.moments[prev] + area2[b];
                }
            }
        }
    }

    /// Split the whole cube greedily, always cutting the box of largest variance.
    fn create_boxes(&self, max_colors: usize) -> Vec<Cube> {
        let mut cubes = vec![Cube::default(); max_colors];
        let mut variances = vec![0.0f64; max_colors];
        cubes[0] = Cube::whole();

        let mut generated = max_colors;
        let mut next = 0;
        let mut i = 1;
        while i < max_colors {
            match self.cut(&mut cubes[next]) {
                Some(second) => {
                    cubes[i] = second;
                    variances[next] = self.box_variance(&cubes[next]);
                    variances[i] = self.box_variance(&cubes[i]);
                }
                None => {
                    // Unsplittable: retire it and retry this slot with another box.
                    variances[next] = 0.0;
                    i -= 1;
                }
            }

            next = 0;
            let mut largest = variances[0];
            for (j, &v) in variances.iter().enumerate().take(i + 1).skip(1) {
                if v > largest {
                    largest = v;
                    next = j;
                }
            }
            if largest <= 0.0 {
                generated = i + 1;
                break;
            }
            i += 1;
        }

        cubes.truncate(generated);
        cubes
    }

    fn create_result(&self, cubes: &[Cube]) -> Vec<Argb> {
        cubes
            .iter()
            .filter_map(|cube| {
                let weight = volume(cube, &self.weights);
                if weight <= 0 {
                    return None;
                }
                let mean = |moment: &[i64]| {
                    (volume(cube, moment) as f64 / weight as f64)
                        .round()
                        .clamp(0.0, 255.0) as u8
                };
                Some(argb_from_rgb(
                    mean(&self.moments_r),
                    mean(&self.moments_g),
                    mean(&self.moments_b),
                ))
            })
            .collect()
    }

    fn box_variance(&self, cube: &Cube) -> f64 {
        if cube.vol > 1 {
            self.variance(cube)
        } else {
            0.0
        }
    }

    fn variance(&self, cube: &Cube) -> f64 {
        let dr = volume(cube, &self.moments_r) as f64;
        let dg = volume(cube, &self.moments_g) as f64;
        let db = volume(cube, &self.moments_b) as f64;
        let xx = volume(cube, &self.moments);
        let hypotenuse = dr * dr + dg * dg + db * db;
        let weight = volume(cube, &self.weights);
        if weight == 0 {
            return 0.0;
        }
        xx - hypotenuse / weight as f64
    }

    /// Cut `one` in two. `one` keeps the lower part and the upper part is returned.
    /// `None` when no cut leaves population on both sides.
    fn cut(&self, one: &mut Cube) -> Option<Cube> {
        let whole = Sums {
            r: volume(one, &self.moments_r),
            g: volume(one, &self.moments_g),
            b: volume(one, &self.moments_b),
            w: volume(one, &self.weights),
        };

        let (cut_r, max_r) = self.maximize(one, Direction::Red, one.r0 + 1, one.r1, whole);
        let (cut_g, max_g) = self.maximize(one, Direction::Green, one.g0 + 1, one.g1, whole);
        let (cut_b, max_b) = self.maximize(one, Direction::Blue, one.b0 + 1, one.b1, whole);

        let (direction, position) = if max_r >= max_g && max_r >= max_b {
            (Direction::Red, cut_r?)
        } else if max_g >= max_r && max_g >= max_b {
            (Direction::Green, cut_g?)
        } else {
            (Direction::Blue, cut_b?)
        };

        let mut two = Cube {
            r1: one.r1,
            g1: one.g1,
            b1: one.b1,
            ..Cube::default()
        };
        match direction {
            Direction::Red => {
                one.r1 = position;
                two.r0 = position;
                two.g0 = one.g0;
                two.b0 = one.b0;
            }
            Direction::Green => {
                one.g1 = position;
                two.r0 = one.r0;
                two.g0 = position;
                two.b0 = one.b0;
            }
            Direction::Blue => {
                one.b1 = position;
                two.r0 = one.r0;
                two.g0 = one.g0;
                two.b0 = position;
            }
        }
        one.update_volume();
        two.update_volume();
        Some(two)
    }

    /// Best cut position in `first..last` along `direction` and its score.
    fn maximize(
        &self,
        cube: &Cube,
        direction: Direction,
        first: usize,
        last: usize,
        whole: Sums,
    ) -> (Option<usize>, f64) {
        let base = Sums {
            r: bottom(cube, direction, &self.moments_r),
            g: bottom(cube, direction, &self.moments_g),
            b: bottom(cube, direction, &self.moments_b),
            w: bottom(cube, direction, &self.weights),
        };

        let mut maximum = 0.0;
        let mut cut = None;
        for position in first..last {
            let lower = Sums {
                r: base.r + top(cube, direction, position, &self.moments_r),
                g: base.g + top(cube, direction, position, &self.moments_g),
                b: base.b + top(cube, direction, position, &self.moments_b),
                w: base.w + top(cube, direction, position, &self.weights),
            };
            let upper = Sums {
                r: whole.r - lower.r,
                g: whole.g - lower.g,
                b: whole.b - lower.b,
                w: whole.w - lower.w,
            };
            let (Some(low), Some(high)) = (lower.spread(), upper.spread()) else {
                continue;
            };
            let score = low + high;
            if score > maximum {
                maximum = score;
                cut = Some(position);
            }
        }
        (cut, maximum)
    }
}
