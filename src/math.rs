//! Small numeric helpers shared by the color science and quantizer modules.

/// Sign of `num`: 1.0, -1.0, or 0.0.
#[inline]
pub fn signum(num: f64) -> f64 {
    if num < 0.0 {
        -1.0
    } else if num == 0.0 {
        0.0
    } else {
        1.0
    }
}

/// Linear interpolation: `start` at `amount = 0`, `stop` at `amount = 1`.
#[inline]
pub fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (1.0 - amount) * start + amount * stop
}

/// Clamp an integer into `[min, max]`.
#[inline]
pub fn clamp_int(min: i32, max: i32, value: i32) -> i32 {
    value.clamp(min, max)
}

/// Clamp a float into `[min, max]`.
#[inline]
pub fn clamp_double(min: f64, max: f64, value: f64) -> f64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Wrap an integer degree measure into `[0, 360)`.
#[inline]
pub fn sanitize_degrees_int(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// Wrap a degree measure into `[0.0, 360.0)`.
#[inline]
pub fn sanitize_degrees_double(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if d >= 360.0 {
        0.0
    } else {
        d
    }
}

/// Shortest distance between two angles on the circle, in degrees.
#[inline]
pub fn difference_degrees(a: f64, b: f64) -> f64 {
    180.0 - ((a - b).abs() - 180.0).abs()
}

/// Sign of the rotation that travels the short way from `from` to `to`.
///
/// Returns 1.0 when increasing `from` is shorter, -1.0 otherwise.
pub fn rotation_direction(from: f64, to: f64) -> f64 {
    let a = to - from;
    let b = to - from + 360.0;
    let c = to - from - 360.0;
    let (a_abs, b_abs, c_abs) = (a.abs(), b.abs(), c.abs());

    let shortest = if a_abs <= b_abs && a_abs <= c_abs {
        a
    } else if b_abs <= a_abs && b_abs <= c_abs {
        b
    } else {
        c
    };
    if shortest >= 0.0 { 1.0 } else { -1.0 }
}

/// Multiply a row vector by a 3x3 matrix stored row-major.
#[inline]
pub fn matrix_multiply(row: [f64; 3], matrix: &[[f64; 3]; 3]) -> [f64; 3] {
    [
        row[0] * matrix[0][0] + row[1] * matrix[0][1] + row[2] * matrix[0][2],
        row[0] * matrix[1][0] + row[1] * matrix[1][1] + row[2] * matrix[1][2],
        row[0] * matrix[2][0] + row[1] * matrix[2][1] + row[2] * matrix[2][2],
    ]
}
