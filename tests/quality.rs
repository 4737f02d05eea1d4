use zentheme::argb::argb_from_rgb;
use zentheme::cam16::Cam16;
use zentheme::hct::Hct;
use zentheme::lab::Lab;
use zentheme::math::difference_degrees;
use zentheme::{Argb, QuantizeConfig};

/// Mean squared L*a*b* error when every pixel is replaced by its nearest palette color.
fn compute_mse(pixels: &[Argb], palette: &[(Argb, u32)]) -> f64 {
    let palette: Vec<Lab> = palette.iter().map(|&(argb, _)| Lab::from_argb(argb)).collect();
    let total: f64 = pixels
        .iter()
        .map(|&p| {
            let lab = Lab::from_argb(p);
            palette
                .iter()
                .map(|&c| lab.distance_sq(c))
                .fold(f64::INFINITY, f64::min)
        })
        .sum();
    total / pixels.len() as f64
}

fn gradient_image(width: u32, height: u32) -> Vec<Argb> {
    let mut pixels = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / width.max(1)) as u8;
            let g = (y * 255 / height.max(1)) as u8;
            let b = ((x + y) * 128 / (width + height).max(1)) as u8;
            pixels.push(argb_from_rgb(r, g, b));
        }
    }
    pixels
}

fn noisy_image(count: u32) -> Vec<Argb> {
    // Knuth's multiplicative hash
    (0..count)
        .map(|i| {
            let h = i.wrapping_mul(2654435761) as u8;
            argb_from_rgb(h, h.wrapping_add(50), h.wrapping_add(100))
        })
        .collect()
}

#[test]
fn more_colors_lower_error() {
    let pixels = gradient_image(64, 64);
    let quantize = |n| {
        zentheme::quantize(&pixels, &QuantizeConfig::new().max_colors(n))
            .unwrap()
            .into_colors()
    };
    let coarse = compute_mse(&pixels, &quantize(2));
    let fine = compute_mse(&pixels, &quantize(64));
    assert!(fine < coarse, "64 colors: {fine}, 2 colors: {coarse}");
    assert!(fine < 60.0, "64-color error too high: {fine}");
}

#[test]
fn noisy_image_populations_balance() {
    let pixels = noisy_image(10_000);
    let result = zentheme::quantize(&pixels, &QuantizeConfig::new().max_colors(16)).unwrap();
    assert!(result.len() <= 16);
    assert_eq!(result.total_population(), 10_000);
}

#[test]
fn kmeans_improves_on_wu_seeds() {
    let pixels = gradient_image(48, 48);
    let seeds = zentheme::wu::BoxQuantizer::quantize(&pixels, 12);
    let seeded: Vec<(Argb, u32)> = seeds.iter().map(|&c| (c, 1)).collect();
    let refined = zentheme::wsmeans::MeansQuantizer::quantize(&pixels, &seeds, 12);
    let wu_error = compute_mse(&pixels, &seeded);
    let kmeans_error = compute_mse(&pixels, &refined);
    // K-means only moves points that gain more than a dead zone, so allow a
    // little slack, but it must not be meaningfully worse.
    assert!(kmeans_error <= wu_error * 1.05, "k-means {kmeans_error} vs wu {wu_error}");
}

#[test]
fn scored_hues_are_distinct() {
    let pixels = gradient_image(64, 64);
    let result = zentheme::quantize(&pixels, &QuantizeConfig::default()).unwrap();
    let ranked = zentheme::score(result.colors());
    assert!(!ranked.is_empty());
    for (i, &a) in ranked.iter().enumerate() {
        for &b in &ranked[i + 1..] {
            let d = difference_degrees(Cam16::from_argb(a).hue(), Cam16::from_argb(b).hue());
            assert!(d >= 15.0, "{a:#x} and {b:#x} are {d}° apart");
        }
    }
}

#[test]
fn hct_solver_stays_in_tolerance() {
    for hue in (0..360).step_by(30) {
        for chroma in [10.0, 40.0, 80.0] {
            for tone in [20.0, 50.0, 80.0] {
                let hct = Hct::from_hct(hue as f64, chroma, tone);
                assert!(
                    (hct.tone() - tone).abs() < 0.5,
                    "h{hue} c{chroma} t{tone}: tone {}",
                    hct.tone()
                );
                assert!(
                    hct.chroma() <= chroma + 2.5,
                    "h{hue} c{chroma} t{tone}: chroma {}",
                    hct.chroma()
                );
            }
        }
    }
}
