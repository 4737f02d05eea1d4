use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zentheme::argb::argb_from_rgba;
use zentheme::{
    argb_from_hex, hex_from_argb, quantize, source_color_from_rgba, theme_from_source_color, Argb,
    CustomColor, QuantizeConfig,
};

#[derive(Parser)]
#[command(name = "zentheme")]
#[command(about = "Material color themes from a seed color or an image")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the best theme source color found in an image
    Source {
        /// Image file (PNG or JPEG)
        image: PathBuf,
    },
    /// Print a complete theme as JSON
    Theme {
        /// Seed color as hex (e.g. "#4285f4")
        #[arg(long, conflicts_with = "image", required_unless_present = "image")]
        seed: Option<String>,

        /// Derive the seed color from an image
        #[arg(long)]
        image: Option<PathBuf>,

        /// Custom color as NAME=HEX, repeatable (e.g. "brand=#ff5722")
        #[arg(long = "custom", value_name = "NAME=HEX")]
        custom: Vec<String>,

        /// Harmonize custom colors toward the seed
        #[arg(long)]
        blend: bool,
    },
    /// Print an image's quantized colors and their pixel counts
    Palette {
        /// Image file (PNG or JPEG)
        image: PathBuf,

        /// Maximum number of colors
        #[arg(short, long, default_value_t = 16)]
        max_colors: u32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zentheme=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Source { image } => {
            let pixels = load_rgba(&image)?;
            let source = source_color_from_rgba(&pixels)
                .with_context(|| format!("no source color in {}", image.display()))?;
            println!("{}", hex_from_argb(source));
        }
        Commands::Theme {
            seed,
            image,
            custom,
            blend,
        } => {
            let source = match (seed, image) {
                (Some(hex), _) => {
                    argb_from_hex(&hex).with_context(|| format!("invalid --seed {hex:?}"))?
                }
                (None, Some(path)) => {
                    let pixels = load_rgba(&path)?;
                    source_color_from_rgba(&pixels)
                        .with_context(|| format!("no source color in {}", path.display()))?
                }
                (None, None) => bail!("either --seed or --image is required"),
            };
            let custom_colors = custom
                .iter()
                .map(|spec| parse_custom_color(spec, blend))
                .collect::<anyhow::Result<Vec<_>>>()?;

            let theme = theme_from_source_color(source, &custom_colors);
            println!("{}", serde_json::to_string_pretty(&theme)?);
        }
        Commands::Palette { image, max_colors } => {
            let pixels: Vec<Argb> = load_rgba(&image)?
                .into_iter()
                .map(argb_from_rgba)
                .collect();
            let config = QuantizeConfig::new().max_colors(max_colors);
            let result = quantize(&pixels, &config)?;

            let mut colors = result.into_colors();
            colors.sort_by(|a, b| b.1.cmp(&a.1));
            for (argb, count) in colors {
                println!("{}\t{count}", hex_from_argb(argb));
            }
        }
    }

    Ok(())
}

fn load_rgba(path: &Path) -> anyhow::Result<Vec<rgb::RGBA<u8>>> {
    let img = image::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?
        .to_rgba8();
    tracing::debug!(
        width = img.width(),
        height = img.height(),
        path = %path.display(),
        "loaded image"
    );
    Ok(img
        .as_raw()
        .chunks_exact(4)
        .map(|p| rgb::RGBA::new(p[0], p[1], p[2], p[3]))
        .collect())
}

fn parse_custom_color(spec: &str, blend: bool) -> anyhow::Result<CustomColor> {
    let Some((name, hex)) = spec.split_once('=') else {
        bail!("custom color {spec:?} is not NAME=HEX");
    };
    let value = argb_from_hex(hex).with_context(|| format!("custom color {name:?}"))?;
    Ok(CustomColor::new(name, value, blend))
}
