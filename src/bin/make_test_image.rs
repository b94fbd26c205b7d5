use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

use hough_shapes::io::{OutputError, ensure_parent};
use hough_shapes::synth::{CircleSpec, DEFAULT_CIRCLES, circles_test_image, lines_test_image};

#[derive(Parser, Debug)]
#[command(
    name = "make_test_image",
    about = "Generate synthetic grayscale images for the Hough tools",
    version
)]
struct Cli {
    #[command(subcommand)]
    kind: Kind,
}

#[derive(Subcommand, Debug)]
enum Kind {
    /// Four black lines on white: near-horizontal, diagonal, vertical, horizontal
    Lines {
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,

        /// Width in pixels
        #[arg(long, default_value_t = 400)]
        w: u32,

        /// Height in pixels
        #[arg(long, default_value_t = 300)]
        h: u32,
    },
    /// Three circle outlines on a flat background
    Circles {
        /// Output PNG path
        #[arg(long)]
        out: PathBuf,

        /// Width in pixels
        #[arg(long, default_value_t = 500)]
        w: u32,

        /// Height in pixels
        #[arg(long, default_value_t = 400)]
        h: u32,

        /// Background intensity (0-255)
        #[arg(long, default_value_t = 255)]
        bg: u8,

        /// Stroke thickness of each outline
        #[arg(long, default_value_t = 3)]
        thickness: u32,

        /// cx,cy,r of circle 1
        #[arg(long, default_value_t = DEFAULT_CIRCLES[0])]
        c1: CircleSpec,

        /// cx,cy,r of circle 2
        #[arg(long, default_value_t = DEFAULT_CIRCLES[1])]
        c2: CircleSpec,

        /// cx,cy,r of circle 3
        #[arg(long, default_value_t = DEFAULT_CIRCLES[2])]
        c3: CircleSpec,
    },
}

fn save(img: &image::GrayImage, out: &Path) -> Result<(), OutputError> {
    ensure_parent(out)?;
    img.save(out)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.kind {
        Kind::Lines { out, w, h } => {
            log::info!("lines test image {w}x{h}");
            save(&lines_test_image(w, h), &out)?;
            println!("[OK] Test image saved to: {}", out.display());
        }
        Kind::Circles {
            out,
            w,
            h,
            bg,
            thickness,
            c1,
            c2,
            c3,
        } => {
            log::info!("circles test image {w}x{h}: {c1} {c2} {c3}");
            save(&circles_test_image(w, h, bg, thickness, &[c1, c2, c3]), &out)?;
            println!("[OK] Circles image saved to: {}", out.display());
        }
    }

    Ok(())
}
