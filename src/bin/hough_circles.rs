use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};

use hough_shapes::config::{CircleConfig, load_config};
use hough_shapes::io::{load_grayscale, write_text_file};
use hough_shapes::pipeline::detect_circles;
use hough_shapes::render::{
    CHART_SIZE, HeatmapAxes, annotate_circles, register_chart_font, render_accumulator_chart,
};
use hough_shapes::report::{circle_report, circle_report_json};

#[derive(Parser, Debug)]
#[command(
    name = "hough_circles",
    about = "Detect fixed-radius circles with the Hough transform",
    version
)]
struct Cli {
    /// Input image
    #[arg(long)]
    image: PathBuf,

    /// Circle radius in pixels (required here or in --config)
    #[arg(long)]
    radius: Option<i32>,

    /// JSON file with circle detection parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sobel magnitude threshold for edge pixels
    #[arg(long = "edge-thresh")]
    edge_thresh: Option<f32>,

    /// Minimum votes for a centre
    #[arg(long = "min-votes")]
    min_votes: Option<u32>,

    /// Maximum number of circles
    #[arg(long)]
    k: Option<usize>,

    /// Output directory
    #[arg(long = "out-dir", default_value = "data/output")]
    out_dir: PathBuf,

    /// TrueType font for the accumulator chart text (system fonts are tried otherwise)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also write the centres as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<CircleConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => load_config::<CircleConfig>(path)?,
            None => CircleConfig::default(),
        };
        if let Some(v) = self.radius {
            cfg.radius = v;
        }
        if let Some(v) = self.edge_thresh {
            cfg.edge_threshold = v;
        }
        if let Some(v) = self.min_votes {
            cfg.min_votes = v;
        }
        if let Some(v) = self.k {
            cfg.k = v;
        }
        Ok(cfg)
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if !cli.image.is_file() {
        return Err(format!("Image not found: {}", cli.image.display()).into());
    }
    let config = cli.resolve_config()?;
    if let Some(font) = &cli.font {
        register_chart_font(font)?;
    }
    log::info!("circle detection on {} with {:?}", cli.image.display(), config);

    let gray = load_grayscale(&cli.image)?;
    let run = detect_circles(&gray, &config)?;
    log::info!(
        "{} edge pixels, {} centres",
        run.edges.edge_count(),
        run.circles.len()
    );

    let stem = file_stem(&cli.image);
    let acc_png = cli.out_dir.join(format!("{stem}_circles_acc.png"));
    let peaks_txt = cli.out_dir.join(format!("{stem}_circles_peaks.txt"));
    let detected_png = cli.out_dir.join(format!("{stem}_circles_detected.png"));

    std::fs::create_dir_all(&cli.out_dir)?;
    let axes = HeatmapAxes::circles(&run.accumulator);
    render_accumulator_chart(&run.accumulator, &axes, CHART_SIZE)?.save(&acc_png)?;
    write_text_file(&peaks_txt, &circle_report(&run.circles))?;
    let source = image::open(&cli.image)?;
    annotate_circles(&source, &run.circles, run.radius).save(&detected_png)?;

    println!("[OK] {} circles detected.", run.circles.len());
    println!("     Accumulator: {}", acc_png.display());
    println!("     Peaks:       {}", peaks_txt.display());
    println!("     Overlay:     {}", detected_png.display());

    if cli.json {
        let peaks_json = cli.out_dir.join(format!("{stem}_circles_peaks.json"));
        write_text_file(&peaks_json, &circle_report_json(&run.circles)?)?;
        println!("     JSON:        {}", peaks_json.display());
    }

    Ok(())
}
