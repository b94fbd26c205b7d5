use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};

use hough_shapes::config::{LineConfig, load_config};
use hough_shapes::io::{load_grayscale, write_text_file};
use hough_shapes::pipeline::detect_lines;
use hough_shapes::render::{
    CHART_SIZE, HeatmapAxes, annotate_lines, register_chart_font, render_accumulator_chart,
};
use hough_shapes::report::{line_report, line_report_json};

#[derive(Parser, Debug)]
#[command(
    name = "hough_lines",
    about = "Detect straight lines with the Hough transform",
    version
)]
struct Cli {
    /// Input image
    #[arg(long)]
    image: PathBuf,

    /// JSON file with line detection parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sobel magnitude threshold for edge pixels
    #[arg(long = "edge-thresh")]
    edge_thresh: Option<f32>,

    /// Angular resolution in degrees
    #[arg(long = "theta-res")]
    theta_res: Option<f64>,

    /// Distance resolution in pixels
    #[arg(long = "rho-res")]
    rho_res: Option<f64>,

    /// Maximum number of peaks to extract
    #[arg(long)]
    k: Option<usize>,

    /// Minimum votes per peak
    #[arg(long = "min-votes")]
    min_votes: Option<u32>,

    /// Output directory
    #[arg(long = "out-dir", default_value = "data/output")]
    out_dir: PathBuf,

    /// TrueType font for the accumulator chart text (system fonts are tried otherwise)
    #[arg(long)]
    font: Option<PathBuf>,

    /// Also write the peaks as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<LineConfig, Box<dyn Error>> {
        let mut cfg = match &self.config {
            Some(path) => load_config::<LineConfig>(path)?,
            None => LineConfig::default(),
        };
        if let Some(v) = self.edge_thresh {
            cfg.edge_threshold = v;
        }
        if let Some(v) = self.theta_res {
            cfg.theta_res_deg = v;
        }
        if let Some(v) = self.rho_res {
            cfg.rho_res = v;
        }
        if let Some(v) = self.k {
            cfg.k = v;
        }
        if let Some(v) = self.min_votes {
            cfg.min_votes = v;
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
    log::info!("line detection on {} with {:?}", cli.image.display(), config);

    let gray = load_grayscale(&cli.image)?;
    let run = detect_lines(&gray, &config)?;
    log::info!(
        "{} edge pixels, {} peaks",
        run.edges.edge_count(),
        run.peaks.len()
    );

    let stem = file_stem(&cli.image);
    let acc_png = cli.out_dir.join(format!("{stem}_acc.png"));
    let peaks_txt = cli.out_dir.join(format!("{stem}_peaks.txt"));
    let detected_png = cli.out_dir.join(format!("{stem}_lines_detected.png"));

    std::fs::create_dir_all(&cli.out_dir)?;
    let axes = HeatmapAxes::lines(&run.space);
    render_accumulator_chart(&run.accumulator, &axes, CHART_SIZE)?.save(&acc_png)?;
    write_text_file(&peaks_txt, &line_report(&run.lines))?;

    for line in run.lines.iter().filter(|l| l.segment.is_none()) {
        log::warn!(
            "line rho={:.1} theta_deg={:.1} does not cross the image, not drawn",
            line.rho,
            line.theta_deg()
        );
    }
    let source = image::open(&cli.image)?;
    annotate_lines(&source, &run.lines).save(&detected_png)?;

    println!("[OK] {} lines detected.", run.lines.len());
    println!("     Accumulator: {}", acc_png.display());
    println!("     Peaks:       {}", peaks_txt.display());
    println!("     Overlay:     {}", detected_png.display());

    if cli.json {
        let peaks_json = cli.out_dir.join(format!("{stem}_peaks.json"));
        write_text_file(&peaks_json, &line_report_json(&run.lines)?)?;
        println!("     JSON:        {}", peaks_json.display());
    }

    Ok(())
}
