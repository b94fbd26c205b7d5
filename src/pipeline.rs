//! End-to-end detection: intensities → edges → accumulator → peaks → shapes.
//!
//! The intermediate grids are returned alongside the detections so callers can
//! render the accumulator or inspect the edge map.

use serde::Serialize;

use crate::config::{CircleConfig, LineConfig};
use crate::edges::detect_edges;
use crate::error::HoughError;
use crate::geometry::{LineSegment, segment_from_rho_theta};
use crate::grid::{AccumulatorGrid, EdgeGrid, GradientMagnitudeGrid, IntensityGrid};
use crate::hough::LineSpace;
use crate::peaks::{Peak, extract_peaks};

/// A detected line in polar form, with its visible segment if it crosses the image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineDetection {
    pub rho: f64,
    /// Radians.
    pub theta: f64,
    pub votes: u32,
    pub segment: Option<LineSegment>,
}

impl LineDetection {
    pub fn theta_deg(&self) -> f64 {
        self.theta.to_degrees()
    }
}

/// A detected circle centre; the radius is the one the run was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircleDetection {
    pub a: usize,
    pub b: usize,
    pub votes: u32,
}

#[derive(Debug, Clone)]
pub struct LineRun {
    pub edges: EdgeGrid,
    pub magnitude: GradientMagnitudeGrid,
    pub accumulator: AccumulatorGrid,
    pub space: LineSpace,
    pub peaks: Vec<Peak>,
    pub lines: Vec<LineDetection>,
}

#[derive(Debug, Clone)]
pub struct CircleRun {
    pub edges: EdgeGrid,
    pub magnitude: GradientMagnitudeGrid,
    pub accumulator: AccumulatorGrid,
    pub radius: i32,
    pub peaks: Vec<Peak>,
    pub circles: Vec<CircleDetection>,
}

#[cfg(feature = "parallel")]
fn line_space(edges: &EdgeGrid, config: &LineConfig) -> Result<(AccumulatorGrid, LineSpace), HoughError> {
    crate::hough::build_line_space_parallel(edges, config.theta_res_deg, config.rho_res)
}

#[cfg(not(feature = "parallel"))]
fn line_space(edges: &EdgeGrid, config: &LineConfig) -> Result<(AccumulatorGrid, LineSpace), HoughError> {
    crate::hough::build_line_space(edges, config.theta_res_deg, config.rho_res)
}

#[cfg(feature = "parallel")]
fn circle_space(edges: &EdgeGrid, radius: i32) -> Result<AccumulatorGrid, HoughError> {
    crate::hough::build_circle_space_parallel(edges, radius)
}

#[cfg(not(feature = "parallel"))]
fn circle_space(edges: &EdgeGrid, radius: i32) -> Result<AccumulatorGrid, HoughError> {
    crate::hough::build_circle_space(edges, radius)
}

/// Map line peaks back to (rho, theta) and clip them to the image.
pub fn lines_from_peaks(peaks: &[Peak], space: &LineSpace, width: usize, height: usize) -> Vec<LineDetection> {
    peaks
        .iter()
        .map(|p| {
            let rho = space.rho_at(p.row);
            let theta = space.theta_at(p.col);
            LineDetection {
                rho,
                theta,
                votes: p.votes,
                segment: segment_from_rho_theta(rho, theta, width, height),
            }
        })
        .collect()
}

pub fn circles_from_peaks(peaks: &[Peak]) -> Vec<CircleDetection> {
    peaks
        .iter()
        .map(|p| CircleDetection {
            a: p.col,
            b: p.row,
            votes: p.votes,
        })
        .collect()
}

pub fn detect_lines(gray: &IntensityGrid, config: &LineConfig) -> Result<LineRun, HoughError> {
    config.validate()?;
    let (edges, magnitude) = detect_edges(gray, config.edge_threshold);
    let (accumulator, space) = line_space(&edges, config)?;
    let peaks = extract_peaks(&accumulator, config.k, config.min_votes);
    let lines = lines_from_peaks(&peaks, &space, gray.width(), gray.height());
    log::debug!(
        "detect_lines: {} peaks, {} visible segments",
        peaks.len(),
        lines.iter().filter(|l| l.segment.is_some()).count()
    );
    Ok(LineRun {
        edges,
        magnitude,
        accumulator,
        space,
        peaks,
        lines,
    })
}

pub fn detect_circles(gray: &IntensityGrid, config: &CircleConfig) -> Result<CircleRun, HoughError> {
    config.validate()?;
    let (edges, magnitude) = detect_edges(gray, config.edge_threshold);
    let accumulator = circle_space(&edges, config.radius)?;
    let peaks = extract_peaks(&accumulator, config.k, config.min_votes);
    let circles = circles_from_peaks(&peaks);
    log::debug!("detect_circles: {} centres (radius {})", circles.len(), config.radius);
    Ok(CircleRun {
        edges,
        magnitude,
        accumulator,
        radius: config.radius,
        peaks,
        circles,
    })
}
