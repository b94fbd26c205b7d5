//! Fixed-radius circle accumulator.
//!
//! Each edge pixel `(x, y)` votes for the centres `(a, b)` at distance `radius`
//! from it, sampled at 1° over [0°, 360°). The grid has the image's shape,
//! indexed `(b, a)` row-major.
use super::VoteCaster;
use crate::error::HoughError;
use crate::grid::{AccumulatorGrid, EdgeGrid, Grid};

/// Angular samples per edge pixel.
pub const CIRCLE_STEPS: usize = 360;

/// Centre offsets for one radius, precomputed over the full turn.
#[derive(Debug, Clone)]
pub struct CircleSpace {
    width: usize,
    height: usize,
    offsets: Vec<(f64, f64)>,
}

impl CircleSpace {
    pub fn new(width: usize, height: usize, radius: i32) -> Result<Self, HoughError> {
        if radius <= 0 {
            return Err(HoughError::invalid(
                "radius",
                format!("must be > 0, got {radius}"),
            ));
        }
        if width == 0 || height == 0 {
            return Err(HoughError::invalid(
                "edges",
                format!("grid must be non-empty, got {width}x{height}"),
            ));
        }
        let r = radius as f64;
        let offsets = (0..CIRCLE_STEPS)
            .map(|deg| {
                let t = (deg as f64).to_radians();
                (r * t.cos(), r * t.sin())
            })
            .collect();
        Ok(Self {
            width,
            height,
            offsets,
        })
    }

    /// Candidate centre for an edge pixel at one angular step, if it lies inside the image.
    #[inline]
    pub fn center(&self, x: usize, y: usize, step: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.offsets[step];
        let a = (x as f64 - dx).round();
        let b = (y as f64 - dy).round();
        if a >= 0.0 && b >= 0.0 && (a as usize) < self.width && (b as usize) < self.height {
            Some((a as usize, b as usize))
        } else {
            None
        }
    }
}

impl VoteCaster for CircleSpace {
    fn cells(&self) -> usize {
        self.width * self.height
    }

    fn cast(&self, x: usize, y: usize, acc: &mut [u32]) {
        for step in 0..self.offsets.len() {
            if let Some((a, b)) = self.center(x, y, step) {
                acc[b * self.width + a] += 1;
            }
        }
    }
}

/// Accumulate centre votes for circles of the given radius.
pub fn build_circle_space(edges: &EdgeGrid, radius: i32) -> Result<AccumulatorGrid, HoughError> {
    let space = CircleSpace::new(edges.width(), edges.height(), radius)?;
    let points = edges.edge_points();
    log::debug!(
        "build_circle_space: {} edge pixels, radius {radius}, {}x{}",
        points.len(),
        edges.width(),
        edges.height()
    );
    let votes = super::accumulate(&space, &points);
    Grid::from_vec(edges.width(), edges.height(), votes)
}

/// Same result as [`build_circle_space`], with edge pixels split across rayon workers.
#[cfg(feature = "parallel")]
pub fn build_circle_space_parallel(edges: &EdgeGrid, radius: i32) -> Result<AccumulatorGrid, HoughError> {
    let space = CircleSpace::new(edges.width(), edges.height(), radius)?;
    let points = edges.edge_points();
    log::debug!(
        "build_circle_space_parallel: {} edge pixels, radius {radius}, {}x{}",
        points.len(),
        edges.width(),
        edges.height()
    );
    let votes = super::accumulate_parallel(&space, &points);
    Grid::from_vec(edges.width(), edges.height(), votes)
}
