//! Line accumulator in the polar parameterisation `rho = x·cos(theta) + y·sin(theta)`.
//!
//! Axes:
//! - `rho` from `-ceil(hypot(H, W))` to `+ceil(hypot(H, W))` inclusive, step `rho_res`
//! - `theta` from -90° up to (not including) 90°, step `theta_res_deg`, stored in radians
//!
//! The grid has one row per rho bucket and one column per theta bucket.
use super::VoteCaster;
use crate::error::{HoughError, ensure_positive_step};
use crate::grid::{AccumulatorGrid, EdgeGrid, Grid};

/// Discretised (rho, theta) space for an image of a given size.
#[derive(Debug, Clone)]
pub struct LineSpace {
    rhos: Vec<f64>,
    thetas: Vec<f64>,
    cos: Vec<f64>,
    sin: Vec<f64>,
    rho_res: f64,
}

/// Upper bound on accumulator cells; finer steps are rejected up front.
pub const MAX_LINE_CELLS: usize = 1 << 26;

/// Number of samples in `[start, stop)` with the given step, capped at [`MAX_LINE_CELLS`].
fn arange_len(parameter: &'static str, start: f64, stop: f64, step: f64) -> Result<usize, HoughError> {
    let n = ((stop - start) / step).ceil().max(0.0);
    if n > MAX_LINE_CELLS as f64 {
        return Err(HoughError::invalid(
            parameter,
            format!("step {step} gives {n:e} buckets, more than {MAX_LINE_CELLS} cells"),
        ));
    }
    Ok(n as usize)
}

impl LineSpace {
    pub fn new(width: usize, height: usize, theta_res_deg: f64, rho_res: f64) -> Result<Self, HoughError> {
        ensure_positive_step("theta_res_deg", theta_res_deg)?;
        ensure_positive_step("rho_res", rho_res)?;
        if width == 0 || height == 0 {
            return Err(HoughError::invalid(
                "edges",
                format!("grid must be non-empty, got {width}x{height}"),
            ));
        }

        let rho_max = (height as f64).hypot(width as f64).ceil();
        let n_rho = arange_len("rho_res", -rho_max, rho_max + 1.0, rho_res)?;
        let n_theta = arange_len("theta_res_deg", -90.0, 90.0, theta_res_deg)?;
        if n_rho.checked_mul(n_theta).is_none_or(|cells| cells > MAX_LINE_CELLS) {
            let parameter = if n_rho >= n_theta { "rho_res" } else { "theta_res_deg" };
            return Err(HoughError::invalid(
                parameter,
                format!("{n_rho} rho x {n_theta} theta buckets exceed {MAX_LINE_CELLS} cells"),
            ));
        }

        let rhos: Vec<f64> = (0..n_rho).map(|i| -rho_max + i as f64 * rho_res).collect();
        let thetas: Vec<f64> = (0..n_theta)
            .map(|i| (-90.0 + i as f64 * theta_res_deg).to_radians())
            .collect();
        let cos = thetas.iter().map(|t| t.cos()).collect();
        let sin = thetas.iter().map(|t| t.sin()).collect();

        Ok(Self {
            rhos,
            thetas,
            cos,
            sin,
            rho_res,
        })
    }

    pub fn rho_axis(&self) -> &[f64] {
        &self.rhos
    }

    /// Theta bucket centres in radians.
    pub fn theta_axis(&self) -> &[f64] {
        &self.thetas
    }

    #[inline]
    pub fn rho_at(&self, rho_idx: usize) -> f64 {
        self.rhos[rho_idx]
    }

    #[inline]
    pub fn theta_at(&self, theta_idx: usize) -> f64 {
        self.thetas[theta_idx]
    }

    /// Nearest rho bucket, rounding half away from zero; `None` outside the axis.
    #[inline]
    pub fn rho_index(&self, rho: f64) -> Option<usize> {
        let idx = ((rho - self.rhos[0]) / self.rho_res).round();
        if idx >= 0.0 && (idx as usize) < self.rhos.len() {
            Some(idx as usize)
        } else {
            None
        }
    }
}

impl VoteCaster for LineSpace {
    fn cells(&self) -> usize {
        self.rhos.len() * self.thetas.len()
    }

    fn cast(&self, x: usize, y: usize, acc: &mut [u32]) {
        let n_theta = self.thetas.len();
        let (fx, fy) = (x as f64, y as f64);
        for (t, (&c, &s)) in self.cos.iter().zip(&self.sin).enumerate() {
            if let Some(r) = self.rho_index(fx * c + fy * s) {
                acc[r * n_theta + t] += 1;
            }
        }
    }
}

fn into_grid(space: &LineSpace, votes: Vec<u32>) -> Result<AccumulatorGrid, HoughError> {
    Grid::from_vec(space.thetas.len(), space.rhos.len(), votes)
}

/// Accumulate line votes for every edge pixel.
///
/// Returns the vote grid (rows = rho, columns = theta) and the space holding both axes.
pub fn build_line_space(
    edges: &EdgeGrid,
    theta_res_deg: f64,
    rho_res: f64,
) -> Result<(AccumulatorGrid, LineSpace), HoughError> {
    let space = LineSpace::new(edges.width(), edges.height(), theta_res_deg, rho_res)?;
    let points = edges.edge_points();
    log::debug!(
        "build_line_space: {} edge pixels into {}x{} (rho x theta)",
        points.len(),
        space.rhos.len(),
        space.thetas.len()
    );
    let votes = super::accumulate(&space, &points);
    Ok((into_grid(&space, votes)?, space))
}

/// Same result as [`build_line_space`], with edge pixels split across rayon workers.
#[cfg(feature = "parallel")]
pub fn build_line_space_parallel(
    edges: &EdgeGrid,
    theta_res_deg: f64,
    rho_res: f64,
) -> Result<(AccumulatorGrid, LineSpace), HoughError> {
    let space = LineSpace::new(edges.width(), edges.height(), theta_res_deg, rho_res)?;
    let points = edges.edge_points();
    log::debug!(
        "build_line_space_parallel: {} edge pixels into {}x{} (rho x theta)",
        points.len(),
        space.rhos.len(),
        space.thetas.len()
    );
    let votes = super::accumulate_parallel(&space, &points);
    Ok((into_grid(&space, votes)?, space))
}
