//! Sobel gradient magnitude and binary edge thresholding.
//!
//! - Correlates the 3×3 Sobel pair with edge-replicated borders, so a
//!   constant image has zero gradient everywhere, including the border.
//! - `mag = sqrt(gx^2 + gy^2)`; a pixel is an edge iff `mag >= threshold`.
//!
//! Complexity: O(W·H); a single pass produces both outputs.
use crate::grid::{EDGE, EdgeGrid, GradientMagnitudeGrid, Grid, IntensityGrid, NOT_EDGE};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Sobel magnitude of `grid`, thresholded into a 0/255 edge grid.
///
/// A zero-sized input yields zero-sized outputs.
pub fn detect_edges(grid: &IntensityGrid, threshold: f32) -> (EdgeGrid, GradientMagnitudeGrid) {
    let magnitude = gradient_magnitude(grid);
    let edges = magnitude.map(|&m| if m >= threshold { EDGE } else { NOT_EDGE });
    log::debug!(
        "detect_edges: {}x{} threshold={threshold} edges={}",
        grid.width(),
        grid.height(),
        edges.edge_count()
    );
    (edges, magnitude)
}

/// Sobel gradient magnitude with edge-replicated padding.
pub fn gradient_magnitude(grid: &IntensityGrid) -> GradientMagnitudeGrid {
    let w = grid.width();
    let h = grid.height();
    let mut mag = Grid::new(w, h);
    if grid.is_empty() {
        return mag;
    }

    for y in 0..h {
        let y_idx = [y.saturating_sub(1), y, (y + 1).min(h - 1)];
        let rows = [grid.row(y_idx[0]), grid.row(y_idx[1]), grid.row(y_idx[2])];
        let out = mag.row_mut(y);
        for (x, out_px) in out.iter_mut().enumerate() {
            let x_idx = [x.saturating_sub(1), x, (x + 1).min(w - 1)];

            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for (ky, row) in rows.iter().enumerate() {
                let kx_row = &SOBEL_KERNEL_X[ky];
                let ky_row = &SOBEL_KERNEL_Y[ky];
                sum_x += row[x_idx[0]] * kx_row[0] + row[x_idx[1]] * kx_row[1] + row[x_idx[2]] * kx_row[2];
                sum_y += row[x_idx[0]] * ky_row[0] + row[x_idx[1]] * ky_row[1] + row[x_idx[2]] * ky_row[2];
            }
            *out_px = (sum_x * sum_x + sum_y * sum_y).sqrt();
        }
    }

    mag
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_image(w: usize, h: usize, split: usize) -> IntensityGrid {
        let mut g = IntensityGrid::new(w, h);
        for y in 0..h {
            for x in split..w {
                g.set(x, y, 255.0);
            }
        }
        g
    }

    #[test]
    fn constant_image_has_no_edges_even_at_border() {
        let g = IntensityGrid::new_fill(6, 5, 128.0);
        let (edges, mag) = detect_edges(&g, 1.0);
        assert_eq!(edges.edge_count(), 0);
        assert!(mag.data().iter().all(|&m| m == 0.0));
    }

    #[test]
    fn vertical_step_marks_the_two_columns_around_it() {
        let g = step_image(8, 4, 4);
        let (edges, mag) = detect_edges(&g, 50.0);
        for y in 0..4 {
            assert_eq!(mag.get(3, y), 1020.0);
            assert_eq!(mag.get(4, y), 1020.0);
            assert_eq!(mag.get(2, y), 0.0);
            assert_eq!(edges.get(3, y), EDGE);
            assert_eq!(edges.get(4, y), EDGE);
            assert_eq!(edges.get(0, y), NOT_EDGE);
            assert_eq!(edges.get(7, y), NOT_EDGE);
        }
    }

    #[test]
    fn threshold_is_inclusive() {
        let g = step_image(8, 4, 4);
        let (at, _) = detect_edges(&g, 1020.0);
        let (above, _) = detect_edges(&g, 1020.5);
        assert_eq!(at.edge_count(), 8);
        assert_eq!(above.edge_count(), 0);
    }

    #[test]
    fn zero_sized_grid_is_not_a_failure() {
        let g = IntensityGrid::new(0, 0);
        let (edges, mag) = detect_edges(&g, 50.0);
        assert!(edges.is_empty());
        assert!(mag.is_empty());
    }
}
