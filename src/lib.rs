//! Hough-transform detection of straight lines and fixed-radius circles.
//!
//! Pipeline: intensity grid → [`detect_edges`] → binary edge grid →
//! [`build_line_space`] or [`build_circle_space`] → vote grid →
//! [`extract_peaks`] → ranked peaks → [`segment_from_rho_theta`] for lines.
//!
//! The core modules are pure functions over [`Grid`]s. `io`, `render`, `report`
//! and `synth` are the file-facing helpers used by the command-line tools.

pub mod config;
pub mod edges;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hough;
pub mod io;
pub mod peaks;
pub mod pipeline;
pub mod render;
pub mod report;
pub mod synth;

pub use config::{CircleConfig, LineConfig};
pub use edges::detect_edges;
pub use error::HoughError;
pub use geometry::{LineSegment, segment_from_rho_theta};
pub use grid::{AccumulatorGrid, EdgeGrid, GradientMagnitudeGrid, Grid, IntensityGrid};
pub use hough::{CircleSpace, LineSpace, build_circle_space, build_line_space};
pub use peaks::{Peak, extract_peaks};
pub use pipeline::{CircleDetection, LineDetection, detect_circles, detect_lines};

#[cfg(feature = "parallel")]
pub use hough::{build_circle_space_parallel, build_line_space_parallel};
