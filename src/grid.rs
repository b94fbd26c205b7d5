//! Owned 2-D grid in row-major layout (stride == width).
//!
//! Every stage of the pipeline passes one of these by reference: intensities in,
//! binary edges and gradient magnitudes out of the edge stage, vote counts out of
//! the accumulators.

use crate::error::HoughError;

#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Real-valued samples, typically 0-255.
pub type IntensityGrid = Grid<f32>;
/// Two-level grid: `EDGE` (255) or `NOT_EDGE` (0).
pub type EdgeGrid = Grid<u8>;
pub type GradientMagnitudeGrid = Grid<f32>;
pub type AccumulatorGrid = Grid<u32>;

pub const EDGE: u8 = 255;
pub const NOT_EDGE: u8 = 0;

impl<T> Grid<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, HoughError> {
        let expected = width
            .checked_mul(height)
            .ok_or(HoughError::SizeMismatch {
                expected: usize::MAX,
                actual: data.len(),
            })?;
        if data.len() != expected {
            return Err(HoughError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Convert (x, y) to a linear index into the backing buffer.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Inverse of [`Grid::idx`].
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[T] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Copy> Grid<T> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

impl<T: Clone> Grid<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    pub fn new(width: usize, height: usize) -> Self {
        Self::new_fill(width, height, T::default())
    }
}

impl EdgeGrid {
    /// Edge pixel coordinates `(x, y)` in row-major scan order.
    pub fn edge_points(&self) -> Vec<(usize, usize)> {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != NOT_EDGE)
            .map(|(i, _)| (i % self.width, i / self.width))
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != NOT_EDGE).count()
    }
}

impl AccumulatorGrid {
    pub fn total_votes(&self) -> u64 {
        self.data.iter().map(|&v| v as u64).sum()
    }

    pub fn max_votes(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}
